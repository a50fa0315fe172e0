//! Selection controller: exclusive selection, transient hover, panel state
//!
//! Per-region visual state is derived from two fields, never stored:
//!
//! ```text
//!   Idle ──enter──▶ Hovered ──leave──▶ Idle
//!    │                 │
//!    └──────click──────┴──▶ Selected ──(another region selected)──▶ Idle
//! ```
//!
//! Selected overrides Hovered. Hovering a different region never clears the
//! selection, and there is no explicit deselect.

use crate::anatomy::{MuscleRegistry, RegionId};
use crate::query::QueryOutcome;
use serde::Serialize;
use std::sync::Arc;

/// Visual state of one region, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionVisualState {
    Selected,
    Hovered,
    /// Interactive, at rest
    Idle,
    /// Decorative; never changes
    Static,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub selected: Option<RegionId>,
    pub hovered: Option<RegionId>,
}

/// Identifies the query issued for one selection.
///
/// The generation distinguishes A → B → A: the first A query is stale even
/// though its region matches the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestTag {
    pub region: RegionId,
    pub generation: u64,
}

/// Emitted when the selection moves to a new region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub tag: RequestTag,
    pub previous: Option<RegionId>,
}

/// What the result panel should show
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelState {
    /// Nothing selected yet
    #[default]
    Empty,
    Loading { tag: RequestTag },
    Ready { tag: RequestTag, outcome: QueryOutcome },
}

impl PanelState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading { .. })
    }

    pub fn outcome(&self) -> Option<&QueryOutcome> {
        match self {
            PanelState::Ready { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

pub struct SelectionController {
    registry: Arc<MuscleRegistry>,
    state: SelectionState,
    generation: u64,
    panel: PanelState,
}

impl SelectionController {
    pub fn new(registry: Arc<MuscleRegistry>) -> Self {
        Self {
            registry,
            state: SelectionState::default(),
            generation: 0,
            panel: PanelState::Empty,
        }
    }

    pub fn registry(&self) -> &MuscleRegistry {
        &self.registry
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// Tag of the query whose result is currently wanted
    pub fn current_tag(&self) -> Option<RequestTag> {
        self.state.selected.map(|region| RequestTag {
            region,
            generation: self.generation,
        })
    }

    /// Select a region.
    ///
    /// Returns `None` (and changes nothing) for decorative or unknown ids and
    /// for the id that is already selected. Otherwise the previous outcome is
    /// dropped, the panel goes to loading, and the caller should issue a
    /// query tagged with the returned tag.
    pub fn select_region(&mut self, id: RegionId) -> Option<SelectionChanged> {
        if !self.registry.is_interactive(id) {
            tracing::debug!("Ignoring select on non-interactive region '{}'", id);
            return None;
        }
        if self.state.selected == Some(id) {
            return None;
        }

        let previous = self.state.selected.replace(id);
        self.generation += 1;
        let tag = RequestTag {
            region: id,
            generation: self.generation,
        };
        self.panel = PanelState::Loading { tag };

        tracing::info!(
            region = %id,
            previous = previous.map(|p| p.as_str()).unwrap_or("-"),
            generation = self.generation,
            "Selection changed"
        );

        Some(SelectionChanged { tag, previous })
    }

    /// Set or clear the hovered region. Visual only; never triggers a query.
    ///
    /// Hovering a decorative or unknown id is a no-op.
    pub fn set_hover(&mut self, id: Option<RegionId>) {
        match id {
            Some(id) if !self.registry.is_interactive(id) => {}
            other => self.state.hovered = other,
        }
    }

    /// Pointer left `id`. Only clears hover if `id` is still the hovered one,
    /// so a late leave from A does not undo an enter on B.
    pub fn leave(&mut self, id: RegionId) {
        if self.state.hovered == Some(id) {
            self.state.hovered = None;
        }
    }

    /// Apply a finished query. Results for superseded tags are discarded.
    ///
    /// Returns true if the outcome was applied.
    pub fn complete(&mut self, tag: RequestTag, outcome: QueryOutcome) -> bool {
        if self.current_tag() != Some(tag) {
            tracing::debug!(
                region = %tag.region,
                generation = tag.generation,
                "Discarding stale query result"
            );
            return false;
        }
        self.panel = PanelState::Ready { tag, outcome };
        true
    }

    pub fn visual_state(&self, id: RegionId) -> RegionVisualState {
        if !self.registry.is_interactive(id) {
            RegionVisualState::Static
        } else if self.state.selected == Some(id) {
            RegionVisualState::Selected
        } else if self.state.hovered == Some(id) {
            RegionVisualState::Hovered
        } else {
            RegionVisualState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{ExerciseRecord, QueryFailure};

    const LATS: RegionId = RegionId::new("lats");
    const QUADS: RegionId = RegionId::new("quads");
    const TORSO: RegionId = RegionId::new("torso");

    fn controller() -> SelectionController {
        SelectionController::new(Arc::new(MuscleRegistry::standard()))
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut c = controller();
        let first = c.select_region(LATS).unwrap();
        assert_eq!(first.previous, None);

        let second = c.select_region(QUADS).unwrap();
        assert_eq!(second.previous, Some(LATS));
        assert_eq!(c.state().selected, Some(QUADS));
        assert_eq!(c.visual_state(LATS), RegionVisualState::Idle);
        assert_eq!(c.visual_state(QUADS), RegionVisualState::Selected);
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut c = controller();
        let tag = c.select_region(LATS).unwrap().tag;
        assert!(c.complete(tag, QueryOutcome::Empty));

        assert!(c.select_region(LATS).is_none());
        // outcome kept, no new loading state
        assert_eq!(c.panel().outcome(), Some(&QueryOutcome::Empty));
        assert_eq!(c.current_tag(), Some(tag));
    }

    #[test]
    fn test_at_most_one_selected_over_any_sequence() {
        let mut c = controller();
        let ids: Vec<RegionId> = c.registry().all().iter().map(|r| r.id).collect();
        for (i, id) in ids.iter().cycle().take(100).enumerate() {
            c.select_region(ids[(i * 7) % ids.len()]);
            c.select_region(*id);
            let selected = ids
                .iter()
                .filter(|r| c.visual_state(**r) == RegionVisualState::Selected)
                .count();
            assert!(selected <= 1);
        }
    }

    #[test]
    fn test_decorative_region_ignores_hover_and_select() {
        let mut c = controller();
        c.set_hover(Some(LATS));
        assert!(c.select_region(TORSO).is_none());
        c.set_hover(Some(TORSO));

        assert_eq!(c.state().hovered, Some(LATS));
        assert_eq!(c.state().selected, None);
        assert_eq!(c.visual_state(TORSO), RegionVisualState::Static);
        assert_eq!(c.panel(), &PanelState::Empty);
    }

    #[test]
    fn test_unknown_region_is_ignored() {
        let mut c = controller();
        assert!(c.select_region(RegionId::new("wings")).is_none());
        assert_eq!(c.visual_state(RegionId::new("wings")), RegionVisualState::Static);
    }

    #[test]
    fn test_selected_overrides_hover() {
        let mut c = controller();
        c.select_region(LATS);
        c.set_hover(Some(LATS));
        assert_eq!(c.visual_state(LATS), RegionVisualState::Selected);

        c.set_hover(Some(QUADS));
        assert_eq!(c.visual_state(QUADS), RegionVisualState::Hovered);
        assert_eq!(c.state().selected, Some(LATS));
    }

    #[test]
    fn test_hover_never_changes_panel() {
        let mut c = controller();
        let tag = c.select_region(LATS).unwrap().tag;
        c.set_hover(Some(QUADS));
        c.set_hover(None);
        assert_eq!(c.panel(), &PanelState::Loading { tag });
    }

    #[test]
    fn test_late_leave_does_not_clear_new_hover() {
        let mut c = controller();
        c.set_hover(Some(LATS));
        c.set_hover(Some(QUADS));
        c.leave(LATS);
        assert_eq!(c.state().hovered, Some(QUADS));
        c.leave(QUADS);
        assert_eq!(c.state().hovered, None);
    }

    #[test]
    fn test_stale_completion_discarded() {
        let mut c = controller();
        let a = c.select_region(LATS).unwrap().tag;
        let b = c.select_region(QUADS).unwrap().tag;

        assert!(!c.complete(a, QueryOutcome::Empty));
        assert_eq!(c.panel(), &PanelState::Loading { tag: b });

        let records = vec![ExerciseRecord::named("Squat")];
        assert!(c.complete(b, QueryOutcome::Success(records.clone())));
        assert_eq!(c.panel().outcome(), Some(&QueryOutcome::Success(records)));
    }

    #[test]
    fn test_reselecting_earlier_region_invalidates_its_old_query() {
        let mut c = controller();
        let first_a = c.select_region(LATS).unwrap().tag;
        c.select_region(QUADS);
        let second_a = c.select_region(LATS).unwrap().tag;

        assert_ne!(first_a, second_a);
        assert!(!c.complete(first_a, QueryOutcome::Empty));
        assert!(c.panel().is_loading());
    }

    #[test]
    fn test_failure_does_not_leak_into_next_selection() {
        let mut c = controller();
        let a = c.select_region(LATS).unwrap().tag;
        c.complete(a, QueryOutcome::Failure(QueryFailure::EmptyResponse));

        let b = c.select_region(QUADS).unwrap().tag;
        assert_eq!(c.panel(), &PanelState::Loading { tag: b });
    }
}
