//! Scene adapter between a renderer and the session
//!
//! The renderer reports pointer hits as [`GeometryHandle`]s; the scene
//! resolves them to regions and forwards them to the [`Session`]. Each frame
//! the renderer asks for a [`DrawState`] per primitive and applies it to its
//! materials. Both halves of a bilateral muscle share a region id, so they
//! always light up together.

use crate::anatomy::{BodyLayout, GeometryHandle, RegionId};
use crate::highlight::{HighlightPolicy, VisualParams};
use crate::selection::{RegionVisualState, SelectionChanged};
use crate::session::Session;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Leave,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub handle: GeometryHandle,
    pub kind: PointerKind,
}

/// What to draw for one primitive this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawState {
    pub handle: GeometryHandle,
    pub region: RegionId,
    pub state: RegionVisualState,
    pub visual: VisualParams,
}

pub struct Scene {
    layout: BodyLayout,
    policy: HighlightPolicy,
    session: Session,
    /// Primitive under the pointer. Bilateral halves share a region, so
    /// leave events are matched on the handle, not the id.
    hovered_handle: Option<GeometryHandle>,
}

impl Scene {
    pub fn new(layout: BodyLayout, policy: HighlightPolicy, session: Session) -> Self {
        let unknown = layout.unknown_regions(session.controller().registry());
        if !unknown.is_empty() {
            tracing::warn!(
                "Layout references {} unknown region(s): {:?}",
                unknown.len(),
                unknown
            );
        }
        Self {
            layout,
            policy,
            session,
            hovered_handle: None,
        }
    }

    pub fn layout(&self) -> &BodyLayout {
        &self.layout
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Route a pointer event. Returns the selection change a click caused.
    ///
    /// Handles the layout doesn't know are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SelectionChanged> {
        let Some(region) = self.layout.resolve(event.handle) else {
            tracing::debug!(handle = event.handle.index(), "Pointer on unknown handle");
            return None;
        };

        match event.kind {
            PointerKind::Enter => {
                // Decorative primitives never take over the hover
                if self.session.controller().registry().is_interactive(region) {
                    self.hovered_handle = Some(event.handle);
                    self.session.hover(Some(region));
                }
                None
            }
            PointerKind::Leave => {
                // A late leave from a primitive the pointer already moved off
                if self.hovered_handle == Some(event.handle) {
                    self.hovered_handle = None;
                    self.session.leave(region);
                }
                None
            }
            PointerKind::Click => self.session.select(region),
        }
    }

    /// Visuals for every primitive, in handle order
    pub fn frame(&self, elapsed: Duration) -> Vec<DrawState> {
        let controller = self.session.controller();
        self.layout
            .iter()
            .map(|(handle, primitive)| {
                let state = controller.visual_state(primitive.region);
                DrawState {
                    handle,
                    region: primitive.region,
                    state,
                    visual: self.policy.visual(state, elapsed),
                }
            })
            .collect()
    }

    /// Label for the floating tooltip while an interactive region is hovered
    pub fn tooltip(&self) -> Option<&'static str> {
        let controller = self.session.controller();
        let hovered = controller.state().hovered?;
        controller.registry().get(hovered).map(|r| r.label)
    }
}
