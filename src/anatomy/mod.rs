//! Anatomical regions: semantic ids, display metadata, and the static catalog
//!
//! A region is a muscle concept, not a mesh. Several drawable primitives may
//! share one [`RegionId`] (left/right pairs, sub-parts of one muscle group);
//! the mapping from primitives to ids lives in [`layout`].
//!
//! ```text
//! pointer hit → GeometryHandle → BodyLayout::resolve → RegionId → MuscleRegistry
//! ```

mod catalog;
pub mod layout;

pub use layout::{BodyLayout, GeometryHandle, Primitive, Shape};

use serde::Serialize;
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Stable semantic identifier of a muscle concept (e.g. `"biceps_long"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegionId(&'static str);

impl RegionId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Anatomical grouping. Informational only; selection never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulder,
    Arm,
    Core,
    Leg,
    Head,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        Self::Chest,
        Self::Back,
        Self::Shoulder,
        Self::Arm,
        Self::Core,
        Self::Leg,
        Self::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulder => "shoulder",
            Self::Arm => "arm",
            Self::Core => "core",
            Self::Leg => "leg",
            Self::Head => "head",
        }
    }

    /// Parse group name from CLI/config input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Region metadata
// ─────────────────────────────────────────────────────────────────────────────

/// One entry in the registry. Immutable once the registry is built.
#[derive(Debug, Clone, Serialize)]
pub struct MuscleRegion {
    pub id: RegionId,
    pub group: MuscleGroup,
    /// Decorative regions never enter hover or selection state
    pub interactive: bool,
    /// Short tooltip text shown while hovering
    pub label: &'static str,
    /// Panel heading
    pub display_name: &'static str,
    /// Descriptive anatomical phrase used when asking for exercises
    pub anatomical_name: &'static str,
}

/// Catalog of regions keyed by id
#[derive(Debug, Clone)]
pub struct MuscleRegistry {
    regions: Vec<MuscleRegion>,
    index: HashMap<&'static str, usize>,
}

impl MuscleRegistry {
    /// Build a registry from an explicit list.
    ///
    /// Later duplicates of an id are ignored; the first definition wins.
    pub fn new(regions: Vec<MuscleRegion>) -> Self {
        let mut index = HashMap::with_capacity(regions.len());
        let mut unique = Vec::with_capacity(regions.len());
        for region in regions {
            if index.contains_key(region.id.as_str()) {
                tracing::warn!("Duplicate region id '{}' ignored", region.id);
                continue;
            }
            index.insert(region.id.as_str(), unique.len());
            unique.push(region);
        }
        Self {
            regions: unique,
            index,
        }
    }

    /// The built-in body catalog
    pub fn standard() -> Self {
        Self::new(catalog::REGIONS.to_vec())
    }

    pub fn get(&self, id: RegionId) -> Option<&MuscleRegion> {
        self.lookup(id.as_str())
    }

    /// Look up a region by its raw string id
    pub fn lookup(&self, id: &str) -> Option<&MuscleRegion> {
        self.index.get(id).map(|&i| &self.regions[i])
    }

    /// All regions in catalog order
    pub fn all(&self) -> &[MuscleRegion] {
        &self.regions
    }

    pub fn interactive(&self) -> impl Iterator<Item = &MuscleRegion> {
        self.regions.iter().filter(|r| r.interactive)
    }

    pub fn by_group(&self, group: MuscleGroup) -> impl Iterator<Item = &MuscleRegion> {
        self.regions.iter().filter(move |r| r.group == group)
    }

    /// Unknown ids are treated as non-interactive
    pub fn is_interactive(&self, id: RegionId) -> bool {
        self.get(id).is_some_and(|r| r.interactive)
    }

    /// Anatomical phrase for prompting, falling back to the raw id
    pub fn anatomical_name(&self, id: RegionId) -> &'static str {
        self.get(id).map_or(id.as_str(), |r| r.anatomical_name)
    }

    /// Panel heading, falling back to the raw id
    pub fn display_name(&self, id: RegionId) -> &'static str {
        self.get(id).map_or(id.as_str(), |r| r.display_name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for MuscleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
