//! Body layout: the drawable primitives handed to the renderer
//!
//! The renderer owns meshes, cameras and ray casting. This table only tells
//! it what to build and, in return, lets a pointer hit on a primitive be
//! resolved to a semantic [`RegionId`]. Coordinates are in body space (feet
//! near y = -1.5, head at y = 3.9); the renderer is free to offset the root.

use super::{MuscleRegistry, RegionId};
use serde::Serialize;

/// Opaque handle for one primitive. Stable for the lifetime of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GeometryHandle(u32);

impl GeometryHandle {
    /// Rebuild a handle from an index the renderer stored on its mesh
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Mesh primitive descriptor. Dimensions in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Capsule { radius: f32, length: f32 },
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Primitive {
    pub region: RegionId,
    pub shape: Shape,
    pub position: [f32; 3],
    /// Euler angles in radians (XYZ order)
    pub rotation: [f32; 3],
}

/// Ordered list of primitives; a primitive's handle is its index
#[derive(Debug, Clone, Default)]
pub struct BodyLayout {
    primitives: Vec<Primitive>,
}

impl BodyLayout {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    /// Map a pointer hit back to its semantic id
    pub fn resolve(&self, handle: GeometryHandle) -> Option<RegionId> {
        self.primitives.get(handle.index()).map(|p| p.region)
    }

    pub fn get(&self, handle: GeometryHandle) -> Option<&Primitive> {
        self.primitives.get(handle.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (GeometryHandle, &Primitive)> {
        self.primitives
            .iter()
            .enumerate()
            .map(|(i, p)| (GeometryHandle(i as u32), p))
    }

    /// Every primitive drawn for a region (both sides of a bilateral muscle)
    pub fn handles_for(&self, region: RegionId) -> Vec<GeometryHandle> {
        self.iter()
            .filter(|(_, p)| p.region == region)
            .map(|(h, _)| h)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Ids present in the layout but missing from the registry
    pub fn unknown_regions(&self, registry: &MuscleRegistry) -> Vec<RegionId> {
        let mut missing: Vec<RegionId> = self
            .primitives
            .iter()
            .map(|p| p.region)
            .filter(|id| registry.get(*id).is_none())
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// The built-in coarse body model
    pub fn standard() -> Self {
        let mut b = Builder::default();

        b.capsule("head", [0.0, 3.9, 0.0], 0.32, 0.45);

        // Decorative backdrop behind the muscle primitives
        b.boxed("torso", [0.0, 2.65, 0.0], [0.9, 1.5, 0.35], [0.0; 3]);
        b.boxed("pelvis", [0.0, 1.5, 0.0], [0.8, 0.35, 0.35], [0.0; 3]);

        // Chest
        b.mirrored_box("upper_chest", [0.25, 3.25, 0.22], [0.45, 0.2, 0.15], 0.2);
        b.mirrored_box("middle_chest", [0.22, 2.95, 0.28], [0.42, 0.35, 0.18], 0.0);
        b.mirrored_box("lower_chest", [0.25, 2.7, 0.25], [0.4, 0.15, 0.12], -0.1);
        b.mirrored_box("outer_chest", [0.5, 2.95, 0.22], [0.12, 0.5, 0.12], -0.1);

        // Back
        b.push(
            "traps",
            Shape::Cylinder {
                radius_top: 0.5,
                radius_bottom: 0.4,
                height: 0.2,
            },
            [0.0, 3.45, -0.2],
            [0.0; 3],
        );
        b.boxed("rhomboids", [0.0, 2.9, -0.25], [0.4, 0.5, 0.1], [0.0; 3]);
        b.mirrored_box("lats", [0.55, 2.5, -0.2], [0.25, 1.1, 0.1], -0.2);
        b.mirrored_box("teres", [0.6, 3.0, -0.15], [0.15, 0.2, 0.1], -0.3);
        b.boxed("lower_back", [0.0, 2.0, -0.25], [0.25, 0.5, 0.15], [0.0; 3]);

        // Shoulders
        b.mirrored_sphere("side_delt", [0.85, 3.3, 0.0], 0.26);
        b.mirrored_sphere("front_delt", [0.7, 3.25, 0.18], 0.18);
        b.mirrored_sphere("rear_delt", [0.7, 3.25, -0.18], 0.18);

        // Arms, laid out relative to each upper-arm origin
        for side in [-1.0_f32, 1.0] {
            let origin = [0.95 * side, 2.5, 0.0];
            let at = |x: f32, y: f32, z: f32| [origin[0] + x * side, origin[1] + y, origin[2] + z];
            b.capsule("biceps_long", at(0.08, 0.0, 0.1), 0.07, 0.55);
            b.capsule("biceps_short", at(-0.08, 0.0, 0.1), 0.07, 0.5);
            b.capsule("brachialis", at(0.12, -0.1, 0.05), 0.05, 0.3);
            b.capsule("triceps_long", at(-0.06, 0.05, -0.12), 0.08, 0.55);
            b.capsule("triceps_lateral", at(0.08, 0.15, -0.1), 0.07, 0.4);
            b.push(
                "forearms",
                Shape::Capsule {
                    radius: 0.11,
                    length: 0.65,
                },
                at(0.0, -0.7, 0.0),
                [0.0, 0.0, -0.1 * side],
            );
        }

        // Core
        b.boxed("abs_upper", [0.0, 2.3, 0.2], [0.32, 0.35, 0.1], [0.0; 3]);
        b.boxed("abs_lower", [0.0, 1.85, 0.2], [0.3, 0.45, 0.1], [0.0; 3]);
        b.mirrored_capsule("obliques", [0.35, 2.1, 0.15], 0.15, 0.7);

        // Hips and legs
        b.boxed("glutes", [0.0, 1.25, -0.2], [0.48, 0.45, 0.3], [0.0; 3]);
        b.mirrored_capsule("quads", [0.35, 0.3, 0.15], 0.24, 1.2);
        b.mirrored_capsule("hamstrings", [0.35, 0.3, -0.15], 0.22, 1.2);
        b.mirrored_capsule("calves", [0.4, -1.0, -0.1], 0.17, 1.0);

        b.finish()
    }
}

#[derive(Default)]
struct Builder {
    primitives: Vec<Primitive>,
}

impl Builder {
    fn push(&mut self, id: &'static str, shape: Shape, position: [f32; 3], rotation: [f32; 3]) {
        self.primitives.push(Primitive {
            region: RegionId::new(id),
            shape,
            position,
            rotation,
        });
    }

    fn capsule(&mut self, id: &'static str, position: [f32; 3], radius: f32, length: f32) {
        self.push(id, Shape::Capsule { radius, length }, position, [0.0; 3]);
    }

    fn boxed(&mut self, id: &'static str, position: [f32; 3], size: [f32; 3], rotation: [f32; 3]) {
        let [width, height, depth] = size;
        self.push(
            id,
            Shape::Box {
                width,
                height,
                depth,
            },
            position,
            rotation,
        );
    }

    /// Right-side position and z-roll; the left side is mirrored across x = 0
    fn mirrored_box(&mut self, id: &'static str, right: [f32; 3], size: [f32; 3], roll: f32) {
        let [x, y, z] = right;
        self.boxed(id, [-x, y, z], size, [0.0, 0.0, -roll]);
        self.boxed(id, [x, y, z], size, [0.0, 0.0, roll]);
    }

    fn mirrored_sphere(&mut self, id: &'static str, right: [f32; 3], radius: f32) {
        let [x, y, z] = right;
        for pos in [[-x, y, z], [x, y, z]] {
            self.push(id, Shape::Sphere { radius }, pos, [0.0; 3]);
        }
    }

    fn mirrored_capsule(&mut self, id: &'static str, right: [f32; 3], radius: f32, length: f32) {
        let [x, y, z] = right;
        self.capsule(id, [-x, y, z], radius, length);
        self.capsule(id, [x, y, z], radius, length);
    }

    fn finish(self) -> BodyLayout {
        BodyLayout::new(self.primitives)
    }
}
