/*!
Collision root module.

This module re-exports submodules that implement the static collision world
queried by the motion solver, using parry (through rapier3d) for narrow-phase
contacts and a BVH broad phase for static world acceleration. The code is split
for clarity:

- types:        shared data types (Transform, Shape, Volume, Capsule, Contact)
- settings:     tolerance constants
- broad:        broad-phase helpers (capsule AABBs, candidate queries)
- narrow_phase: thin wrappers over parry contact queries
- world:        the immutable collision world and its deepest-contact query
*/

pub mod broad;
pub mod narrow_phase;
pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types and functions.
pub use types::{Capsule, Contact, Iso, Quat, Shape, Transform, Vec3, Volume, VolumeTag};
pub use world::CollisionWorld;

/// Convenience: build a `Shape::Cuboid` with given half extents and pose.
#[inline]
pub fn cuboid_from_pose(half_extents: Vec3, translation: Vec3, rotation: Quat) -> Shape {
    Shape::Cuboid {
        half_extents,
        transform: Transform {
            translation,
            rotation,
        },
    }
}

/// Convenience: build an axis-aligned `Shape::Cuboid` from its full size and centre.
#[inline]
pub fn box_shape(size: Vec3, center: Vec3) -> Shape {
    cuboid_from_pose(size * 0.5, center, Quat::identity())
}
