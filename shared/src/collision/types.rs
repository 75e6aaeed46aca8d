/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- broad (static world acceleration structure and candidate queries)
- narrow_phase (parry contact queries)
- world (the immutable collision world and its capsule query)
- the motion solver, which owns the player capsule
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// A rigid transform (isometry) in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    /// Convert to nalgebra `Isometry3` for use with parry queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.translation.x, self.translation.y, self.translation.z),
            self.rotation,
        )
    }
}

/// Static collision shapes supported by the world.
///
/// - Plane: infinite plane in world-space represented by its normal and offset (dist)
///          satisfying: normal ⋅ x = dist. Everything below the plane is solid.
/// - Cuboid: box with half-extents in local space, placed by `transform`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Plane {
        /// World-space unit normal of the plane.
        normal: Vec3,
        /// Plane offset along the normal, i.e., normal ⋅ x = dist.
        dist: f32,
    },
    Cuboid {
        /// Local-space half-extents (hx, hy, hz).
        half_extents: Vec3,
        /// World-space pose of the cuboid.
        transform: Transform,
    },
}

/// What a static volume stands for in the level.
///
/// The solver only cares about the tag through the separate goal world; the tag rides
/// along on contacts for hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VolumeTag {
    Wall,
    Ground,
    Raft,
    Other,
}

/// A tagged static shape submitted at level-build time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Volume {
    pub tag: VolumeTag,
    pub shape: Shape,
}

impl Volume {
    #[inline]
    pub fn new(tag: VolumeTag, shape: Shape) -> Self {
        Self { tag, shape }
    }
}

/// The player collision volume: a segment swept by a sphere.
///
/// `start` is the bottom of the segment (feet sphere centre), `end` the top (eye).
/// The capsule is only ever translated, never rotated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    #[inline]
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec3) {
        self.start += delta;
        self.end += delta;
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Lowest point of the capsule surface.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.start.y.min(self.end.y) - self.radius
    }
}

/// A single capsule-vs-volume overlap.
///
/// Produced per query and consumed immediately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// World-space unit normal pointing out of the volume, i.e. the push-out direction
    /// for the capsule.
    pub normal: Vec3,
    /// Penetration depth along `normal` (>= 0 for touching or overlapping shapes).
    pub depth: f32,
    /// Index of the volume in the world it was found in.
    pub volume: usize,
    /// Tag of that volume.
    pub tag: VolumeTag,
}
