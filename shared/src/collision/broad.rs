use nalgebra as na;
use rapier3d::parry::{
    bounding_volume::Aabb,
    partitioning::{Bvh, BvhBuildStrategy},
    shape as pshape,
};

use super::types::{Capsule, Shape, Transform, Volume};

/// Acceleration structure for broad-phase queries over immutable world statics.
///
/// Notes:
/// - Finite shapes (cuboids) are stored as world-space AABBs in a BVH. Planes are handled
///   separately because they are infinite.
/// - `finite_indices` maps each BVH leaf back to its index in the original `volumes` slice.
/// - `plane_indices` stores indices of planes in the original `volumes` slice.
pub struct WorldAccel {
    /// BVH over finite static shapes (AABBs).
    pub bvh: Bvh,
    /// Indices into the original `volumes` slice for the BVH leaves.
    pub finite_indices: Vec<usize>,
    /// Indices into the original `volumes` slice for planes.
    pub plane_indices: Vec<usize>,
}

impl WorldAccel {
    /// Return true if this accelerator has no entries at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.finite_indices.is_empty() && self.plane_indices.is_empty()
    }

    /// Number of finite entries (AABBs) in this accelerator.
    #[inline]
    pub fn len(&self) -> usize {
        self.finite_indices.len()
    }
}

/// Build a broad-phase accelerator over immutable world statics.
///
/// - Cuboids get a world-space AABB and are indexed.
/// - Planes are kept in `plane_indices` and tested on every query.
pub fn build_world_accel(volumes: &[Volume]) -> WorldAccel {
    let mut aabbs: Vec<Aabb> = Vec::new();
    let mut finite_indices: Vec<usize> = Vec::new();
    let mut plane_indices: Vec<usize> = Vec::new();

    for (i, v) in volumes.iter().enumerate() {
        match v.shape {
            Shape::Plane { .. } => {
                plane_indices.push(i);
            }
            Shape::Cuboid {
                half_extents,
                transform,
            } => {
                aabbs.push(cuboid_aabb_world(half_extents, transform));
                finite_indices.push(i);
            }
        }
    }

    WorldAccel {
        bvh: Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs),
        finite_indices,
        plane_indices,
    }
}

/// Compute the AABB for a world-space cuboid.
fn cuboid_aabb_world(half_extents: na::Vector3<f32>, transform: Transform) -> Aabb {
    let cuboid = pshape::Cuboid::new(half_extents);
    cuboid.aabb(&transform.iso())
}

/// AABB of a capsule, inflated by `margin` on all sides.
pub fn capsule_aabb(capsule: &Capsule, margin: f32) -> Aabb {
    let r = capsule.radius + margin.max(0.0);
    let delta = na::Vector3::new(r, r, r);
    let mins = capsule.start.inf(&capsule.end) - delta;
    let maxs = capsule.start.sup(&capsule.end) + delta;
    Aabb::new(na::Point3::from(mins), na::Point3::from(maxs))
}

/// Query candidate volume indices whose AABB intersects `aabb`, planes excluded.
///
/// Returns indices referencing the original `volumes` slice, sorted ascending so query
/// results do not depend on BVH traversal order.
pub fn query_candidates(accel: &WorldAccel, aabb: &Aabb) -> Vec<usize> {
    let mut out: Vec<usize> = accel
        .bvh
        .intersect_aabb(aabb)
        .map(|leaf_idx| accel.finite_indices[leaf_idx as usize])
        .collect();
    out.sort_unstable();
    out
}
