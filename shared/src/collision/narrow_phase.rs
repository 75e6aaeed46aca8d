use nalgebra as na;
use rapier3d::parry::{query, shape as pshape};

use super::{
    settings::CONTACT_PREDICTION,
    types::{Capsule, Iso, Shape, Vec3},
};

/// Build the parry capsule for a world-space player capsule.
///
/// The segment is expressed directly in world space, so queries use an identity pose.
#[inline]
pub fn parry_capsule(capsule: &Capsule) -> pshape::Capsule {
    pshape::Capsule::new(
        na::Point3::from(capsule.start),
        na::Point3::from(capsule.end),
        capsule.radius,
    )
}

/// Contact between a world-space capsule and a single static shape, if they touch.
///
/// - `capsule`: the parry capsule built by [`parry_capsule`] (identity pose).
/// - `shape`: the static shape to test against.
///
/// Returns the push-out normal (pointing from the shape toward the capsule) and the
/// penetration depth along it.
pub fn contact_capsule_against_static(
    capsule: &pshape::Capsule,
    shape: &Shape,
) -> Option<(Vec3, f32)> {
    let capsule_iso = Iso::identity();

    let result = match *shape {
        Shape::Plane { normal, dist } => {
            // Plane: represent as a parry HalfSpace with world normal, positioned at normal * dist.
            // Plane equation in world space: normal ⋅ x = dist
            let unit_n = na::Unit::new_normalize(normal);
            let plane = pshape::HalfSpace::new(unit_n);
            let p = unit_n.into_inner() * dist;
            let plane_iso = Iso::translation(p.x, p.y, p.z);

            query::contact(
                &capsule_iso,
                capsule as &dyn pshape::Shape,
                &plane_iso,
                &plane as &dyn pshape::Shape,
                CONTACT_PREDICTION,
            )
        }
        Shape::Cuboid {
            half_extents,
            transform,
        } => {
            let cuboid = pshape::Cuboid::new(half_extents);
            let box_iso = transform.iso();

            query::contact(
                &capsule_iso,
                capsule as &dyn pshape::Shape,
                &box_iso,
                &cuboid as &dyn pshape::Shape,
                CONTACT_PREDICTION,
            )
        }
    };

    let contact = result.ok().flatten()?;

    // normal1 is the outward normal of the capsule, pointing into the static shape.
    // The push-out direction is its opposite.
    let n1 = contact.normal1.into_inner();
    let normal = Vec3::new(-n1.x, -n1.y, -n1.z);
    let depth = (-contact.dist).max(0.0);

    Some((normal, depth))
}
