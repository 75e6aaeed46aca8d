use nalgebra::{Vector2, Vector3};

use crate::collision::settings::DIST_EPS;

/// Minimum planar length for a direction to be meaningful.
pub const YAW_EPS: f32 = 1.0e-6;

/// Camera yaw that faces along the planar direction `xz` (`x`, `z` components).
///
/// Convention: yaw 0 looks down -Z, positive yaw turns toward -X.
pub fn yaw_from_xz(xz: Vector2<f32>) -> Option<f32> {
    if xz.norm_squared() > YAW_EPS {
        return Some((-xz[0]).atan2(-xz[1]));
    }

    None
}

/// World-space view direction for a camera with `yaw` and `pitch` (radians).
pub fn view_direction(yaw: f32, pitch: f32) -> Vector3<f32> {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vector3::new(-sy * cp, sp, -cy * cp)
}

/// Horizontal projection of `dir`, re-normalized.
///
/// Falls back to looking along -Z when `dir` is (nearly) vertical.
pub fn horizontal_forward(dir: Vector3<f32>) -> Vector3<f32> {
    let flat = Vector3::new(dir.x, 0.0, dir.z);
    let len = flat.norm();
    if len <= DIST_EPS {
        return Vector3::new(0.0, 0.0, -1.0);
    }
    flat / len
}

/// Strafe direction (to the right of `forward`): `forward × up`, re-normalized.
pub fn side_from_forward(forward: Vector3<f32>) -> Vector3<f32> {
    let side = forward.cross(&Vector3::y());
    let len = side.norm();
    if len <= DIST_EPS {
        return Vector3::new(1.0, 0.0, 0.0);
    }
    side / len
}

/// Planar (XZ) part of a world position.
#[inline]
pub fn to_planar(v: &Vector3<f32>) -> Vector2<f32> {
    Vector2::new(v.x, v.z)
}

/// Planar (XZ) distance squared between two world positions.
pub fn planar_distance_sq(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    let x = b.x - a.x;
    let z = b.y - a.y;
    x * x + z * z
}
