use nalgebra::Vector3;

use crate::utils::{horizontal_forward, side_from_forward, view_direction, yaw_from_xz};

/// Snapshot of held controls, polled once per substep.
///
/// The mouse buttons double as forward (primary) and backward (secondary).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub primary_button: bool,
    pub secondary_button: bool,
}

impl PlayerInput {
    /// No control held.
    #[inline]
    pub fn idle() -> Self {
        Self::default()
    }

    #[inline]
    pub fn wants_forward(&self) -> bool {
        self.forward || self.primary_button
    }

    #[inline]
    pub fn wants_backward(&self) -> bool {
        self.backward || self.secondary_button
    }

    /// True if any movement or jump control is held.
    pub fn is_active(&self) -> bool {
        self.wants_forward() || self.wants_backward() || self.left || self.right || self.jump
    }
}

/// Camera orientation in radians.
///
/// Yaw 0 looks down -Z; positive yaw turns left (toward -X). Positive pitch looks up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Look {
    pub yaw: f32,
    pub pitch: f32,
}

impl Look {
    #[inline]
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Full view direction, including pitch.
    #[inline]
    pub fn direction(&self) -> Vector3<f32> {
        view_direction(self.yaw, self.pitch)
    }

    /// Horizontal-projected, unit forward vector.
    #[inline]
    pub fn forward(&self) -> Vector3<f32> {
        horizontal_forward(self.direction())
    }

    /// Unit strafe vector (to the right of [`Look::forward`]).
    #[inline]
    pub fn side(&self) -> Vector3<f32> {
        side_from_forward(self.forward())
    }

    /// Orientation looking from `from` at `to`.
    ///
    /// Keeps `fallback_yaw` when the two points are vertically aligned.
    pub fn toward(from: Vector3<f32>, to: Vector3<f32>, fallback_yaw: f32) -> Self {
        let delta = to - from;
        let planar = nalgebra::Vector2::new(delta.x, delta.z);
        let yaw = yaw_from_xz(planar).unwrap_or(fallback_yaw);
        let pitch = delta.y.atan2(planar.norm());
        Self { yaw, pitch }
    }
}

/// Velocity change produced by the held directional controls over one substep.
///
/// `speed_delta` is `dt * acceleration`, with the acceleration picked by the caller from
/// the floor state. Opposite controls cancel.
pub fn control_impulse(input: &PlayerInput, look: Look, speed_delta: f32) -> Vector3<f32> {
    let forward = look.forward();
    let side = look.side();

    let mut impulse = Vector3::zeros();
    if input.wants_forward() {
        impulse += forward * speed_delta;
    }
    if input.wants_backward() {
        impulse -= forward * speed_delta;
    }
    if input.left {
        impulse -= side * speed_delta;
    }
    if input.right {
        impulse += side * speed_delta;
    }
    impulse
}

/// Edge-triggered jump.
///
/// Releasing the jump control clears the latch; a jump fires only while standing on a
/// floor, with the control held and the latch clear. Returns true when a jump fired.
pub fn try_jump(
    input: &PlayerInput,
    on_floor: bool,
    jumping: &mut bool,
    velocity: &mut Vector3<f32>,
    jump_speed: f32,
) -> bool {
    if !input.jump {
        *jumping = false;
        return false;
    }

    if on_floor && !*jumping {
        velocity.y = jump_speed;
        *jumping = true;
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).norm() < 1.0e-5
    }

    #[test]
    fn forward_and_backward_cancel() {
        let input = PlayerInput {
            forward: true,
            backward: true,
            ..PlayerInput::idle()
        };
        assert!(close(control_impulse(&input, Look::default(), 0.1), Vector3::zeros()));
    }

    #[test]
    fn mouse_buttons_substitute_for_forward_and_back() {
        let look = Look::default();
        let primary = PlayerInput {
            primary_button: true,
            ..PlayerInput::idle()
        };
        let secondary = PlayerInput {
            secondary_button: true,
            ..PlayerInput::idle()
        };
        assert!(close(control_impulse(&primary, look, 1.0), Vector3::new(0.0, 0.0, -1.0)));
        assert!(close(control_impulse(&secondary, look, 1.0), Vector3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn strafe_follows_yaw_and_ignores_pitch() {
        let input = PlayerInput {
            right: true,
            ..PlayerInput::idle()
        };
        let look = Look::new(FRAC_PI_2, -1.0);
        // Facing -X: right is -Z.
        assert!(close(control_impulse(&input, look, 2.0), Vector3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn jump_is_edge_triggered() {
        let mut jumping = false;
        let mut v = Vector3::zeros();
        let held = PlayerInput {
            jump: true,
            ..PlayerInput::idle()
        };

        assert!(!try_jump(&held, false, &mut jumping, &mut v, 9.0));
        assert!(try_jump(&held, true, &mut jumping, &mut v, 9.0));
        assert_eq!(v.y, 9.0);

        // Still held after landing again: no second jump.
        v.y = 0.0;
        assert!(!try_jump(&held, true, &mut jumping, &mut v, 9.0));
        assert_eq!(v.y, 0.0);

        // Release, then press again.
        assert!(!try_jump(&PlayerInput::idle(), true, &mut jumping, &mut v, 9.0));
        assert!(!jumping);
        assert!(try_jump(&held, true, &mut jumping, &mut v, 9.0));
    }

    #[test]
    fn look_toward_points_at_target() {
        let from = Vector3::new(0.0, 10.0, 0.0);
        let to = Vector3::new(-5.0, 0.0, 0.0);
        let look = Look::toward(from, to, 0.0);
        assert!(close(look.forward(), Vector3::new(-1.0, 0.0, 0.0)));
        assert!(look.pitch < 0.0);

        let dir = look.direction();
        let expected = (to - from).normalize();
        assert!(close(dir, expected));
    }

    #[test]
    fn look_toward_straight_down_keeps_yaw() {
        let look = Look::toward(Vector3::new(1.0, 5.0, 1.0), Vector3::new(1.0, 0.0, 1.0), 0.3);
        assert_eq!(look.yaw, 0.3);
    }
}
