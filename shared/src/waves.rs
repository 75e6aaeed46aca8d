use std::f32::consts::{PI, TAU};

use nalgebra::{UnitQuaternion, Vector2, Vector3};

use crate::{
    collision::{Quat, Vec3},
    constants::RAFT_TILT_RATE,
};

/// Gravitational acceleration used by the wave dispersion relation.
const WAVE_GRAVITY: f32 = 9.8;

/// One Gerstner wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    /// Travel direction in degrees (0 travels toward -Z).
    pub direction_deg: f32,
    pub steepness: f32,
    pub wavelength: f32,
}

impl Wave {
    pub const fn new(direction_deg: f32, steepness: f32, wavelength: f32) -> Self {
        Self {
            direction_deg,
            steepness,
            wavelength,
        }
    }

    #[inline]
    fn direction(&self) -> Vector2<f32> {
        let (s, c) = (self.direction_deg * PI / 180.0).sin_cos();
        Vector2::new(s, -c)
    }

    #[inline]
    fn wavenumber(&self) -> f32 {
        TAU / self.wavelength
    }
}

/// Surface displacement and orientation at one point and time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveSample {
    /// Displacement of the surface point from its rest position.
    pub offset: Vec3,
    /// Unit surface normal.
    pub normal: Vec3,
}

/// Sum of Gerstner waves describing the sea surface.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveSet {
    pub waves: Vec<Wave>,
}

impl Default for WaveSet {
    fn default() -> Self {
        Self {
            waves: vec![
                Wave::new(0.0, 0.05, 3.0),
                Wave::new(30.0, 0.10, 6.0),
                Wave::new(60.0, 0.05, 1.5),
            ],
        }
    }
}

impl WaveSet {
    /// A flat sea.
    pub fn calm() -> Self {
        Self { waves: Vec::new() }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        for w in &self.waves {
            if !(w.wavelength.is_finite() && w.wavelength > 0.0) {
                return Err("wave wavelength must be positive");
            }
            if !(0.0..=1.0).contains(&w.steepness) {
                return Err("wave steepness must lie in [0, 1]");
            }
        }
        Ok(())
    }

    /// Surface displacement and normal at rest position `(x, z)` and time `t` (seconds).
    pub fn sample(&self, x: f32, z: f32, t: f32) -> WaveSample {
        let mut offset = Vec3::zeros();
        let mut tangent = Vec3::new(1.0, 0.0, 0.0);
        let mut binormal = Vec3::new(0.0, 0.0, 1.0);

        for w in &self.waves {
            let k = w.wavenumber();
            let c = (WAVE_GRAVITY / k).sqrt();
            let d = w.direction();
            let f = k * (d.dot(&Vector2::new(x, z)) - c * t);
            let a = w.steepness / k;
            let (sin_f, cos_f) = f.sin_cos();

            offset.x += d.y * (a * cos_f);
            offset.y += a * sin_f;
            offset.z += d.x * (a * cos_f);

            tangent.x -= d.x * d.x * (w.steepness * sin_f);
            tangent.y += d.x * (w.steepness * cos_f);
            tangent.z -= d.x * d.y * (w.steepness * sin_f);

            binormal.x -= d.x * d.y * (w.steepness * sin_f);
            binormal.y += d.y * (w.steepness * cos_f);
            binormal.z -= d.y * d.y * (w.steepness * sin_f);
        }

        let normal = binormal
            .cross(&tangent)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::y);

        WaveSample { offset, normal }
    }
}

/// Rotation the raft leans toward for a surface normal.
///
/// The normal components are read as X, Y, Z Euler angles applied in that order, which
/// gives the raft its characteristic bobbing rather than a strict surface alignment.
fn tilt_from_normal(normal: &Vec3) -> Quat {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), normal.x)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), normal.y)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), normal.z)
}

/// Rotate `from` toward `to` by at most `max_angle` radians.
pub fn rotate_towards(from: Quat, to: Quat, max_angle: f32) -> Quat {
    let angle = from.angle_to(&to);
    if angle <= max_angle.max(0.0) {
        return to;
    }
    let t = max_angle.max(0.0) / angle;
    from.try_slerp(&to, t, 1.0e-6).unwrap_or(to)
}

/// The floating raft: bobs on the wave set, leans toward the local surface normal.
#[derive(Clone, Debug)]
pub struct Raft {
    waves: WaveSet,
    /// Current position; x and z stay put, y follows the waves.
    position: Vec3,
    rotation: Quat,
    /// Height the raft bobs around.
    rest_height: f32,
    tilt_rate: f32,
    time: f32,
}

impl Raft {
    /// Raft resting at `position` with initial `rotation` over `waves`.
    ///
    /// `position.y` is the rest height the waves are added to.
    pub fn new(waves: WaveSet, position: Vec3, rotation: Quat) -> Self {
        Self {
            waves,
            position,
            rotation,
            rest_height: position.y,
            tilt_rate: RAFT_TILT_RATE,
            time: 0.0,
        }
    }

    /// Advance wave time by `dt` and follow the surface.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt;

        let sample = self
            .waves
            .sample(self.position.x, self.position.z, self.time);
        self.position.y = self.rest_height + sample.offset.y;

        let target = tilt_from_normal(&sample.normal);
        self.rotation = rotate_towards(self.rotation, target, dt * self.tilt_rate);
    }

    #[inline]
    pub fn rest_height(&self) -> f32 {
        self.rest_height
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Wave time in seconds.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn waves(&self) -> &WaveSet {
        &self.waves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEA_LEVEL;

    #[test]
    fn calm_sea_is_flat() {
        let s = WaveSet::calm().sample(3.0, -7.0, 12.5);
        assert_eq!(s.offset, Vec3::zeros());
        assert!((s.normal - Vec3::y()).norm() < 1.0e-6);
    }

    #[test]
    fn default_waves_stay_small_and_upright() {
        let waves = WaveSet::default();
        assert_eq!(waves.validate(), Ok(()));
        // Amplitude bound: sum of steepness / k.
        let bound: f32 = waves.waves.iter().map(|w| w.steepness * w.wavelength / TAU).sum();
        for i in 0..50 {
            let t = i as f32 * 0.37;
            let s = waves.sample(0.2, -12.5, t);
            assert!(s.offset.y.abs() <= bound + 1.0e-5);
            assert!((s.normal.norm() - 1.0).abs() < 1.0e-5);
            assert!(s.normal.y > 0.8);
        }
    }

    #[test]
    fn single_wave_crest_height() {
        let w = Wave::new(0.0, 0.1, 4.0);
        let waves = WaveSet { waves: vec![w] };
        let k = TAU / 4.0;
        let a = 0.1 / k;
        // Direction 0 is (0, -1): phase f = k * (-z - c t). At t = 0 and z = -1 (quarter
        // wavelength) f = pi / 2, the crest.
        let s = waves.sample(0.0, -1.0, 0.0);
        assert!((s.offset.y - a).abs() < 1.0e-5);
        assert!(s.offset.x.abs() < 1.0e-5);
    }

    #[test]
    fn invalid_waves_are_rejected() {
        let bad = WaveSet {
            waves: vec![Wave::new(0.0, 0.1, 0.0)],
        };
        assert!(bad.validate().is_err());
        let steep = WaveSet {
            waves: vec![Wave::new(0.0, 1.5, 3.0)],
        };
        assert!(steep.validate().is_err());
    }

    #[test]
    fn rotate_towards_is_rate_limited() {
        let from = Quat::identity();
        let to = Quat::from_axis_angle(&Vector3::y_axis(), 1.0);
        let step = rotate_towards(from, to, 0.25);
        assert!((step.angle_to(&from) - 0.25).abs() < 1.0e-4);
        assert_eq!(rotate_towards(from, to, 2.0), to);
    }

    #[test]
    fn raft_follows_the_surface() {
        let waves = WaveSet::default();
        let start = Quat::from_axis_angle(&Vector3::y_axis(), 1.4);
        let mut raft = Raft::new(waves.clone(), Vec3::new(0.2, SEA_LEVEL, -12.5), start);

        let dt = 1.0 / 60.0;
        for _ in 0..120 {
            let before = raft.rotation();
            raft.update(dt);
            let expected = SEA_LEVEL + waves.sample(0.2, -12.5, raft.time()).offset.y;
            assert!((raft.height() - expected).abs() < 1.0e-5);
            assert!(raft.rotation().angle_to(&before) <= dt * RAFT_TILT_RATE + 1.0e-4);
        }
        assert!((raft.time() - 2.0).abs() < 1.0e-3);
        assert_eq!(raft.position().x, 0.2);
    }

    #[test]
    fn raft_on_calm_sea_keeps_its_rest_height() {
        let mut raft = Raft::new(WaveSet::calm(), Vec3::new(0.0, -1.0, 0.0), Quat::identity());
        raft.update(0.5);
        assert_eq!(raft.rest_height(), -1.0);
        assert_eq!(raft.height(), -1.0);
    }
}
