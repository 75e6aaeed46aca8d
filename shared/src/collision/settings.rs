/*!
Collision tolerances.

These constants centralize the parameters used by the broad phase, the contact
queries and penetration resolution. Keeping them together makes tuning easier.

Notes
- Distances are in world units (one maze cell per unit), time in seconds.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

/// Practical small distance for comparisons.
/// Use for dot-product guards, equality checks in world space, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Residual penetration accepted after resolution.
pub const PENETRATION_EPS: f32 = 1.0e-3;

/// Contact prediction distance passed to parry (contact skin).
///
/// Shapes closer than this report a zero-depth contact, so a capsule pushed out onto a
/// floor keeps seeing that floor on the next substep instead of flickering airborne.
pub const CONTACT_PREDICTION: f32 = 1.0e-3;

/// Margin added around the capsule AABB before querying the broad phase.
pub const BROAD_PHASE_MARGIN: f32 = 0.01;

/// Default number of query/push-out passes per substep.
///
/// One pass resolves the deepest contact; more passes clear corners where a wall and
/// the floor overlap the capsule at the same time.
pub const DEFAULT_RESOLVE_ITERATIONS: u32 = 4;

/// A contact counts as floor when its normal's Y component is above this.
pub const FLOOR_NORMAL_MIN_Y: f32 = 0.0;
