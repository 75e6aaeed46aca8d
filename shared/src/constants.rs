/// Downward acceleration applied while airborne (units per second squared).
pub const GRAVITY: f32 = 30.0;

/// Number of equal substeps each frame is divided into.
///
/// Collisions are resolved once per substep so a fast fall cannot carry the capsule
/// through a one-unit wall in a single integration step.
pub const STEPS_PER_FRAME: u32 = 5;

/// Upper bound on the elapsed time consumed by one frame (seconds).
///
/// Frames that took longer (tab in background, debugger pause) are simulated as if only
/// this much time had passed, so there is never a catch-up spiral.
pub const MAX_FRAME_DT_S: f32 = 0.05;

/// Control acceleration factor while standing on a floor.
pub const GROUND_ACCELERATION: f32 = 10.0;

/// Control acceleration factor while airborne.
///
/// Convention:
/// - equal to [`GROUND_ACCELERATION`] = full control in air
/// - 0.0 = no air control
pub const AIR_ACCELERATION: f32 = 2.0;

/// Vertical speed set on jump (units per second).
pub const JUMP_SPEED: f32 = 9.0;

/// Exponential decay rate used by the damping model (per second).
pub const DAMPING_RATE: f32 = 4.0;

/// Damping multiplier while airborne (small air resistance).
pub const AIR_DAMPING_SCALE: f32 = 0.1;

/// Camera height below which the player is teleported back to spawn.
pub const OUT_OF_BOUNDS_Y: f32 = -25.0;

/// Spawn capsule: segment start, segment end and radius.
pub const SPAWN_START: [f32; 3] = [0.0, 25.0, 0.0];
pub const SPAWN_END: [f32; 3] = [0.0, 25.5, 0.0];
pub const PLAYER_RADIUS: f32 = 0.3;

/// Eye height above the raft surface while standing on it.
pub const RAFT_EYE_OFFSET: f32 = 0.9;

/// Default maze size in cells.
pub const MAZE_WIDTH: u32 = 23;
pub const MAZE_LENGTH: u32 = 23;

/// Smallest maze side the carver accepts.
pub const MIN_MAZE_SIDE: u32 = 3;

/// Height of a wall box. Footprint is always one cell.
pub const WALL_HEIGHT: f32 = 1.0;

/// Thickness of the ground slab under the maze (its top sits at y = 0).
pub const GROUND_THICKNESS: f32 = 1.0;

/// Resting height of the sea surface.
pub const SEA_LEVEL: f32 = -0.2;

/// Distance beyond the gate-side maze edge at which the raft floats.
pub const RAFT_GAP: f32 = 1.0;

/// Raft box size (x, y, z) and yaw (radians).
pub const RAFT_SIZE: [f32; 3] = [1.8, 0.1, 0.9];
pub const RAFT_YAW: f32 = 1.4;

/// Max angular speed of the raft tilt following the waves (radians per second).
pub const RAFT_TILT_RATE: f32 = 0.5;

/// While the eye is above this height the camera is turned toward the raft.
pub const LOOK_AT_RAFT_ABOVE_Y: f32 = 3.5;
