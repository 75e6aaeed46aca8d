pub mod cell;
pub mod collision;
pub mod constants;
pub mod level;
pub mod maze;
pub mod motion;
pub mod movement;
pub mod simulation;
pub mod utils;
pub mod waves;

pub use cell::{Cell, Direction, cell_center_world, world_to_cell};
pub use collision::{Capsule, CollisionWorld, Contact, Shape, Volume, VolumeTag};
pub use constants::{
    GRAVITY, MAX_FRAME_DT_S, OUT_OF_BOUNDS_Y, PLAYER_RADIUS, SPAWN_END, SPAWN_START,
    STEPS_PER_FRAME,
};
pub use level::{Level, LevelSettings};
pub use maze::{CarveStats, Grid, MazeError, MazeLayout, generate, generate_with_rng};
pub use motion::{Look, PlayerInput};
pub use movement::{MotionEvent, MotionSolver, SolverSettings};
pub use simulation::{FrameReport, Simulation};
pub use utils::{planar_distance_sq, to_planar, yaw_from_xz};
pub use waves::{Raft, Wave, WaveSet};
