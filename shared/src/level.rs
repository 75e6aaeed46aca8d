//! Level assembly: maze grid to static collision volumes, plus the raft.
//!
//! Volume order in the world is ground slab, wall boxes in grid order (X fastest), then
//! the raft. Contacts of equal depth resolve to the lowest index, so a capsule touching
//! both the floor and a wall at rest is classified as standing.

use nalgebra::Vector3;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    cell::{Cell, cell_center_world, world_to_cell},
    collision::{CollisionWorld, Quat, Vec3, Volume, VolumeTag, box_shape, cuboid_from_pose},
    constants::{
        GROUND_THICKNESS, MAZE_LENGTH, MAZE_WIDTH, RAFT_GAP, RAFT_SIZE, RAFT_YAW, SEA_LEVEL,
        WALL_HEIGHT,
    },
    maze::{CarveStats, Grid, MazeError, MazeLayout, generate_with_rng},
    waves::{Raft, WaveSet},
};

/// Everything needed to build a level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSettings {
    pub width: u32,
    pub length: u32,
    pub wall_height: f32,
    /// Fixed seed for the maze; `None` draws from the thread RNG.
    pub seed: Option<u64>,
    pub sea_level: f32,
    pub raft_size: Vec3,
    pub raft_yaw: f32,
    /// Raft rest position, y included; defaults to sea level just past the gate-side edge.
    pub raft_position: Option<Vec3>,
    pub waves: WaveSet,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            width: MAZE_WIDTH,
            length: MAZE_LENGTH,
            wall_height: WALL_HEIGHT,
            seed: None,
            sea_level: SEA_LEVEL,
            raft_size: Vec3::from(RAFT_SIZE),
            raft_yaw: RAFT_YAW,
            raft_position: None,
            waves: WaveSet::default(),
        }
    }
}

impl LevelSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.wall_height.is_finite() && self.wall_height > 0.0) {
            return Err("wall_height must be positive");
        }
        if !self.sea_level.is_finite() {
            return Err("sea_level must be finite");
        }
        if self.raft_size.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err("raft_size must be positive");
        }
        self.waves.validate()
    }

    /// Maze entrance and gate for these dimensions.
    #[inline]
    pub fn layout(&self) -> MazeLayout {
        MazeLayout::centered(self.width, self.length)
    }

    /// Where the raft floats at rest.
    pub fn raft_position(&self) -> Vec3 {
        self.raft_position.unwrap_or_else(|| {
            Vec3::new(
                0.2,
                self.sea_level,
                -(self.length as f32) * 0.5 - RAFT_GAP,
            )
        })
    }

    #[inline]
    pub fn raft_rotation(&self) -> Quat {
        Quat::from_axis_angle(&Vector3::y_axis(), self.raft_yaw)
    }
}

/// A generated level: the maze, its collision worlds and the raft.
pub struct Level {
    settings: LevelSettings,
    layout: MazeLayout,
    grid: Grid,
    stats: CarveStats,
    world: CollisionWorld,
    goal: CollisionWorld,
    raft: Raft,
}

impl Level {
    /// Build a level with `rng` driving the maze carver. `settings.seed` is ignored.
    pub fn build<R: Rng + ?Sized>(settings: &LevelSettings, rng: &mut R) -> Result<Self, MazeError> {
        settings.validate().map_err(MazeError::InvalidSettings)?;
        let layout = settings.layout();
        let (grid, stats) = generate_with_rng(&layout, rng)?;

        let raft_volume = raft_volume(settings);
        let mut volumes = Vec::with_capacity(grid.wall_count() + 2);
        volumes.push(ground_volume(grid.width(), grid.length()));
        volumes.extend(wall_volumes(&grid, settings.wall_height));
        volumes.push(raft_volume);

        let world = CollisionWorld::build(volumes);
        let goal = CollisionWorld::build(vec![raft_volume]);
        let raft = Raft::new(
            settings.waves.clone(),
            settings.raft_position(),
            settings.raft_rotation(),
        );

        log::info!(
            "level built: {}x{} maze, {} walls, {} volumes",
            grid.width(),
            grid.length(),
            grid.wall_count(),
            world.len()
        );

        Ok(Self {
            settings: settings.clone(),
            layout,
            grid,
            stats,
            world,
            goal,
            raft,
        })
    }

    /// Build a level from `settings.seed`, or from the thread RNG when unset.
    pub fn generate(settings: &LevelSettings) -> Result<Self, MazeError> {
        match settings.seed {
            Some(seed) => Self::build(settings, &mut StdRng::seed_from_u64(seed)),
            None => Self::build(settings, &mut rand::thread_rng()),
        }
    }

    #[inline]
    pub fn settings(&self) -> &LevelSettings {
        &self.settings
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn carve_stats(&self) -> CarveStats {
        self.stats
    }

    #[inline]
    pub fn entrance(&self) -> Cell {
        self.layout.entrance
    }

    #[inline]
    pub fn gate(&self) -> Cell {
        self.layout.gate
    }

    /// Every static volume: ground, walls, raft.
    #[inline]
    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Only the raft, for the escape check.
    #[inline]
    pub fn goal(&self) -> &CollisionWorld {
        &self.goal
    }

    #[inline]
    pub fn raft(&self) -> &Raft {
        &self.raft
    }

    #[inline]
    pub fn raft_mut(&mut self) -> &mut Raft {
        &mut self.raft
    }

    /// Cell under the world-space point `(x, z)`.
    #[inline]
    pub fn cell_at(&self, x: f32, z: f32) -> Option<Cell> {
        world_to_cell(x, z, self.grid.width(), self.grid.length())
    }

    /// World-space `(x, z)` of a cell centre.
    #[inline]
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        cell_center_world(cell, self.grid.width(), self.grid.length())
    }

    /// Open-cell route from the cell under `(x, z)` to the gate.
    pub fn route_to_gate(&self, x: f32, z: f32) -> Option<Vec<Cell>> {
        let from = self.cell_at(x, z)?;
        self.grid.shortest_path(from, self.layout.gate)
    }
}

/// Ground slab covering the maze footprint, top face at y = 0.
pub fn ground_volume(width: u32, length: u32) -> Volume {
    Volume::new(
        VolumeTag::Ground,
        box_shape(
            Vec3::new(width as f32, GROUND_THICKNESS, length as f32),
            Vec3::new(0.0, -GROUND_THICKNESS * 0.5, 0.0),
        ),
    )
}

/// One unit-footprint box per wall cell, standing on y = 0.
pub fn wall_volumes(grid: &Grid, wall_height: f32) -> impl Iterator<Item = Volume> + '_ {
    let (width, length) = (grid.width(), grid.length());
    grid.wall_cells().map(move |cell| {
        let (x, z) = cell_center_world(cell, width, length);
        Volume::new(
            VolumeTag::Wall,
            box_shape(
                Vec3::new(1.0, wall_height, 1.0),
                Vec3::new(x, wall_height * 0.5, z),
            ),
        )
    })
}

/// The raft box at its rest pose.
pub fn raft_volume(settings: &LevelSettings) -> Volume {
    Volume::new(
        VolumeTag::Raft,
        cuboid_from_pose(
            settings.raft_size * 0.5,
            settings.raft_position(),
            settings.raft_rotation(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Capsule, Shape};

    fn seeded(seed: u64) -> LevelSettings {
        LevelSettings {
            seed: Some(seed),
            ..LevelSettings::default()
        }
    }

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(LevelSettings::default().validate(), Ok(()));
        let flat = LevelSettings {
            wall_height: 0.0,
            ..LevelSettings::default()
        };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn volumes_follow_the_grid() {
        let level = Level::generate(&seeded(7)).unwrap();
        let grid = level.grid();
        // Ground + walls + raft.
        assert_eq!(level.world().len(), grid.wall_count() + 2);
        assert_eq!(level.goal().len(), 1);

        let volumes = level.world().volumes();
        assert_eq!(volumes[0].tag, VolumeTag::Ground);
        assert_eq!(volumes[volumes.len() - 1].tag, VolumeTag::Raft);
        assert!(volumes[1..volumes.len() - 1].iter().all(|v| v.tag == VolumeTag::Wall));

        // First wall is the (0, 0) corner, shifted by half a cell.
        match volumes[1].shape {
            Shape::Cuboid { transform, .. } => {
                assert!((transform.translation - Vec3::new(-11.0, 0.5, -11.0)).norm() < 1.0e-6);
            }
            Shape::Plane { .. } => panic!("walls are boxes"),
        }
    }

    #[test]
    fn same_seed_same_level() {
        let a = Level::generate(&seeded(99)).unwrap();
        let b = Level::generate(&seeded(99)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.world().volumes(), b.world().volumes());
    }

    #[test]
    fn spawn_cell_is_open_and_reaches_the_gate() {
        let level = Level::generate(&seeded(3)).unwrap();
        let spawn = level.cell_at(0.0, 0.0).unwrap();
        assert_eq!(spawn, Cell::new(11, 11));
        assert!(level.grid().is_open(spawn));

        let route = level.route_to_gate(0.0, 0.0).unwrap();
        assert_eq!(route.first(), Some(&spawn));
        assert_eq!(route.last(), Some(&level.gate()));
    }

    #[test]
    fn raft_floats_past_the_gate() {
        let level = Level::generate(&seeded(1)).unwrap();
        let raft = level.raft();
        assert!((raft.position() - Vec3::new(0.2, SEA_LEVEL, -12.5)).norm() < 1.0e-6);

        // A capsule standing on the raft touches the goal world.
        let top = SEA_LEVEL + RAFT_SIZE[1] * 0.5;
        let on_raft = Capsule::new(
            Vec3::new(0.2, top + 0.29, -12.5),
            Vec3::new(0.2, top + 0.79, -12.5),
            0.3,
        );
        assert!(level.goal().intersects(&on_raft));

        // The gate cell sits on the ground, away from the raft.
        let (gx, gz) = level.cell_center(level.gate());
        let at_gate = Capsule::new(Vec3::new(gx, 0.3, gz), Vec3::new(gx, 0.8, gz), 0.3);
        assert!(!level.goal().intersects(&at_gate));
    }

    #[test]
    fn invalid_settings_are_rejected_before_building() {
        let negative_raft = LevelSettings {
            raft_size: Vec3::new(-1.0, 0.1, 1.0),
            ..seeded(3)
        };
        assert_eq!(
            Level::generate(&negative_raft).err(),
            Some(MazeError::InvalidSettings("raft_size must be positive"))
        );

        let sunk_walls = LevelSettings {
            wall_height: -2.0,
            ..seeded(3)
        };
        assert!(matches!(
            Level::build(&sunk_walls, &mut StdRng::seed_from_u64(3)),
            Err(MazeError::InvalidSettings(_))
        ));
    }

    #[test]
    fn explicit_raft_height_is_kept() {
        let settings = LevelSettings {
            raft_position: Some(Vec3::new(4.0, 0.5, -14.0)),
            waves: WaveSet::calm(),
            ..seeded(3)
        };
        let mut level = Level::generate(&settings).unwrap();
        assert_eq!(level.raft().position(), Vec3::new(4.0, 0.5, -14.0));
        level.raft_mut().update(1.0);
        assert_eq!(level.raft().height(), 0.5);
    }

    #[test]
    fn too_small_maze_is_rejected() {
        let settings = LevelSettings {
            width: 2,
            length: 2,
            ..LevelSettings::default()
        };
        assert!(matches!(
            Level::generate(&settings),
            Err(MazeError::TooSmall { .. })
        ));
    }
}
