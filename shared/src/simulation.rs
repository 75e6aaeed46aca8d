use crate::{
    collision::Vec3,
    constants::LOOK_AT_RAFT_ABOVE_Y,
    level::Level,
    motion::{Look, PlayerInput},
    movement::{MotionEvent, MotionSolver, SolverSettings},
};

/// What happened during one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Events in the order they were raised.
    pub events: Vec<MotionEvent>,
    /// Substeps run.
    pub substeps: u32,
    /// Frame time actually simulated, after clamping (seconds).
    pub simulated_dt: f32,
    /// Camera position at the end of the frame.
    pub eye: Vec3,
    /// Set while the camera should be turned toward the raft instead of following the
    /// player's look.
    pub look_override: Option<Look>,
}

impl FrameReport {
    #[inline]
    pub fn contains(&self, event: MotionEvent) -> bool {
        self.events.contains(&event)
    }
}

/// One running game: the level and the player solver.
pub struct Simulation {
    level: Level,
    solver: MotionSolver,
    frames: u64,
    time: f32,
}

impl Simulation {
    pub fn new(level: Level, settings: SolverSettings) -> Result<Self, &'static str> {
        settings.validate()?;
        Ok(Self {
            level,
            solver: MotionSolver::new(settings),
            frames: 0,
            time: 0.0,
        })
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn solver(&self) -> &MotionSolver {
        &self.solver
    }

    #[inline]
    pub fn solver_mut(&mut self) -> &mut MotionSolver {
        &mut self.solver
    }

    /// Frames run so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated time so far (seconds).
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Run one display frame that took `elapsed` seconds.
    ///
    /// The elapsed time is clamped, the raft follows the waves once, then the player runs
    /// the configured number of equal substeps with the same `input` and `look`.
    pub fn frame(&mut self, elapsed: f32, input: &PlayerInput, look: Look) -> FrameReport {
        let settings = *self.solver.settings();
        let frame_dt = settings.clamp_frame_dt(elapsed);
        let dt = frame_dt / settings.steps_per_frame as f32;

        self.level.raft_mut().update(frame_dt);
        let raft_height = self.level.raft().height();

        let mut events = Vec::new();
        for _ in 0..settings.steps_per_frame {
            self.solver.substep(
                dt,
                input,
                look,
                self.level.world(),
                self.level.goal(),
                raft_height,
                &mut events,
            );
        }

        self.frames += 1;
        self.time += frame_dt;

        for event in &events {
            log::debug!("frame {}: {:?}", self.frames, event);
        }

        FrameReport {
            events,
            substeps: settings.steps_per_frame,
            simulated_dt: frame_dt,
            eye: self.solver.eye(),
            look_override: self.look_override(look.yaw),
        }
    }

    /// Camera orientation toward the raft while the eye is high above the maze.
    pub fn look_override(&self, current_yaw: f32) -> Option<Look> {
        let eye = self.solver.eye();
        if eye.y <= LOOK_AT_RAFT_ABOVE_Y {
            return None;
        }
        Some(Look::toward(eye, self.level.raft().position(), current_yaw))
    }

    /// Send the player back to spawn without touching the level.
    pub fn respawn(&mut self) {
        self.solver.reset_to_spawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cell::Cell,
        collision::Capsule,
        level::LevelSettings,
        waves::WaveSet,
    };

    const FRAME: f32 = 1.0 / 60.0;

    fn simulation(seed: u64, waves: WaveSet) -> Simulation {
        let settings = LevelSettings {
            seed: Some(seed),
            waves,
            ..LevelSettings::default()
        };
        let level = Level::generate(&settings).unwrap();
        Simulation::new(level, SolverSettings::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_solver_settings() {
        let level = Level::generate(&LevelSettings {
            seed: Some(1),
            ..LevelSettings::default()
        })
        .unwrap();
        let settings = SolverSettings {
            steps_per_frame: 0,
            ..SolverSettings::default()
        };
        assert!(Simulation::new(level, settings).is_err());
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut sim = simulation(5, WaveSet::default());
        let report = sim.frame(2.0, &PlayerInput::idle(), Look::default());
        assert_eq!(report.substeps, 5);
        assert!((report.simulated_dt - 0.05).abs() < 1.0e-7);
        assert!((sim.time() - 0.05).abs() < 1.0e-7);
        assert!((sim.level().raft().time() - 0.05).abs() < 1.0e-7);
        assert_eq!(sim.frames(), 1);
    }

    #[test]
    fn player_falls_into_the_maze_and_lands_once() {
        let mut sim = simulation(11, WaveSet::default());
        let mut landed = 0;
        let mut looked_at_raft = false;
        for _ in 0..300 {
            let report = sim.frame(FRAME, &PlayerInput::idle(), Look::default());
            landed += report.events.iter().filter(|e| **e == MotionEvent::Landed).count();
            looked_at_raft |= report.look_override.is_some();
            assert!(!report.contains(MotionEvent::OutOfBounds));
            assert!(!report.contains(MotionEvent::Escaped));
        }
        assert_eq!(landed, 1);
        assert!(looked_at_raft);

        // The spawn column is an open corridor cell: the player stands on the ground.
        let solver = sim.solver();
        assert!(solver.on_floor());
        assert!((solver.capsule().bottom()).abs() < 2.0e-3);
        assert_eq!(sim.level().cell_at(solver.eye().x, solver.eye().z), Some(Cell::new(11, 11)));
        assert!(sim.look_override(0.0).is_none());
    }

    #[test]
    fn stepping_onto_the_raft_escapes() {
        let mut sim = simulation(2, WaveSet::calm());
        let raft = sim.level().raft().position();
        // Drop the player just above the raft.
        sim.solver_mut().place(
            Capsule::new(
                Vec3::new(raft.x, raft.y + 0.5, raft.z),
                Vec3::new(raft.x, raft.y + 1.0, raft.z),
                0.3,
            ),
            Vec3::zeros(),
        );

        let mut escapes = 0;
        for _ in 0..120 {
            let report = sim.frame(FRAME, &PlayerInput::idle(), Look::default());
            escapes += report.events.iter().filter(|e| **e == MotionEvent::Escaped).count();
        }
        assert_eq!(escapes, 1);
        assert!(sim.solver().escaped());
        assert!((sim.solver().eye().y - (raft.y + 0.9)).abs() < 1.0e-5);

        sim.respawn();
        assert!(!sim.solver().escaped());
    }

    #[test]
    fn walking_off_the_edge_falls_out_of_bounds() {
        let mut sim = simulation(4, WaveSet::calm());
        // Past the +X edge of the ground slab, nothing below.
        sim.solver_mut().place(
            Capsule::new(Vec3::new(20.0, 0.3, 0.0), Vec3::new(20.0, 0.8, 0.0), 0.3),
            Vec3::zeros(),
        );
        let mut reset_frame = None;
        for frame in 0..300 {
            let report = sim.frame(FRAME, &PlayerInput::idle(), Look::default());
            if report.contains(MotionEvent::OutOfBounds) {
                reset_frame = Some(frame);
                break;
            }
        }
        assert!(reset_frame.is_some());
        assert!(sim.solver().eye().y > 20.0);
        assert!(!sim.solver().escaped());
    }
}
