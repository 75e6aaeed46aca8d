use labyrinth::{
    Look, PlayerInput, Simulation, planar_distance_sq, to_planar, yaw_from_xz,
};
use nalgebra::Vector2;

use crate::config::Mode;

/// Planar distance (squared) at which a waypoint counts as reached.
const WAYPOINT_ACCEPTANCE_SQ: f32 = 0.0225;

/// Length of one scripted cycle, in frames.
const SCRIPT_CYCLE_FRAMES: u64 = 120;

/// Produces the controls for each frame.
pub trait Pilot {
    /// Controls and camera orientation for the next frame.
    fn controls(&mut self, sim: &Simulation) -> (PlayerInput, Look);

    fn name(&self) -> &'static str;
}

pub fn pilot_for(mode: Mode, sim: &Simulation) -> Box<dyn Pilot> {
    match mode {
        Mode::Idle => Box::new(Idle),
        Mode::Autopilot => Box::new(Autopilot::plan(sim)),
        Mode::Script => Box::new(Script::default()),
    }
}

/// Holds nothing and looks straight ahead.
pub struct Idle;

impl Pilot for Idle {
    fn controls(&mut self, _sim: &Simulation) -> (PlayerInput, Look) {
        (PlayerInput::idle(), Look::default())
    }

    fn name(&self) -> &'static str {
        "idle"
    }
}

/// Walks the open-cell route from the spawn cell to the gate, then onto the raft.
pub struct Autopilot {
    waypoints: Vec<Vector2<f32>>,
    next: usize,
    yaw: f32,
}

impl Autopilot {
    /// Plan the route from the cell under the spawn point.
    ///
    /// When the spawn cell is a wall (even-sized mazes) the plan only holds the raft.
    pub fn plan(sim: &Simulation) -> Self {
        let level = sim.level();
        let spawn = sim.solver().settings().spawn.end;

        let mut waypoints: Vec<Vector2<f32>> = match level.route_to_gate(spawn.x, spawn.z) {
            Some(route) => route
                .into_iter()
                .map(|cell| {
                    let (x, z) = level.cell_center(cell);
                    Vector2::new(x, z)
                })
                .collect(),
            None => {
                tracing::warn!("no open route from the spawn cell to the gate");
                Vec::new()
            }
        };
        waypoints.push(to_planar(&level.raft().position()));

        tracing::debug!("autopilot planned {} waypoints", waypoints.len());

        Self {
            waypoints,
            next: 0,
            yaw: 0.0,
        }
    }

    /// Index of the waypoint being steered to.
    pub fn next_waypoint(&self) -> usize {
        self.next
    }

    pub fn waypoints(&self) -> &[Vector2<f32>] {
        &self.waypoints
    }
}

impl Pilot for Autopilot {
    fn controls(&mut self, sim: &Simulation) -> (PlayerInput, Look) {
        let solver = sim.solver();
        if solver.escaped() {
            return (PlayerInput::idle(), Look::new(self.yaw, 0.0));
        }
        // Still falling in from the spawn height.
        if !solver.on_floor() && solver.eye().y > 2.0 {
            return (PlayerInput::idle(), Look::new(self.yaw, 0.0));
        }

        let here = to_planar(&solver.eye());
        while self.next + 1 < self.waypoints.len()
            && planar_distance_sq(here, self.waypoints[self.next]) <= WAYPOINT_ACCEPTANCE_SQ
        {
            self.next += 1;
        }

        let Some(target) = self.waypoints.get(self.next) else {
            return (PlayerInput::idle(), Look::new(self.yaw, 0.0));
        };
        if let Some(yaw) = yaw_from_xz(target - here) {
            self.yaw = yaw;
        }

        let input = PlayerInput {
            forward: true,
            ..PlayerInput::idle()
        };
        (input, Look::new(self.yaw, 0.0))
    }

    fn name(&self) -> &'static str {
        "autopilot"
    }
}

/// Repeating walk, jump and strafe pattern with a slowly turning camera.
#[derive(Default)]
pub struct Script {
    frame: u64,
}

impl Script {
    fn input_at(frame: u64) -> PlayerInput {
        let phase = frame % SCRIPT_CYCLE_FRAMES;
        match phase {
            0..90 => PlayerInput {
                forward: true,
                ..PlayerInput::idle()
            },
            90..100 => PlayerInput {
                forward: true,
                jump: true,
                ..PlayerInput::idle()
            },
            _ => PlayerInput {
                right: true,
                secondary_button: true,
                ..PlayerInput::idle()
            },
        }
    }
}

impl Pilot for Script {
    fn controls(&mut self, _sim: &Simulation) -> (PlayerInput, Look) {
        let input = Self::input_at(self.frame);
        let yaw = (self.frame / SCRIPT_CYCLE_FRAMES) as f32 * 0.5;
        self.frame += 1;
        (input, Look::new(yaw, 0.0))
    }

    fn name(&self) -> &'static str {
        "script"
    }
}
