use crate::{
    collision::{
        Capsule, CollisionWorld, Contact, Vec3,
        settings::{DEFAULT_RESOLVE_ITERATIONS, FLOOR_NORMAL_MIN_Y, PENETRATION_EPS},
    },
    constants::{
        AIR_ACCELERATION, AIR_DAMPING_SCALE, DAMPING_RATE, GRAVITY, GROUND_ACCELERATION,
        JUMP_SPEED, MAX_FRAME_DT_S, OUT_OF_BOUNDS_Y, PLAYER_RADIUS, RAFT_EYE_OFFSET, SPAWN_END,
        SPAWN_START, STEPS_PER_FRAME,
    },
    motion::{Look, PlayerInput, control_impulse, try_jump},
};

/// Tuning for the player motion solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSettings {
    /// Downward acceleration while airborne (units/s²).
    pub gravity: f32,
    /// Substeps per frame.
    pub steps_per_frame: u32,
    /// Elapsed time consumed by one frame is clamped to this (seconds).
    pub max_frame_dt: f32,
    pub ground_acceleration: f32,
    pub air_acceleration: f32,
    pub jump_speed: f32,
    pub damping_rate: f32,
    pub air_damping_scale: f32,
    /// Eye height at or below which the player is sent back to spawn.
    pub out_of_bounds_y: f32,
    pub spawn: Capsule,
    /// Query/push-out passes per substep.
    pub resolve_iterations: u32,
    /// Eye height above the raft while standing on it.
    pub raft_eye_offset: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            steps_per_frame: STEPS_PER_FRAME,
            max_frame_dt: MAX_FRAME_DT_S,
            ground_acceleration: GROUND_ACCELERATION,
            air_acceleration: AIR_ACCELERATION,
            jump_speed: JUMP_SPEED,
            damping_rate: DAMPING_RATE,
            air_damping_scale: AIR_DAMPING_SCALE,
            out_of_bounds_y: OUT_OF_BOUNDS_Y,
            spawn: Capsule::new(Vec3::from(SPAWN_START), Vec3::from(SPAWN_END), PLAYER_RADIUS),
            resolve_iterations: DEFAULT_RESOLVE_ITERATIONS,
            raft_eye_offset: RAFT_EYE_OFFSET,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.steps_per_frame == 0 {
            return Err("steps_per_frame must be at least 1");
        }
        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err("max_frame_dt must be positive");
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err("gravity must be finite and non-negative");
        }
        if !(self.damping_rate.is_finite() && self.damping_rate >= 0.0) {
            return Err("damping_rate must be finite and non-negative");
        }
        if !(0.0..=1.0).contains(&self.air_damping_scale) {
            return Err("air_damping_scale must lie in [0, 1]");
        }
        if !(self.spawn.radius.is_finite() && self.spawn.radius > 0.0) {
            return Err("spawn capsule radius must be positive");
        }
        if self.resolve_iterations == 0 {
            return Err("resolve_iterations must be at least 1");
        }
        if self.spawn.end.y <= self.out_of_bounds_y {
            return Err("spawn must lie above the out-of-bounds height");
        }
        Ok(())
    }

    /// Frame time actually simulated for a measured `elapsed` (seconds).
    #[inline]
    pub fn clamp_frame_dt(&self, elapsed: f32) -> f32 {
        if elapsed.is_nan() {
            return 0.0;
        }
        elapsed.clamp(0.0, self.max_frame_dt)
    }

    /// Substep length for a measured frame `elapsed` (seconds).
    #[inline]
    pub fn substep_dt(&self, elapsed: f32) -> f32 {
        self.clamp_frame_dt(elapsed) / self.steps_per_frame.max(1) as f32
    }

    /// Velocity multiplier delta for one substep: `exp(-rate * dt) - 1`, scaled down in air.
    #[inline]
    pub fn damping(&self, dt: f32, on_floor: bool) -> f32 {
        let damping = (-self.damping_rate * dt).exp() - 1.0;
        if on_floor {
            damping
        } else {
            damping * self.air_damping_scale
        }
    }
}

/// Gameplay transitions raised by the solver, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionEvent {
    /// Airborne to standing on a floor.
    Landed,
    /// First overlap with the goal volume since spawn.
    Escaped,
    /// Fell below the world and was sent back to spawn.
    OutOfBounds,
}

/// Single-capsule kinematic character solver.
///
/// Owns the player capsule and velocity; borrows the collision worlds per substep.
#[derive(Clone, Debug)]
pub struct MotionSolver {
    settings: SolverSettings,
    capsule: Capsule,
    velocity: Vec3,
    on_floor: bool,
    jumping: bool,
    escaped: bool,
    eye: Vec3,
}

impl MotionSolver {
    /// New solver with the player at the spawn capsule, at rest.
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            capsule: settings.spawn,
            velocity: Vec3::zeros(),
            on_floor: false,
            jumping: false,
            escaped: false,
            eye: settings.spawn.end,
            settings,
        }
    }

    #[inline]
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    #[inline]
    pub fn capsule(&self) -> &Capsule {
        &self.capsule
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn on_floor(&self) -> bool {
        self.on_floor
    }

    #[inline]
    pub fn jumping(&self) -> bool {
        self.jumping
    }

    #[inline]
    pub fn escaped(&self) -> bool {
        self.escaped
    }

    /// Camera position: the capsule's top, with its height pinned to the raft while on it.
    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Move the player to `capsule` with `velocity`, keeping the gameplay flags.
    pub fn place(&mut self, capsule: Capsule, velocity: Vec3) {
        self.capsule = capsule;
        self.velocity = velocity;
        self.eye = capsule.end;
    }

    /// Back to the spawn capsule: at rest, airborne, not escaped.
    pub fn reset_to_spawn(&mut self) {
        self.capsule = self.settings.spawn;
        self.velocity = Vec3::zeros();
        self.on_floor = false;
        self.jumping = false;
        self.escaped = false;
        self.eye = self.capsule.end;
    }

    /// Advance the player by one substep of `dt` seconds.
    ///
    /// `world` holds every static volume; `goal` holds only the escape volume (the raft),
    /// whose current surface height is `goal_height`. Raised events are appended to
    /// `events`.
    #[allow(clippy::too_many_arguments)]
    pub fn substep(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        look: Look,
        world: &CollisionWorld,
        goal: &CollisionWorld,
        goal_height: f32,
        events: &mut Vec<MotionEvent>,
    ) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let was_on_floor = self.on_floor;

        self.apply_controls(dt, input, look);
        self.apply_gravity_and_damping(dt);

        // Integrate.
        self.capsule.translate(self.velocity * dt);

        let on_goal = goal.intersects(&self.capsule);
        self.resolve(world);

        self.eye = self.capsule.end;
        if on_goal {
            self.eye.y = goal_height + self.settings.raft_eye_offset;
            if !self.escaped {
                self.escaped = true;
                log::info!("player reached the raft at {:?}", self.capsule.center());
                events.push(MotionEvent::Escaped);
            }
        }

        if !was_on_floor && self.on_floor {
            events.push(MotionEvent::Landed);
        }

        if self.eye.y <= self.settings.out_of_bounds_y {
            log::warn!(
                "player out of bounds at {:?}, sending back to spawn",
                self.eye
            );
            self.reset_to_spawn();
            events.push(MotionEvent::OutOfBounds);
        }
    }

    fn apply_controls(&mut self, dt: f32, input: &PlayerInput, look: Look) {
        let acceleration = if self.on_floor {
            self.settings.ground_acceleration
        } else {
            self.settings.air_acceleration
        };
        self.velocity += control_impulse(input, look, dt * acceleration);

        try_jump(
            input,
            self.on_floor,
            &mut self.jumping,
            &mut self.velocity,
            self.settings.jump_speed,
        );
    }

    fn apply_gravity_and_damping(&mut self, dt: f32) {
        if !self.on_floor {
            self.velocity.y -= self.settings.gravity * dt;
        }
        let damping = self.settings.damping(dt, self.on_floor);
        self.velocity += self.velocity * damping;
    }

    /// Push the capsule out of `world`, deepest contact first.
    ///
    /// Recomputes `on_floor` from the contacts met, including a floor still touched
    /// under a wall that ended the passes. Returns the first (deepest) contact.
    pub fn resolve(&mut self, world: &CollisionWorld) -> Option<Contact> {
        self.on_floor = false;
        let mut first = None;

        for _ in 0..self.settings.resolve_iterations {
            let Some(contact) = world.query_capsule(&self.capsule) else {
                break;
            };
            first.get_or_insert(contact);

            let normal = contact.normal;
            if normal.y > FLOOR_NORMAL_MIN_Y {
                self.land_on(normal);
            } else {
                // Slide along walls.
                self.velocity -= normal * normal.dot(&self.velocity);
            }

            self.capsule.translate(normal * contact.depth);

            if contact.depth <= PENETRATION_EPS {
                break;
            }
        }

        if !self.on_floor {
            if let Some(floor) = world.floor_contact(&self.capsule, FLOOR_NORMAL_MIN_Y) {
                self.land_on(floor.normal);
                if floor.depth > 0.0 {
                    self.capsule.translate(floor.normal * floor.depth);
                }
            }
        }

        first
    }

    /// Mark the player as standing and drop the part of the velocity going into the floor.
    fn land_on(&mut self, normal: Vec3) {
        self.on_floor = true;
        let into = normal.dot(&self.velocity);
        if into < 0.0 {
            self.velocity -= normal * into;
        }
    }
}
