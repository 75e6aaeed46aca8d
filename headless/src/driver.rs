use std::time::{Duration, Instant};

use labyrinth::{MotionEvent, Simulation};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

use crate::{config::RunConfig, pilot::Pilot, stopwatch::FrameStopwatch};

/// Source of per-frame elapsed time.
pub enum FrameClock {
    /// Every frame lasts exactly `dt` seconds.
    Fixed { dt: f32 },
    /// Sleep to the frame period, then report the measured time since the last frame.
    Realtime { period: Duration, last: Instant },
}

impl FrameClock {
    pub fn new(config: &RunConfig) -> Self {
        if config.realtime {
            Self::Realtime {
                period: Duration::from_secs_f32(config.frame_dt()),
                last: Instant::now(),
            }
        } else {
            Self::Fixed {
                dt: config.frame_dt(),
            }
        }
    }

    /// Elapsed seconds for the next frame.
    pub fn tick(&mut self) -> f32 {
        match self {
            Self::Fixed { dt } => *dt,
            Self::Realtime { period, last } => {
                let spent = last.elapsed();
                if spent < *period {
                    std::thread::sleep(*period - spent);
                }
                let now = Instant::now();
                let elapsed = now.duration_since(*last).as_secs_f32();
                *last = now;
                elapsed
            }
        }
    }
}

/// Totals for one run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub landings: u32,
    pub escapes: u32,
    pub resets: u32,
    /// Frame on which the player first reached the raft.
    pub first_escape_frame: Option<u64>,
    pub final_eye: [f32; 3],
    pub escaped_at_end: bool,
}

/// Run `config.frames` frames of `sim` with controls from `pilot`.
pub fn run(sim: &mut Simulation, pilot: &mut dyn Pilot, config: &RunConfig) -> RunSummary {
    let mut clock = FrameClock::new(config);
    let mut sample_rng = StdRng::from_entropy();
    let mut summary = RunSummary::default();

    info!(
        "running {} frames at {} fps with the {} pilot{}",
        config.frames,
        config.fps,
        pilot.name(),
        if config.realtime { " (realtime)" } else { "" }
    );

    for frame in 0..config.frames {
        let elapsed = clock.tick();
        let mut sw = FrameStopwatch::new(
            &mut sample_rng,
            format!("frame {frame}"),
            false,
            config.profile_sample,
        );

        sw.span("pilot");
        let (input, look) = pilot.controls(sim);

        sw.span("simulate");
        let report = sim.frame(elapsed, &input, look);
        sw.end_span();

        for event in &report.events {
            match event {
                MotionEvent::Landed => {
                    summary.landings += 1;
                    debug!("frame {frame}: landed at {:?}", report.eye);
                }
                MotionEvent::Escaped => {
                    summary.escapes += 1;
                    summary.first_escape_frame.get_or_insert(frame);
                    info!("frame {frame}: escaped onto the raft");
                }
                MotionEvent::OutOfBounds => {
                    summary.resets += 1;
                    warn!("frame {frame}: fell out of the world, back to spawn");
                }
            }
        }
        summary.frames += 1;
    }

    let eye = sim.solver().eye();
    summary.final_eye = [eye.x, eye.y, eye.z];
    summary.escaped_at_end = sim.solver().escaped();
    summary
}
