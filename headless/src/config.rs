use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use labyrinth::{
    LevelSettings, SolverSettings,
    constants::{MAZE_LENGTH, MAZE_WIDTH, MIN_MAZE_SIDE},
};

const DEFAULT_FRAMES: u64 = 1_200;
const DEFAULT_FPS: f32 = 60.0;

/// Who holds the controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// No input: spawn, fall, land.
    Idle,
    /// Walk the shortest route to the gate, then step onto the raft.
    Autopilot,
    /// A fixed walk-and-jump pattern.
    Script,
}

/// Headless maze runner: generates a level and simulates the player without rendering.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Maze width in cells.
    #[arg(long, default_value_t = MAZE_WIDTH, value_parser = clap::value_parser!(u32).range(MIN_MAZE_SIDE as i64..))]
    pub width: u32,
    /// Maze length in cells.
    #[arg(long, default_value_t = MAZE_LENGTH, value_parser = clap::value_parser!(u32).range(MIN_MAZE_SIDE as i64..))]
    pub length: u32,
    /// Seed for the maze carver; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Frames to simulate.
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    pub frames: u64,
    /// Frame rate of the simulated display.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    pub fps: f32,
    /// Substeps per frame.
    #[arg(long, default_value_t = labyrinth::STEPS_PER_FRAME, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub substeps: u32,
    /// Gravity in units per second squared.
    #[arg(long, default_value_t = labyrinth::GRAVITY)]
    pub gravity: f32,
    #[arg(long, value_enum, default_value_t = Mode::Idle)]
    pub mode: Mode,
    #[arg(long, default_value_t = tracing::Level::INFO)]
    pub log_level: tracing::Level,
    /// Fraction of frames whose timings are logged, in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    pub profile_sample: f32,
    /// Print the generated maze before running.
    #[arg(long)]
    pub print_maze: bool,
    /// Pace frames against the wall clock and feed the measured elapsed time.
    #[arg(long)]
    pub realtime: bool,
}

/// Frame loop settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunConfig {
    pub frames: u64,
    pub fps: f32,
    pub realtime: bool,
    pub mode: Mode,
    pub profile_sample: f32,
}

impl RunConfig {
    /// Seconds per frame at the configured rate.
    #[inline]
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps
    }
}

/// Everything the runner needs, validated.
#[derive(Clone, Debug)]
pub struct Config {
    pub level: LevelSettings,
    pub solver: SolverSettings,
    pub run: RunConfig,
    pub print_maze: bool,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Self> {
        if !(args.fps.is_finite() && args.fps > 0.0) {
            return Err(anyhow!("--fps must be positive, got {}", args.fps));
        }
        if !(0.0..=1.0).contains(&args.profile_sample) {
            return Err(anyhow!(
                "--profile-sample must lie in [0, 1], got {}",
                args.profile_sample
            ));
        }

        let level = LevelSettings {
            width: args.width,
            length: args.length,
            seed: args.seed,
            ..LevelSettings::default()
        };
        level.validate().map_err(|e| anyhow!("invalid level settings: {e}"))?;

        let solver = SolverSettings {
            steps_per_frame: args.substeps,
            gravity: args.gravity,
            ..SolverSettings::default()
        };
        solver.validate().map_err(|e| anyhow!("invalid solver settings: {e}"))?;

        Ok(Self {
            level,
            solver,
            run: RunConfig {
                frames: args.frames,
                fps: args.fps,
                realtime: args.realtime,
                mode: args.mode,
                profile_sample: args.profile_sample,
            },
            print_maze: args.print_maze,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["labyrinth_headless"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_match_the_library() {
        let config = Config::from_args(&parse(&[])).unwrap();
        assert_eq!(config.level, LevelSettings::default());
        assert_eq!(config.solver, SolverSettings::default());
        assert_eq!(config.run.mode, Mode::Idle);
        assert_eq!(config.run.frames, DEFAULT_FRAMES);
        assert!((config.run.frame_dt() - 1.0 / 60.0).abs() < 1.0e-7);
        assert!(!config.print_maze);
    }

    #[test]
    fn flags_reach_the_settings() {
        let args = parse(&[
            "--width", "9", "--length", "11", "--seed", "42", "--substeps", "10", "--gravity",
            "12.5", "--mode", "autopilot", "--log-level", "debug", "--print-maze",
        ]);
        assert_eq!(args.log_level, tracing::Level::DEBUG);

        let config = Config::from_args(&args).unwrap();
        assert_eq!((config.level.width, config.level.length), (9, 11));
        assert_eq!(config.level.seed, Some(42));
        assert_eq!(config.solver.steps_per_frame, 10);
        assert_eq!(config.solver.gravity, 12.5);
        assert_eq!(config.run.mode, Mode::Autopilot);
        assert!(config.print_maze);
    }

    #[test]
    fn rejects_bad_values() {
        let full = |argv: &[&str]| {
            let mut v = vec!["labyrinth_headless"];
            v.extend_from_slice(argv);
            Args::try_parse_from(v)
        };
        assert!(full(&["--width", "2"]).is_err());
        assert!(full(&["--substeps", "0"]).is_err());
        assert!(full(&["--mode", "flying"]).is_err());

        assert!(Config::from_args(&parse(&["--fps", "0"])).is_err());
        assert!(Config::from_args(&parse(&["--profile-sample", "1.5"])).is_err());
        assert!(Config::from_args(&parse(&["--gravity=-1"])).is_err());
    }
}
