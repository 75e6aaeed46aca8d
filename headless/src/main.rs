mod config;
mod driver;
mod pilot;
mod stopwatch;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use labyrinth::{Level, Simulation};
use tracing::info;

use crate::config::{Args, Config};

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .init();

    let config = Config::from_args(&args)?;

    let level = Level::generate(&config.level).context("failed to generate the maze")?;
    let stats = level.carve_stats();
    info!(
        "maze {}x{}: {} open cells, {} walls, {} carves, depth {}",
        level.grid().width(),
        level.grid().length(),
        level.grid().open_count(),
        level.grid().wall_count(),
        stats.carves,
        stats.max_depth
    );
    if config.print_maze {
        println!("{}", level.grid());
    }

    let mut sim =
        Simulation::new(level, config.solver).map_err(|e| anyhow!("invalid solver settings: {e}"))?;
    let mut pilot = pilot::pilot_for(config.run.mode, &sim);

    let summary = driver::run(&mut sim, pilot.as_mut(), &config.run);

    info!(
        "done: {} frames, {} landings, {} escapes (first at {:?}), {} resets, escaped at end: {}, eye {:?}",
        summary.frames,
        summary.landings,
        summary.escapes,
        summary.first_escape_frame,
        summary.resets,
        summary.escaped_at_end,
        summary.final_eye
    );

    Ok(())
}
