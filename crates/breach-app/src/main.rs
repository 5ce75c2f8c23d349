use std::path::PathBuf;
use std::process::ExitCode;

use breach_app::autopilot::Autopilot;
use breach_app::game_loop::{self, LoopOptions};
use breach_app::{logging, setup};
use breach_sim::engine::{SimConfig, SimulationEngine};
use clap::Parser;

/// Headless wave-survival arena driven by a scripted player
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level description (JSON). Defaults to the built-in training ground
    #[arg(short, long)]
    level: Option<PathBuf>,

    /// Tuning overrides (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of frames to run
    #[arg(short, long, default_value_t = 36_000)]
    ticks: u64,

    /// Seconds of simulation per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// RNG seed; the same seed replays the same session
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Pace frames to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match setup::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let Ok(level) = setup::load_level(args.level.as_deref()) else {
        return ExitCode::FAILURE;
    };

    let mut engine = match SimulationEngine::new(SimConfig { seed: args.seed }, config, level) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let options = LoopOptions {
        max_ticks: args.ticks,
        dt: args.dt,
        realtime: args.realtime,
    };
    let summary = game_loop::run(&mut engine, &mut Autopilot::new(), &options);
    summary.log();
    ExitCode::SUCCESS
}
