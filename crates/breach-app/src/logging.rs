//! Logger setup for the headless runner.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger.
///
/// `verbose` lowers the default filter from info to debug. `RUST_LOG`
/// overrides either.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // Fails only when a logger is already installed, e.g. across tests.
    let _ = builder.try_init();
}
