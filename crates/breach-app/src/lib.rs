//! BREACH headless runner.
//!
//! Loads a level and tuning file, drives the simulation with a scripted
//! autopilot in place of a human, and reports the outcome through `log`.

pub mod autopilot;
pub mod game_loop;
pub mod logging;
pub mod setup;

pub use breach_core as core;
