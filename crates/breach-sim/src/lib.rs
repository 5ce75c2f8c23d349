//! Simulation engine for BREACH.
//!
//! Owns the hecs ECS world of enemy agents, the player, the wave schedule
//! and the difficulty controller, and produces an `ArenaSnapshot` per tick.

pub mod difficulty;
pub mod engine;
pub mod player;
pub mod systems;
pub mod telemetry;

pub use breach_core as core;
pub use engine::{SimConfig, SimulationEngine};
