//! Enemy agent behaviour for BREACH.
//!
//! Implements the patrol/chase/attack/dead state machine, steering and
//! obstacle avoidance, and archetype lookup. Pure functions over plain
//! data; the simulation crate owns the agents and applies the results.

pub mod fsm;
pub mod locomotion;
pub mod profiles;

pub use breach_core as core;

#[cfg(test)]
mod tests;
