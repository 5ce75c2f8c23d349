//! Core types and definitions for the BREACH arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, player input, snapshots, telemetry and presentation events,
//! the numeric tuning surface, level descriptions, and error types.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod level;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
