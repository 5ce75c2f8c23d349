//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::AgentId;

/// Enemy agent behaviour state. An agent is in exactly one state at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentState {
    /// Wandering around the spawn point.
    #[default]
    Patrol,
    /// Closing on the player.
    Chase,
    /// Within attack range, attacking on cooldown.
    Attack,
    /// Killed. Terminal; counts down a despawn timer.
    Dead,
}

impl AgentState {
    pub fn is_alive(self) -> bool {
        self != AgentState::Dead
    }
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy(AgentId),
}

/// Wave scheduler phase (top-level schedule state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum SchedulePhase {
    /// No wave started yet.
    #[default]
    Idle,
    /// Wave `index` (0-based) is spawning or waiting for clearance.
    WaveActive { index: usize },
    /// Paused between waves; `next_index` starts when `remaining_secs` hits zero.
    Intermission { next_index: usize, remaining_secs: f32 },
    /// Every wave has been cleared.
    Complete,
}

/// Telemetry severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TelemetryLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Kind of visual the presentation layer should create at a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum VisualKind {
    /// A freshly spawned agent of the given archetype.
    Agent { archetype: String },
    /// A projectile leaving its muzzle.
    Projectile { owner: ProjectileOwner },
    /// A projectile stopped by level geometry.
    Impact,
}
