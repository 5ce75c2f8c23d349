//! Events emitted by the simulation.
//!
//! `TelemetryEvent`s go to the telemetry collaborator and never affect
//! control flow. `PresentationEvent`s are the per-tick deltas the render
//! collaborator applies to its own scene.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AgentId, ProjectileId};

/// Structured notifications for the telemetry collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TelemetryEvent {
    SessionStarted {
        session_id: String,
        level_name: String,
    },
    LevelLoadFailed {
        path: String,
        reason: String,
    },
    WaveStarted {
        wave_number: usize,
        total_waves: usize,
        target_count: u32,
    },
    WaveCompleted {
        wave_number: usize,
        total_waves: usize,
    },
    /// Emitted every intermission tick.
    Intermission {
        next_wave_number: usize,
        total_waves: usize,
        remaining_secs: f32,
    },
    ScheduleCompleted {
        total_waves: usize,
    },
    DifficultyBandChanged {
        band_from: String,
        band_to: String,
        modifier: f32,
        health_ratio: f32,
        average_time_to_kill: f32,
        ammo_spent_ratio: f32,
        wave_index: Option<usize>,
        enemies_alive: usize,
    },
    DifficultyModifierDrift {
        modifier: f32,
        health_ratio: f32,
        average_time_to_kill: f32,
        ammo_spent_ratio: f32,
        wave_index: Option<usize>,
        enemies_alive: usize,
    },
    PlayerDied {
        score: u32,
        wave_number: Option<usize>,
    },
}

impl TelemetryEvent {
    /// Short stable name, used for breadcrumbs and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            TelemetryEvent::SessionStarted { .. } => "session_started",
            TelemetryEvent::LevelLoadFailed { .. } => "level_load_failed",
            TelemetryEvent::WaveStarted { .. } => "wave_started",
            TelemetryEvent::WaveCompleted { .. } => "wave_completed",
            TelemetryEvent::Intermission { .. } => "intermission",
            TelemetryEvent::ScheduleCompleted { .. } => "schedule_completed",
            TelemetryEvent::DifficultyBandChanged { .. } => "difficulty_band_changed",
            TelemetryEvent::DifficultyModifierDrift { .. } => "difficulty_modifier_drift",
            TelemetryEvent::PlayerDied { .. } => "player_died",
        }
    }
}

/// A telemetry event with its session context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub level: TelemetryLevel,
    /// Originating subsystem, e.g. `waves` or `player`.
    pub module: &'static str,
    pub tick: u64,
    pub elapsed_secs: f64,
    pub session_id: String,
    pub level_name: String,
    /// Most recent breadcrumbs, oldest first.
    pub breadcrumbs: Vec<String>,
    pub event: TelemetryEvent,
}

/// Handle of something the render collaborator draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum EntityRef {
    Player,
    Agent(AgentId),
    Projectile(ProjectileId),
}

/// Scene deltas for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationEvent {
    /// Move or orient an existing entity.
    Place {
        entity: EntityRef,
        position: Vec3,
        yaw: f32,
    },
    /// Drop an entity from the scene.
    Remove { entity: EntityRef },
    /// Create a visual at a point.
    SpawnVisual {
        entity: Option<EntityRef>,
        visual: VisualKind,
        position: Vec3,
    },
    /// The agent took damage and survived this tick.
    AgentHit { id: AgentId },
    /// The agent died this tick; its despawn countdown has started.
    AgentDied { id: AgentId },
    /// The player took damage.
    PlayerHit { damage: f32 },
}
