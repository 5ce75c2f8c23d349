//! Arena snapshot: the complete visible state handed to the presentation
//! layer and HUD after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::PresentationEvent;
use crate::types::{AgentId, ProjectileId, SimTime};

/// Complete state broadcast after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub schedule: ScheduleView,
    pub player: PlayerView,
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
    pub difficulty: DifficultyView,
    /// Scene deltas produced during this tick, in emission order.
    pub presentation: Vec<PresentationEvent>,
}

/// Wave progress for the HUD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub phase: SchedulePhase,
    /// 1-based number of the current or most recent wave, if any started.
    pub wave_number: Option<usize>,
    pub total_waves: usize,
    pub spawned_this_wave: u32,
    /// Live agents, including dead ones still playing their despawn.
    pub enemies_alive: usize,
    pub intermission_remaining_secs: f32,
    pub complete: bool,
}

/// Player vitals, ammo and score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub velocity: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
    pub max_armor: f32,
    pub ammo_in_magazine: u32,
    pub reserve_ammo: u32,
    pub reloading: bool,
    pub reload_remaining_secs: f32,
    pub score: u32,
    pub alive: bool,
}

/// One enemy agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub archetype: String,
    pub state: AgentState,
    pub position: Vec3,
    pub yaw: f32,
    pub health: f32,
    pub max_health: f32,
    /// Despawn progress in `[0, 1]`; 1 while alive, shrinking to 0 when dead.
    pub scale: f32,
}

/// One projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub owner: ProjectileOwner,
    pub position: Vec3,
}

/// Current difficulty state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyView {
    pub modifier: f32,
    pub band: String,
    pub raw_score: f32,
    pub ttk_samples: usize,
}
