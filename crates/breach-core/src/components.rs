//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behaviour.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::Archetype;
use crate::enums::*;
use crate::types::{AgentId, ProjectileId};

/// Identity and stat template of an enemy agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Name the archetype was resolved under (after default fallback).
    pub archetype_name: String,
    pub archetype: Archetype,
}

/// World placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Heading around the vertical axis (radians, 0 = facing -Z).
    pub yaw: f32,
}

/// Hit points, clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Behaviour state of an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentBrain {
    pub state: AgentState,
    /// Simulation time the current state was entered.
    pub state_entered_at: f64,
    pub spawn_point: Vec3,
    pub spawned_at: f64,
    pub patrol_target: Option<Vec3>,
    /// Seconds until the next attack attempt is allowed.
    pub attack_cooldown: f32,
    /// Seconds of death animation left. Only meaningful when dead.
    pub death_timer: f32,
    /// Simulation time the agent died.
    pub died_at: Option<f64>,
    /// Wounded by the player; keeps chasing regardless of aggro range.
    pub provoked: bool,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: ProjectileOwner,
    pub position: Vec3,
    pub velocity: Vec3,
    pub spawned_at: f64,
    /// Lifetime budget in seconds.
    pub lifetime: f32,
    pub damage: f32,
}

/// In-flight projectiles owned by an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Arsenal {
    pub projectiles: Vec<Projectile>,
}

