//! Snapshot system: queries the world and builds an `ArenaSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use breach_core::components::*;
use breach_core::enums::{AgentState, ProjectileOwner};
use breach_core::events::PresentationEvent;
use breach_core::state::*;
use breach_core::types::SimTime;

use crate::difficulty::DifficultyController;
use crate::player::PlayerState;
use crate::systems::wave_scheduler::WaveScheduler;

/// Build the complete snapshot for the tick that just ran.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    scheduler: &WaveScheduler,
    difficulty: &DifficultyController,
    player: &PlayerState,
    death_duration: f32,
    presentation: Vec<PresentationEvent>,
) -> ArenaSnapshot {
    let agents = build_agents(world, death_duration);
    ArenaSnapshot {
        time: *time,
        schedule: scheduler.view(agents.len()),
        player: player.view(),
        projectiles: build_projectiles(world, player),
        agents,
        difficulty: difficulty.view(),
        presentation,
    }
}

/// Agent views, ordered by id.
fn build_agents(world: &World, death_duration: f32) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Agent, &Transform, &Health, &AgentBrain)>()
        .iter()
        .map(|(_, (agent, transform, health, brain))| AgentView {
            id: agent.id,
            archetype: agent.archetype_name.clone(),
            state: brain.state,
            position: transform.position,
            yaw: transform.yaw,
            health: health.current,
            max_health: health.max,
            scale: despawn_scale(brain, death_duration),
        })
        .collect();
    agents.sort_by_key(|view| view.id);
    agents
}

fn despawn_scale(brain: &AgentBrain, death_duration: f32) -> f32 {
    match brain.state {
        AgentState::Dead if death_duration > 0.0 => (brain.death_timer / death_duration).clamp(0.0, 1.0),
        AgentState::Dead => 0.0,
        _ => 1.0,
    }
}

/// Player shots first, then agent shots, each ordered by id.
fn build_projectiles(world: &World, player: &PlayerState) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = player
        .projectiles
        .iter()
        .map(|p| ProjectileView {
            id: p.id,
            owner: ProjectileOwner::Player,
            position: p.position,
        })
        .collect();

    let mut hostile: Vec<ProjectileView> = world
        .query::<&Arsenal>()
        .iter()
        .flat_map(|(_, arsenal)| arsenal.projectiles.iter())
        .map(|p| ProjectileView {
            id: p.id,
            owner: p.owner,
            position: p.position,
        })
        .collect();
    hostile.sort_by_key(|view| view.id);

    projectiles.append(&mut hostile);
    projectiles
}
