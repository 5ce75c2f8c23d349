//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only)
//! plus the engine-owned state they need. The world holds enemy agents only;
//! the player and the schedule live on the engine.

pub mod enemy_ai;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod wave_scheduler;

use breach_core::components::Agent;
use hecs::World;

/// Agents in the arena, including dead ones still playing their despawn.
pub fn live_agents(world: &World) -> usize {
    world.query::<&Agent>().iter().count()
}
