//! Enemy behaviour finite state machine.
//!
//! Pure functions that compute state transitions and attack attempts for
//! one agent from its archetype, current state and distance to the player.
//! No ECS dependency; operates on plain data.

use breach_core::config::{Archetype, AttackKind};
use breach_core::enums::AgentState;
use glam::Vec3;

/// Input to the FSM for a single agent.
pub struct AgentContext<'a> {
    pub archetype: &'a Archetype,
    pub state: AgentState,
    /// Horizontal distance to the player.
    pub distance_to_player: f32,
    /// Multiplier on attack range before an attacking agent falls back to chase.
    pub attack_hysteresis: f32,
    /// A provoked agent never gives up the chase.
    pub provoked: bool,
}

/// Output from the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentUpdate {
    pub new_state: AgentState,
    pub state_changed: bool,
}

/// Evaluate one transition for a live agent. Dead is terminal and is only
/// entered through [`state_after_damage`].
pub fn evaluate(ctx: &AgentContext) -> AgentUpdate {
    let new_state = next_state(ctx);
    AgentUpdate {
        new_state,
        state_changed: new_state != ctx.state,
    }
}

/// State the agent should be in after one transition from `ctx.state`.
pub fn next_state(ctx: &AgentContext) -> AgentState {
    let archetype = ctx.archetype;
    let distance = ctx.distance_to_player;

    match ctx.state {
        AgentState::Dead => AgentState::Dead,
        AgentState::Patrol if distance <= archetype.aggro_range => AgentState::Chase,
        AgentState::Patrol => AgentState::Patrol,
        AgentState::Chase if distance <= archetype.attack_range => AgentState::Attack,
        AgentState::Chase if distance > archetype.aggro_range && !ctx.provoked => {
            AgentState::Patrol
        }
        AgentState::Chase => AgentState::Chase,
        AgentState::Attack if distance > archetype.attack_range * ctx.attack_hysteresis => {
            AgentState::Chase
        }
        AgentState::Attack => AgentState::Attack,
    }
}

/// State after the agent's health changed to `health` through damage.
pub fn state_after_damage(state: AgentState, health: f32) -> AgentState {
    match state {
        AgentState::Dead => AgentState::Dead,
        _ if health <= 0.0 => AgentState::Dead,
        AgentState::Patrol => AgentState::Chase,
        other => other,
    }
}

/// What an attacking agent does this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Cooldown still running.
    Waiting,
    /// Melee contact landed.
    Strike { damage: f32 },
    /// Melee attempt out of reach; the cooldown is spent anyway.
    Whiff,
    /// Ranged shot released from the agent toward the player.
    Fire {
        velocity: Vec3,
        lifetime: f32,
        damage: f32,
    },
}

/// Result of [`attack`]: the outcome and the cooldown left afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    pub outcome: AttackOutcome,
    pub cooldown: f32,
}

/// Count the cooldown down by `dt` and attempt an attack once it elapses.
///
/// `reach_bonus` extends melee reach past the attack range. Any attempt,
/// hit or miss, resets the cooldown to the archetype's value.
pub fn attack(
    archetype: &Archetype,
    cooldown: f32,
    dt: f32,
    origin: Vec3,
    target: Vec3,
    reach_bonus: f32,
) -> AttackRoll {
    let remaining = cooldown - dt;
    if remaining > 0.0 {
        return AttackRoll {
            outcome: AttackOutcome::Waiting,
            cooldown: remaining,
        };
    }

    let outcome = match archetype.attack {
        AttackKind::Melee => {
            let reach = archetype.attack_range + reach_bonus;
            if breach_core::types::planar_distance(origin, target) <= reach {
                AttackOutcome::Strike {
                    damage: archetype.attack_damage,
                }
            } else {
                AttackOutcome::Whiff
            }
        }
        AttackKind::Ranged {
            projectile_speed,
            projectile_lifetime,
        } => {
            let aim = (target - origin).normalize_or_zero();
            if aim == Vec3::ZERO {
                // Standing on the player: nothing to aim along.
                AttackOutcome::Whiff
            } else {
                AttackOutcome::Fire {
                    velocity: aim * projectile_speed,
                    lifetime: projectile_lifetime,
                    damage: archetype.attack_damage,
                }
            }
        }
    };

    AttackRoll {
        outcome,
        cooldown: archetype.attack_cooldown,
    }
}
