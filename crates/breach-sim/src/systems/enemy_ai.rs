//! Enemy AI system: runs every live agent's state machine, steering and
//! attacks, and applies incoming damage to agents.
//!
//! Calls the pure FSM and locomotion helpers from breach-enemy-ai, then
//! writes the results back into the agent's components.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use breach_collision::resolve;
use breach_core::components::{Agent, AgentBrain, Arsenal, Health, Projectile, Transform};
use breach_core::config::{CollisionConfig, EnemyConfig};
use breach_core::enums::{AgentState, ProjectileOwner, VisualKind};
use breach_core::events::{EntityRef, PresentationEvent};
use breach_core::types::{planar_distance, AgentId, Obstacle, ProjectileId, SimTime};
use breach_enemy_ai::fsm::{attack, evaluate, state_after_damage, AgentContext, AttackOutcome};
use breach_enemy_ai::locomotion::{
    needs_patrol_target, pick_patrol_target, planar_direction, steer, yaw_towards, SteerInput,
};
use glam::Vec3;

/// Read-only inputs shared by every agent this tick.
pub struct AgentTick<'a> {
    pub enemies: &'a EnemyConfig,
    pub collision: &'a CollisionConfig,
    pub obstacles: &'a [Obstacle],
    pub player_position: Vec3,
    pub time: &'a SimTime,
    pub dt: f32,
}

/// Melee damage an agent landed on the player this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeleeHit {
    pub attacker: AgentId,
    pub damage: f32,
}

/// Run one tick for every live agent. Returns the melee hits on the player,
/// in agent iteration order.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    tick: &AgentTick,
    next_projectile_id: &mut u32,
    presentation: &mut Vec<PresentationEvent>,
) -> Vec<MeleeHit> {
    let enemies = tick.enemies;
    let now = tick.time.elapsed_secs;
    let mut hits = Vec::new();

    for (_entity, (agent, transform, brain, arsenal)) in
        world.query_mut::<(&Agent, &mut Transform, &mut AgentBrain, &mut Arsenal)>()
    {
        if !brain.state.is_alive() {
            continue;
        }
        let archetype = &agent.archetype;
        let distance = planar_distance(transform.position, tick.player_position);

        let update = evaluate(&AgentContext {
            archetype,
            state: brain.state,
            distance_to_player: distance,
            attack_hysteresis: enemies.attack_hysteresis,
            provoked: brain.provoked,
        });
        if update.state_changed {
            log::debug!(
                "{:?} ({}) {:?} -> {:?}",
                agent.id,
                agent.archetype_name,
                brain.state,
                update.new_state
            );
            brain.state = update.new_state;
            brain.state_entered_at = now;
            brain.patrol_target = None;
        }

        let (target, strafe_weight) = match brain.state {
            AgentState::Patrol => {
                if needs_patrol_target(
                    transform.position,
                    brain.patrol_target,
                    enemies.patrol_arrival_distance,
                ) {
                    brain.patrol_target = Some(pick_patrol_target(
                        rng,
                        brain.spawn_point,
                        archetype.patrol_radius,
                    ));
                }
                let target = brain.patrol_target.unwrap_or(brain.spawn_point);
                (target, enemies.patrol_strafe_weight)
            }
            _ => (tick.player_position, 1.0),
        };

        let delta = steer(
            &SteerInput {
                position: transform.position,
                target,
                elapsed: now as f32,
                speed: archetype.speed,
                dt: tick.dt,
                strafe_amplitude: archetype.strafe_amplitude,
                strafe_weight,
                strafe_frequency: enemies.strafe_frequency,
                avoid_radius: enemies.avoid_radius,
                avoid_weight: enemies.avoid_weight,
            },
            tick.obstacles,
        );
        let moved = resolve(
            transform.position,
            delta,
            tick.obstacles,
            enemies.body_radius,
            tick.collision,
        );
        transform.position = moved.position;

        let facing = match brain.state {
            AgentState::Patrol => planar_direction(Vec3::ZERO, delta),
            _ => planar_direction(transform.position, tick.player_position),
        };
        if let Some(facing) = facing {
            transform.yaw = yaw_towards(facing);
        }
        presentation.push(PresentationEvent::Place {
            entity: EntityRef::Agent(agent.id),
            position: transform.position,
            yaw: transform.yaw,
        });

        if brain.state != AgentState::Attack {
            continue;
        }
        let roll = attack(
            archetype,
            brain.attack_cooldown,
            tick.dt,
            transform.position,
            tick.player_position,
            enemies.melee_reach_bonus,
        );
        brain.attack_cooldown = roll.cooldown;
        match roll.outcome {
            AttackOutcome::Waiting | AttackOutcome::Whiff => {}
            AttackOutcome::Strike { damage } => hits.push(MeleeHit {
                attacker: agent.id,
                damage,
            }),
            AttackOutcome::Fire {
                velocity,
                lifetime,
                damage,
            } => {
                let id = ProjectileId(*next_projectile_id);
                *next_projectile_id += 1;
                let owner = ProjectileOwner::Enemy(agent.id);
                arsenal.projectiles.push(Projectile {
                    id,
                    owner,
                    position: transform.position,
                    velocity,
                    spawned_at: now,
                    lifetime,
                    damage,
                });
                presentation.push(PresentationEvent::SpawnVisual {
                    entity: Some(EntityRef::Projectile(id)),
                    visual: VisualKind::Projectile { owner },
                    position: transform.position,
                });
            }
        }
    }

    hits
}

/// What a hit did to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentDamage {
    /// Already dead; the hit changed nothing.
    Ignored,
    Wounded,
    Killed,
}

/// Take `damage` off an agent. A wounded agent is provoked: a patroller
/// starts chasing and no longer drops back to patrol out of aggro range.
/// An agent at zero health dies and starts its despawn countdown.
pub fn apply_damage(
    health: &mut Health,
    brain: &mut AgentBrain,
    damage: f32,
    now: f64,
    death_duration: f32,
) -> AgentDamage {
    if !brain.state.is_alive() {
        return AgentDamage::Ignored;
    }
    health.current = (health.current - damage).clamp(0.0, health.max);

    let next = state_after_damage(brain.state, health.current);
    brain.provoked = true;
    if next != brain.state {
        brain.state = next;
        brain.state_entered_at = now;
        brain.patrol_target = None;
    }
    if next == AgentState::Dead {
        brain.death_timer = death_duration;
        brain.died_at = Some(now);
        AgentDamage::Killed
    } else {
        AgentDamage::Wounded
    }
}
