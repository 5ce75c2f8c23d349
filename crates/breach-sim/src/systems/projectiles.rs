//! Projectile system: moves shots, expires them, stops them at walls and
//! settles hits.
//!
//! Each step tests the tick's path segment against obstacles grown by the
//! projectile radius, so fast shots cannot tunnel through thin walls.

use hecs::{Entity, World};

use breach_collision::segment_intercepts;
use breach_core::components::{Agent, AgentBrain, Arsenal, Health, Projectile, Transform};
use breach_core::config::{CombatConfig, EnemyConfig};
use breach_core::enums::VisualKind;
use breach_core::events::{EntityRef, PresentationEvent};
use breach_core::types::{planar_distance, AgentId, Obstacle, SimTime};
use glam::Vec3;

use crate::systems::enemy_ai::{apply_damage, AgentDamage};

/// Where a projectile ended up after one step.
enum Step {
    Flying,
    Expired,
    Intercepted,
}

fn step(projectile: &mut Projectile, dt: f32, now: f64, obstacles: &[Obstacle], radius: f32) -> Step {
    let start = projectile.position;
    let end = start + projectile.velocity * dt;
    projectile.position = end;

    if now - projectile.spawned_at > f64::from(projectile.lifetime) {
        return Step::Expired;
    }
    if segment_intercepts(start, end, obstacles, radius) {
        return Step::Intercepted;
    }
    Step::Flying
}

fn retire_shot(
    projectile: &Projectile,
    outcome: &Step,
    presentation: &mut Vec<PresentationEvent>,
) {
    if let Step::Intercepted = outcome {
        presentation.push(PresentationEvent::SpawnVisual {
            entity: None,
            visual: VisualKind::Impact,
            position: projectile.position,
        });
    }
    presentation.push(PresentationEvent::Remove {
        entity: EntityRef::Projectile(projectile.id),
    });
}

/// Advance every agent-owned projectile. Returns the damage of each shot
/// that reached the player.
pub fn run_enemy(
    world: &mut World,
    player_position: Vec3,
    enemies: &EnemyConfig,
    obstacles: &[Obstacle],
    time: &SimTime,
    dt: f32,
    presentation: &mut Vec<PresentationEvent>,
) -> Vec<f32> {
    let now = time.elapsed_secs;
    let mut hits = Vec::new();

    for (_entity, arsenal) in world.query_mut::<&mut Arsenal>() {
        arsenal.projectiles.retain_mut(|projectile| {
            let outcome = step(projectile, dt, now, obstacles, enemies.projectile_radius);
            match outcome {
                Step::Flying => {}
                _ => {
                    retire_shot(projectile, &outcome, presentation);
                    return false;
                }
            }
            if planar_distance(projectile.position, player_position) <= enemies.projectile_hit_radius {
                hits.push(projectile.damage);
                presentation.push(PresentationEvent::Remove {
                    entity: EntityRef::Projectile(projectile.id),
                });
                return false;
            }
            presentation.push(PresentationEvent::Place {
                entity: EntityRef::Projectile(projectile.id),
                position: projectile.position,
                yaw: 0.0,
            });
            true
        });
    }

    hits
}

/// Advance the player's projectiles and apply hits to the nearest live
/// agent within the hit radius. Returns the agents killed.
pub fn run_player(
    world: &mut World,
    projectiles: &mut Vec<Projectile>,
    combat: &CombatConfig,
    death_duration: f32,
    obstacles: &[Obstacle],
    time: &SimTime,
    dt: f32,
    presentation: &mut Vec<PresentationEvent>,
) -> Vec<AgentId> {
    let now = time.elapsed_secs;
    let mut targets: Vec<(Entity, AgentId, Vec3)> = world
        .query::<(&Agent, &Transform, &AgentBrain)>()
        .iter()
        .filter(|(_, (_, _, brain))| brain.state.is_alive())
        .map(|(entity, (agent, transform, _))| (entity, agent.id, transform.position))
        .collect();
    let mut kills = Vec::new();

    projectiles.retain_mut(|projectile| {
        let outcome = step(projectile, dt, now, obstacles, combat.projectile_radius);
        if !matches!(outcome, Step::Flying) {
            retire_shot(projectile, &outcome, presentation);
            return false;
        }

        let nearest = targets
            .iter()
            .enumerate()
            .map(|(slot, (_, _, position))| (slot, planar_distance(projectile.position, *position)))
            .filter(|&(_, distance)| distance <= combat.hit_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((slot, _)) = nearest else {
            presentation.push(PresentationEvent::Place {
                entity: EntityRef::Projectile(projectile.id),
                position: projectile.position,
                yaw: 0.0,
            });
            return true;
        };

        let (entity, id, _) = targets[slot];
        let damage = match world.query_one_mut::<(&mut Health, &mut AgentBrain)>(entity) {
            Ok((health, brain)) => apply_damage(health, brain, projectile.damage, now, death_duration),
            Err(_) => AgentDamage::Ignored,
        };
        match damage {
            AgentDamage::Killed => {
                targets.swap_remove(slot);
                kills.push(id);
                presentation.push(PresentationEvent::AgentDied { id });
            }
            AgentDamage::Wounded => presentation.push(PresentationEvent::AgentHit { id }),
            AgentDamage::Ignored => {}
        }
        presentation.push(PresentationEvent::Remove {
            entity: EntityRef::Projectile(projectile.id),
        });
        false
    });

    kills
}
