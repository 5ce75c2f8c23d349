//! Player system: reload, locomotion and firing from one tick of input.

use breach_core::commands::PlayerInput;
use breach_core::components::Projectile;
use breach_core::config::GameConfig;
use breach_core::enums::{ProjectileOwner, VisualKind};
use breach_core::events::{EntityRef, PresentationEvent};
use breach_core::types::{Obstacle, ProjectileId, SimTime};

use crate::player::PlayerState;

/// Apply `input` to a live player. `reload_pressed` is the rising edge of
/// the reload input, worked out by the caller.
pub fn run(
    player: &mut PlayerState,
    input: &PlayerInput,
    reload_pressed: bool,
    config: &GameConfig,
    obstacles: &[Obstacle],
    time: &SimTime,
    dt: f32,
    next_projectile_id: &mut u32,
    presentation: &mut Vec<PresentationEvent>,
) {
    if !player.alive {
        return;
    }

    if player.update_reload(dt) {
        log::debug!(
            "reload complete: {}/{}",
            player.ammo_in_magazine,
            player.reserve_ammo
        );
    }
    if reload_pressed && player.start_reload(config.player.reload_time) {
        log::debug!("reload started");
    }

    player.apply_input(input, dt, &config.movement, &config.collision, obstacles);
    presentation.push(PresentationEvent::Place {
        entity: EntityRef::Player,
        position: player.position,
        yaw: breach_enemy_ai::locomotion::yaw_towards(input.look),
    });

    player.cool_down(dt);
    if !input.fire {
        return;
    }
    if let Some(velocity) = player.try_fire(input.look, &config.combat) {
        let id = ProjectileId(*next_projectile_id);
        *next_projectile_id += 1;
        player.projectiles.push(Projectile {
            id,
            owner: ProjectileOwner::Player,
            position: player.position,
            velocity,
            spawned_at: time.elapsed_secs,
            lifetime: config.combat.projectile_lifetime,
            damage: config.combat.damage,
        });
        presentation.push(PresentationEvent::SpawnVisual {
            entity: Some(EntityRef::Projectile(id)),
            visual: VisualKind::Projectile {
                owner: ProjectileOwner::Player,
            },
            position: player.position,
        });
    }
}
