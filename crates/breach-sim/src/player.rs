//! Player body, vitals and weapon state.

use breach_collision::resolve;
use breach_core::commands::PlayerInput;
use breach_core::components::Projectile;
use breach_core::config::{CollisionConfig, CombatConfig, MovementConfig, PlayerConfig};
use breach_core::state::PlayerView;
use breach_core::types::{flatten, Obstacle};
use glam::Vec3;

use crate::difficulty::PlayerVitals;

/// How a hit was split between armor and health.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageReport {
    pub absorbed_by_armor: f32,
    pub absorbed_by_health: f32,
    /// This hit took the player from alive to dead.
    pub killed: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
    pub max_armor: f32,
    pub ammo_in_magazine: u32,
    pub reserve_ammo: u32,
    pub magazine_size: u32,
    pub reloading: bool,
    pub reload_timer: f32,
    pub fire_cooldown: f32,
    pub score: u32,
    pub alive: bool,
    /// Shots in flight.
    pub projectiles: Vec<Projectile>,
}

impl PlayerState {
    pub fn new(position: Vec3, config: &PlayerConfig) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            health: config.max_health,
            max_health: config.max_health,
            armor: config.max_armor,
            max_armor: config.max_armor,
            ammo_in_magazine: config.magazine_size,
            reserve_ammo: config.reserve_ammo,
            magazine_size: config.magazine_size,
            reloading: false,
            reload_timer: 0.0,
            fire_cooldown: 0.0,
            score: 0,
            alive: true,
            projectiles: Vec::new(),
        }
    }

    /// Armor soaks damage first; the remainder comes off health. Ignored
    /// once dead.
    pub fn take_damage(&mut self, amount: f32) -> DamageReport {
        if !self.alive || amount <= 0.0 {
            return DamageReport {
                absorbed_by_armor: 0.0,
                absorbed_by_health: 0.0,
                killed: false,
            };
        }

        let absorbed_by_armor = self.armor.min(amount);
        self.armor = (self.armor - absorbed_by_armor).clamp(0.0, self.max_armor);

        let remainder = amount - absorbed_by_armor;
        let absorbed_by_health = self.health.min(remainder);
        self.health = (self.health - remainder).clamp(0.0, self.max_health);

        let killed = self.health <= 0.0;
        if killed {
            self.alive = false;
            self.velocity = Vec3::ZERO;
            self.reloading = false;
        }
        DamageReport {
            absorbed_by_armor,
            absorbed_by_health,
            killed,
        }
    }

    /// Accelerate along the held move intents relative to the look
    /// direction, or bleed speed off when none are held, then move through
    /// the collision resolver. A blocked axis loses its velocity.
    pub fn apply_input(
        &mut self,
        input: &PlayerInput,
        dt: f32,
        movement: &MovementConfig,
        collision: &CollisionConfig,
        obstacles: &[Obstacle],
    ) {
        let wish = wish_direction(input);
        if wish != Vec3::ZERO {
            self.velocity += wish * movement.acceleration * dt;
        } else {
            let bleed = (movement.deceleration * dt).min(1.0);
            self.velocity -= flatten(self.velocity) * bleed;
        }
        self.velocity.x = self.velocity.x.clamp(-movement.max_speed, movement.max_speed);
        self.velocity.z = self.velocity.z.clamp(-movement.max_speed, movement.max_speed);
        self.velocity.y = 0.0;

        let result = resolve(
            self.position,
            self.velocity * dt,
            obstacles,
            movement.body_radius,
            collision,
        );
        self.position = result.position;
        if result.blocked.x {
            self.velocity.x = 0.0;
        }
        if result.blocked.z {
            self.velocity.z = 0.0;
        }
    }

    /// Begin a reload cycle if one can run.
    pub fn start_reload(&mut self, reload_time: f32) -> bool {
        if self.reloading || self.ammo_in_magazine >= self.magazine_size || self.reserve_ammo == 0 {
            return false;
        }
        self.reloading = true;
        self.reload_timer = reload_time;
        true
    }

    /// Run the reload timer; tops the magazine up from reserve when it
    /// elapses. Returns true on the tick the reload completes.
    pub fn update_reload(&mut self, dt: f32) -> bool {
        if !self.reloading {
            return false;
        }
        self.reload_timer -= dt;
        if self.reload_timer > 0.0 {
            return false;
        }
        let moved = self
            .magazine_size
            .saturating_sub(self.ammo_in_magazine)
            .min(self.reserve_ammo);
        self.ammo_in_magazine += moved;
        self.reserve_ammo -= moved;
        self.reloading = false;
        self.reload_timer = 0.0;
        true
    }

    pub fn cool_down(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
    }

    /// Spend a round if the weapon is ready. Returns the shot's velocity.
    pub fn try_fire(&mut self, look: Vec3, combat: &CombatConfig) -> Option<Vec3> {
        if self.fire_cooldown > 0.0 || self.reloading || self.ammo_in_magazine == 0 {
            return None;
        }
        let direction = look.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        self.ammo_in_magazine -= 1;
        self.fire_cooldown = 1.0 / combat.fire_rate;
        Some(direction * combat.projectile_speed)
    }

    pub fn ammo_remaining(&self) -> u32 {
        self.ammo_in_magazine + self.reserve_ammo
    }

    pub fn vitals(&self) -> PlayerVitals {
        PlayerVitals {
            health: self.health,
            max_health: self.max_health,
            armor: self.armor,
            max_armor: self.max_armor,
            ammo_remaining: self.ammo_remaining(),
        }
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            velocity: self.velocity,
            health: self.health,
            max_health: self.max_health,
            armor: self.armor,
            max_armor: self.max_armor,
            ammo_in_magazine: self.ammo_in_magazine,
            reserve_ammo: self.reserve_ammo,
            reloading: self.reloading,
            reload_remaining_secs: if self.reloading { self.reload_timer } else { 0.0 },
            score: self.score,
            alive: self.alive,
        }
    }
}

/// Unit planar direction of the held move intents, relative to `look`.
fn wish_direction(input: &PlayerInput) -> Vec3 {
    let forward = flatten(input.look).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Vec3::ZERO;
    }
    let right = Vec3::new(-forward.z, 0.0, forward.x);

    let mut wish = Vec3::ZERO;
    if input.forward {
        wish += forward;
    }
    if input.backward {
        wish -= forward;
    }
    if input.right {
        wish += right;
    }
    if input.left {
        wish -= right;
    }
    wish.normalize_or_zero()
}
