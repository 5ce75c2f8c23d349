//! Reference tuning values. Every one of these is only a default for the
//! matching `GameConfig` field; the simulation reads the config, not these.

// --- Movement ---

/// Player acceleration while a move intent is held (units/s²).
pub const PLAYER_ACCELERATION: f32 = 80.0;

/// Proportional deceleration factor when no move intent is held (1/s).
pub const PLAYER_DECELERATION: f32 = 12.0;

/// Per-axis player speed clamp (units/s).
pub const PLAYER_MAX_SPEED: f32 = 24.0;

/// Player collision radius.
pub const PLAYER_BODY_RADIUS: f32 = 0.6;

// --- Collision ---

/// Smallest step the resolver walks a blocked move in.
pub const COLLISION_MIN_STEP: f32 = 0.1;

/// Step length as a fraction of body radius.
pub const COLLISION_STEP_FACTOR: f32 = 0.5;

// --- Player combat ---

/// Shots per second while fire is held.
pub const FIRE_RATE: f32 = 6.0;

/// Player projectile speed (units/s).
pub const PLAYER_PROJECTILE_SPEED: f32 = 120.0;

/// Player projectile lifetime (seconds).
pub const PLAYER_PROJECTILE_LIFETIME: f32 = 2.5;

/// Damage per player projectile.
pub const PLAYER_PROJECTILE_DAMAGE: f32 = 25.0;

/// Player projectile radius used for obstacle intercept.
pub const PLAYER_PROJECTILE_RADIUS: f32 = 0.15;

/// Distance at which a player projectile hits an agent.
pub const PLAYER_PROJECTILE_HIT_RADIUS: f32 = 1.0;

/// Score awarded per kill.
pub const KILL_SCORE: u32 = 100;

// --- Player vitals and ammo ---

pub const PLAYER_MAX_HEALTH: f32 = 140.0;
pub const PLAYER_MAX_ARMOR: f32 = 80.0;
pub const MAGAZINE_SIZE: u32 = 24;
pub const RESERVE_AMMO: u32 = 180;

/// Reload duration (seconds).
pub const RELOAD_TIME: f32 = 1.6;

// --- Enemies ---

/// Default seconds between spawns when a wave does not set one.
pub const ENEMY_SPAWN_INTERVAL: f32 = 4.0;

/// Global cap on live agents.
pub const ENEMY_MAX_SIMULTANEOUS: usize = 10;

/// Archetype used when a requested one is missing or filtered out.
pub const DEFAULT_ARCHETYPE: &str = "grunt";

/// Default pause between cleared waves (seconds).
pub const WAVE_INTERMISSION: f32 = 6.0;

/// Death animation length before a dead agent is removed (seconds).
pub const DEATH_DURATION: f32 = 0.6;

/// Enemy collision radius.
pub const ENEMY_BODY_RADIUS: f32 = 0.8;

/// Obstacles closer than this push steering away.
pub const AVOID_RADIUS: f32 = 3.0;

/// Weight of the summed avoidance force in the steering blend.
pub const AVOID_WEIGHT: f32 = 1.5;

/// Fraction of archetype strafe amplitude used while patrolling.
pub const PATROL_STRAFE_WEIGHT: f32 = 0.25;

/// Angular frequency of the strafe weave (rad/s).
pub const STRAFE_FREQUENCY: f32 = 2.0;

/// Distance at which a patrol point counts as reached.
pub const PATROL_ARRIVAL_DISTANCE: f32 = 1.0;

/// Attack reverts to chase beyond `attack_range * ATTACK_HYSTERESIS`.
pub const ATTACK_HYSTERESIS: f32 = 1.2;

/// Extra reach granted to melee hits beyond attack range.
pub const MELEE_REACH_BONUS: f32 = 0.5;

/// Distance at which an enemy projectile hits the player.
pub const ENEMY_PROJECTILE_HIT_RADIUS: f32 = 1.0;

/// Enemy projectile radius used for obstacle intercept.
pub const ENEMY_PROJECTILE_RADIUS: f32 = 0.2;

// --- Difficulty ---

pub const DIFFICULTY_MIN_MODIFIER: f32 = 0.85;
pub const DIFFICULTY_MAX_MODIFIER: f32 = 1.25;

/// Fraction of the gap to the target modifier closed per tick.
pub const DIFFICULTY_SMOOTHING: f32 = 0.15;

/// Rolling time-to-kill window length.
pub const MAX_TTK_SAMPLES: usize = 24;

/// Modifier movement that triggers a drift notification without a band change.
pub const DIFFICULTY_DRIFT_THRESHOLD: f32 = 0.05;

pub const TARGET_TIME_TO_KILL: f32 = 6.0;
pub const TARGET_HEALTH_RATIO: f32 = 0.5;
pub const TARGET_AMMO_SPENT_RATIO: f32 = 0.5;

pub const SCALING_TIME_TO_KILL: f32 = 0.25;
pub const SCALING_HEALTH: f32 = 0.2;
pub const SCALING_AMMO: f32 = 0.1;

/// Band used when no configured band matches the score.
pub const BASELINE_BAND: &str = "baseline";

// --- Telemetry ---

/// Breadcrumbs retained by the telemetry hub.
pub const MAX_BREADCRUMBS: usize = 12;

/// Breadcrumbs attached to each record.
pub const BREADCRUMB_TRAIL_LEN: usize = 5;
