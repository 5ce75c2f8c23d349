//! Numeric tuning surface.
//!
//! Every archetype stat, wave definition, difficulty threshold, movement
//! constant and combat rate is a field here. Sections default individually,
//! so a config file only needs the values it overrides.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Complete tuning surface for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementConfig,
    pub collision: CollisionConfig,
    pub combat: CombatConfig,
    pub player: PlayerConfig,
    pub enemies: EnemyConfig,
}

/// Player locomotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_speed: f32,
    pub body_radius: f32,
}

/// Collision resolver stepping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub min_step: f32,
    pub step_factor: f32,
}

/// Player weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub fire_rate: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub damage: f32,
    pub projectile_radius: f32,
    pub hit_radius: f32,
    pub kill_score: u32,
}

/// Player vitals and ammunition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f32,
    pub max_armor: f32,
    pub magazine_size: u32,
    pub reserve_ammo: u32,
    pub reload_time: f32,
}

/// Enemy population, behaviour thresholds, waves and difficulty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub spawn_interval: f32,
    pub max_simultaneous: usize,
    pub default_type: String,
    pub wave_intermission: f32,
    pub death_duration: f32,
    pub body_radius: f32,
    pub avoid_radius: f32,
    pub avoid_weight: f32,
    pub patrol_strafe_weight: f32,
    pub strafe_frequency: f32,
    pub patrol_arrival_distance: f32,
    pub attack_hysteresis: f32,
    pub melee_reach_bonus: f32,
    pub projectile_hit_radius: f32,
    pub projectile_radius: f32,
    pub archetypes: BTreeMap<String, Archetype>,
    pub waves: Vec<WaveDefinition>,
    pub allowed_types: Vec<String>,
    pub difficulty: DifficultyConfig,
}

/// Immutable stat template for an enemy class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub speed: f32,
    pub health: f32,
    pub aggro_range: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    pub patrol_radius: f32,
    pub strafe_amplitude: f32,
    pub attack: AttackKind,
}

/// How an archetype delivers damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackKind {
    /// Instant contact damage within reach.
    Melee,
    /// Fires a projectile at the player's position.
    Ranged {
        projectile_speed: f32,
        projectile_lifetime: f32,
    },
}

/// One scheduled batch of enemies. Read-only template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub count: u32,
    /// Seconds between spawns; the global spawn interval applies when unset.
    #[serde(default)]
    pub spawn_interval: Option<f32>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Pause after this wave; the global intermission applies when unset.
    #[serde(default)]
    pub intermission: Option<f32>,
}

/// Closed-loop difficulty tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub targets: DifficultyTargets,
    pub scaling: DifficultyScaling,
    pub min_modifier: f32,
    pub max_modifier: f32,
    pub smoothing: f32,
    pub max_ttk_samples: usize,
    pub drift_threshold: f32,
    pub bands: Vec<DifficultyBand>,
}

/// Performance the controller steers the player toward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTargets {
    pub average_time_to_kill: f32,
    pub health_ratio: f32,
    pub ammo_spent_ratio: f32,
}

/// Weight of each metric in the raw score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyScaling {
    pub time_to_kill: f32,
    pub health: f32,
    pub ammo: f32,
}

/// Named tier over `[min_score, max_score)` of raw score. An unset bound is
/// open on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBand {
    pub name: String,
    #[serde(default)]
    pub min_score: Option<f32>,
    #[serde(default)]
    pub max_score: Option<f32>,
    #[serde(default)]
    pub allowed_archetypes: Vec<String>,
}

impl GameConfig {
    /// Parse a JSON tuning file and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the semantic constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let enemies = &self.enemies;
        if !enemies.archetypes.contains_key(&enemies.default_type) {
            return Err(invalid(format!(
                "default archetype `{}` is not defined",
                enemies.default_type
            )));
        }
        for (name, archetype) in &enemies.archetypes {
            archetype
                .validate()
                .map_err(|reason| invalid(format!("archetype `{name}`: {reason}")))?;
        }
        if self.combat.fire_rate <= 0.0 {
            return Err(invalid("combat.fire_rate must be positive"));
        }
        if self.player.magazine_size == 0 {
            return Err(invalid("player.magazine_size must be positive"));
        }
        if self.player.max_health <= 0.0 || self.player.max_armor < 0.0 {
            return Err(invalid("player vitals must be positive"));
        }
        if self.collision.min_step <= 0.0 {
            return Err(invalid("collision.min_step must be positive"));
        }
        if self.movement.body_radius < 0.0 || enemies.body_radius < 0.0 {
            return Err(invalid("body radii must not be negative"));
        }
        self.enemies.difficulty.validate()
    }
}

impl Archetype {
    fn validate(&self) -> Result<(), String> {
        if self.speed <= 0.0 || self.health <= 0.0 {
            return Err("speed and health must be positive".into());
        }
        if self.attack_range < 0.0 || self.aggro_range < 0.0 || self.attack_cooldown < 0.0 {
            return Err("ranges and cooldown must not be negative".into());
        }
        if let AttackKind::Ranged {
            projectile_speed,
            projectile_lifetime,
        } = self.attack
        {
            if projectile_speed <= 0.0 || projectile_lifetime <= 0.0 {
                return Err("ranged projectile speed and lifetime must be positive".into());
            }
        }
        Ok(())
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self.attack, AttackKind::Ranged { .. })
    }
}

impl DifficultyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_modifier <= 0.0 || self.min_modifier > self.max_modifier {
            return Err(invalid(
                "difficulty modifiers must satisfy 0 < min_modifier <= max_modifier",
            ));
        }
        if self.smoothing <= 0.0 || self.smoothing > 1.0 {
            return Err(invalid("difficulty.smoothing must be in (0, 1]"));
        }
        if self.max_ttk_samples == 0 {
            return Err(invalid("difficulty.max_ttk_samples must be at least 1"));
        }
        for band in &self.bands {
            if let (Some(min), Some(max)) = (band.min_score, band.max_score) {
                if min >= max {
                    return Err(invalid(format!(
                        "band `{}` has min_score >= max_score",
                        band.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl DifficultyBand {
    /// Half-open containment: `min_score <= score < max_score`.
    pub fn contains(&self, score: f32) -> bool {
        let above_min = self.min_score.map_or(true, |min| score >= min);
        let below_max = self.max_score.map_or(true, |max| score < max);
        above_min && below_max
    }

    /// Fallback band with no archetype restriction.
    pub fn baseline() -> Self {
        Self {
            name: BASELINE_BAND.to_string(),
            min_score: None,
            max_score: None,
            allowed_archetypes: Vec::new(),
        }
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(reason.into())
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            acceleration: PLAYER_ACCELERATION,
            deceleration: PLAYER_DECELERATION,
            max_speed: PLAYER_MAX_SPEED,
            body_radius: PLAYER_BODY_RADIUS,
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            min_step: COLLISION_MIN_STEP,
            step_factor: COLLISION_STEP_FACTOR,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            fire_rate: FIRE_RATE,
            projectile_speed: PLAYER_PROJECTILE_SPEED,
            projectile_lifetime: PLAYER_PROJECTILE_LIFETIME,
            damage: PLAYER_PROJECTILE_DAMAGE,
            projectile_radius: PLAYER_PROJECTILE_RADIUS,
            hit_radius: PLAYER_PROJECTILE_HIT_RADIUS,
            kill_score: KILL_SCORE,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            max_armor: PLAYER_MAX_ARMOR,
            magazine_size: MAGAZINE_SIZE,
            reserve_ammo: RESERVE_AMMO,
            reload_time: RELOAD_TIME,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_interval: ENEMY_SPAWN_INTERVAL,
            max_simultaneous: ENEMY_MAX_SIMULTANEOUS,
            default_type: DEFAULT_ARCHETYPE.to_string(),
            wave_intermission: WAVE_INTERMISSION,
            death_duration: DEATH_DURATION,
            body_radius: ENEMY_BODY_RADIUS,
            avoid_radius: AVOID_RADIUS,
            avoid_weight: AVOID_WEIGHT,
            patrol_strafe_weight: PATROL_STRAFE_WEIGHT,
            strafe_frequency: STRAFE_FREQUENCY,
            patrol_arrival_distance: PATROL_ARRIVAL_DISTANCE,
            attack_hysteresis: ATTACK_HYSTERESIS,
            melee_reach_bonus: MELEE_REACH_BONUS,
            projectile_hit_radius: ENEMY_PROJECTILE_HIT_RADIUS,
            projectile_radius: ENEMY_PROJECTILE_RADIUS,
            archetypes: reference_archetypes(),
            waves: reference_waves(),
            allowed_types: Vec::new(),
            difficulty: DifficultyConfig::default(),
        }
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            targets: DifficultyTargets::default(),
            scaling: DifficultyScaling::default(),
            min_modifier: DIFFICULTY_MIN_MODIFIER,
            max_modifier: DIFFICULTY_MAX_MODIFIER,
            smoothing: DIFFICULTY_SMOOTHING,
            max_ttk_samples: MAX_TTK_SAMPLES,
            drift_threshold: DIFFICULTY_DRIFT_THRESHOLD,
            bands: reference_bands(),
        }
    }
}

impl Default for DifficultyTargets {
    fn default() -> Self {
        Self {
            average_time_to_kill: TARGET_TIME_TO_KILL,
            health_ratio: TARGET_HEALTH_RATIO,
            ammo_spent_ratio: TARGET_AMMO_SPENT_RATIO,
        }
    }
}

impl Default for DifficultyScaling {
    fn default() -> Self {
        Self {
            time_to_kill: SCALING_TIME_TO_KILL,
            health: SCALING_HEALTH,
            ammo: SCALING_AMMO,
        }
    }
}

/// The five reference archetypes: grunt, ranger, skirmisher, brute, artillery.
pub fn reference_archetypes() -> BTreeMap<String, Archetype> {
    let melee = AttackKind::Melee;
    let entries = [
        (
            "grunt",
            Archetype {
                speed: 5.0,
                health: 60.0,
                aggro_range: 22.0,
                attack_range: 2.2,
                attack_damage: 12.0,
                attack_cooldown: 1.1,
                patrol_radius: 6.0,
                strafe_amplitude: 0.4,
                attack: melee,
            },
        ),
        (
            "ranger",
            Archetype {
                speed: 4.2,
                health: 45.0,
                aggro_range: 30.0,
                attack_range: 16.0,
                attack_damage: 9.0,
                attack_cooldown: 1.8,
                patrol_radius: 8.0,
                strafe_amplitude: 0.8,
                attack: AttackKind::Ranged {
                    projectile_speed: 28.0,
                    projectile_lifetime: 2.2,
                },
            },
        ),
        (
            "skirmisher",
            Archetype {
                speed: 7.5,
                health: 35.0,
                aggro_range: 26.0,
                attack_range: 1.8,
                attack_damage: 8.0,
                attack_cooldown: 0.7,
                patrol_radius: 10.0,
                strafe_amplitude: 1.4,
                attack: melee,
            },
        ),
        (
            "brute",
            Archetype {
                speed: 3.2,
                health: 160.0,
                aggro_range: 18.0,
                attack_range: 2.8,
                attack_damage: 28.0,
                attack_cooldown: 2.0,
                patrol_radius: 4.0,
                strafe_amplitude: 0.1,
                attack: melee,
            },
        ),
        (
            "artillery",
            Archetype {
                speed: 2.6,
                health: 70.0,
                aggro_range: 40.0,
                attack_range: 26.0,
                attack_damage: 18.0,
                attack_cooldown: 3.2,
                patrol_radius: 5.0,
                strafe_amplitude: 0.2,
                attack: AttackKind::Ranged {
                    projectile_speed: 20.0,
                    projectile_lifetime: 3.5,
                },
            },
        ),
    ];
    entries
        .into_iter()
        .map(|(name, archetype)| (name.to_string(), archetype))
        .collect()
}

/// Reference five-wave escalation.
pub fn reference_waves() -> Vec<WaveDefinition> {
    let wave = |count: u32, interval: f32, types: &[&str], intermission: Option<f32>| {
        WaveDefinition {
            count,
            spawn_interval: Some(interval),
            types: types.iter().map(|t| t.to_string()).collect(),
            intermission,
        }
    };
    vec![
        wave(4, 3.0, &["grunt"], None),
        wave(6, 2.6, &["grunt", "skirmisher"], None),
        wave(7, 2.4, &["grunt", "ranger", "skirmisher"], Some(8.0)),
        wave(8, 2.2, &["brute", "grunt", "ranger"], None),
        wave(10, 2.0, &["brute", "artillery", "ranger", "skirmisher"], None),
    ]
}

/// Reference partition of score space into three tiers.
pub fn reference_bands() -> Vec<DifficultyBand> {
    let band = |name: &str, min: Option<f32>, max: Option<f32>, allowed: &[&str]| {
        DifficultyBand {
            name: name.to_string(),
            min_score: min,
            max_score: max,
            allowed_archetypes: allowed.iter().map(|t| t.to_string()).collect(),
        }
    };
    vec![
        band("recovery", None, Some(-0.2), &["grunt", "skirmisher"]),
        band(
            "steady",
            Some(-0.2),
            Some(0.2),
            &["grunt", "ranger", "skirmisher"],
        ),
        band(
            "pressure",
            Some(0.2),
            None,
            &["grunt", "ranger", "skirmisher", "brute", "artillery"],
        ),
    ]
}
