//! Closed-loop difficulty controller.
//!
//! Scores the player's recent performance each tick from three metrics
//! (average time-to-kill, remaining health+armor, ammunition spent), eases a
//! bounded modifier toward `1 + score`, and picks a band of allowed
//! archetypes. The scheduler reshapes each wave through [`apply_to_wave`].
//!
//! [`apply_to_wave`]: DifficultyController::apply_to_wave

use std::collections::{HashMap, VecDeque};

use breach_core::config::{DifficultyBand, DifficultyConfig, WaveDefinition};
use breach_core::events::TelemetryEvent;
use breach_core::state::DifficultyView;
use breach_core::types::AgentId;

/// Denominator floor for ratio-based score terms.
const MIN_TARGET: f32 = 0.01;

/// Player state the controller scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerVitals {
    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
    pub max_armor: f32,
    /// Rounds left in magazine and reserve combined.
    pub ammo_remaining: u32,
}

/// Situation the controller reports alongside notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DifficultyContext {
    pub wave_index: Option<usize>,
    pub enemies_alive: usize,
}

/// Raw performance measurements for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyMetrics {
    pub average_time_to_kill: f32,
    pub health_ratio: f32,
    pub ammo_spent_ratio: f32,
}

/// A wave after the modifier and band have been applied. Recomputed every
/// tick, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedWave {
    pub count: u32,
    pub spawn_interval: f32,
    pub types: Vec<String>,
}

pub struct DifficultyController {
    config: DifficultyConfig,
    default_spawn_interval: f32,
    samples: VecDeque<f32>,
    modifier: f32,
    raw_score: f32,
    band: DifficultyBand,
    spawn_times: HashMap<AgentId, f64>,
    initial_ammo: Option<u32>,
}

impl DifficultyController {
    /// `default_spawn_interval` paces waves that leave their interval unset.
    pub fn new(config: DifficultyConfig, default_spawn_interval: f32) -> Self {
        let modifier = 1.0_f32.clamp(config.min_modifier, config.max_modifier);
        let band = resolve_in(&config.bands, 0.0);
        Self {
            samples: VecDeque::with_capacity(config.max_ttk_samples),
            config,
            default_spawn_interval,
            modifier,
            raw_score: 0.0,
            band,
            spawn_times: HashMap::new(),
            initial_ammo: None,
        }
    }

    pub fn modifier(&self) -> f32 {
        self.modifier
    }

    pub fn band(&self) -> &DifficultyBand {
        &self.band
    }

    pub fn raw_score(&self) -> f32 {
        self.raw_score
    }

    /// Time-to-kill samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    /// Agents spawned but not yet reported killed.
    pub fn tracked(&self) -> usize {
        self.spawn_times.len()
    }

    pub fn track_spawn(&mut self, id: AgentId, spawned_at: f64) {
        self.spawn_times.insert(id, spawned_at);
    }

    /// Record the time-to-kill of `id`, evicting the oldest sample past the
    /// cap. Returns the sample, or `None` for an agent never tracked.
    pub fn track_kill(&mut self, id: AgentId, killed_at: f64) -> Option<f32> {
        let spawned_at = self.spawn_times.remove(&id)?;
        let sample = (killed_at - spawned_at).max(0.0) as f32;
        while self.samples.len() >= self.config.max_ttk_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        Some(sample)
    }

    pub fn calculate_metrics(&self, vitals: &PlayerVitals) -> DifficultyMetrics {
        let targets = &self.config.targets;

        let average_time_to_kill = if self.samples.is_empty() {
            targets.average_time_to_kill
        } else {
            self.samples.iter().sum::<f32>() / self.samples.len() as f32
        };

        let vitals_max = vitals.max_health + vitals.max_armor;
        let health_ratio = if vitals_max > 0.0 {
            ((vitals.health + vitals.armor) / vitals_max).clamp(0.0, 1.0)
        } else {
            targets.health_ratio
        };

        let ammo_spent_ratio = match self.initial_ammo {
            Some(initial) if initial > 0 => {
                let spent = initial.saturating_sub(vitals.ammo_remaining) as f32;
                (spent / initial as f32).clamp(0.0, 1.0)
            }
            _ => targets.ammo_spent_ratio,
        };

        DifficultyMetrics {
            average_time_to_kill,
            health_ratio,
            ammo_spent_ratio,
        }
    }

    /// Signed performance score; positive means the player is doing well.
    pub fn score(&self, metrics: &DifficultyMetrics) -> f32 {
        let targets = &self.config.targets;
        let scaling = &self.config.scaling;

        let ttk_target = [targets.average_time_to_kill, metrics.average_time_to_kill]
            .into_iter()
            .find(|&t| t > 0.0)
            .unwrap_or(1.0);
        let ttk_score =
            (ttk_target - metrics.average_time_to_kill) / ttk_target * scaling.time_to_kill;
        let health_score = (metrics.health_ratio - targets.health_ratio)
            / targets.health_ratio.max(MIN_TARGET)
            * scaling.health;
        let ammo_score = (targets.ammo_spent_ratio - metrics.ammo_spent_ratio)
            / targets.ammo_spent_ratio.max(MIN_TARGET)
            * scaling.ammo;

        ttk_score + health_score + ammo_score
    }

    /// First configured band whose `[min, max)` range holds `score`, or the
    /// unrestricted baseline.
    pub fn resolve_band(&self, score: f32) -> DifficultyBand {
        resolve_in(&self.config.bands, score)
    }

    /// Re-score the player and ease the modifier toward its new target.
    ///
    /// Returns a notification when the band changed, or when the modifier
    /// moved past the drift threshold within its band.
    pub fn update(
        &mut self,
        vitals: &PlayerVitals,
        context: &DifficultyContext,
    ) -> Option<TelemetryEvent> {
        self.initial_ammo.get_or_insert(vitals.ammo_remaining);

        let metrics = self.calculate_metrics(vitals);
        let raw_score = self.score(&metrics);
        let target = (1.0 + raw_score).clamp(self.config.min_modifier, self.config.max_modifier);

        let previous = self.modifier;
        self.modifier = (previous + (target - previous) * self.config.smoothing)
            .clamp(self.config.min_modifier, self.config.max_modifier);
        self.raw_score = raw_score;

        let band = self.resolve_band(raw_score);
        if band.name != self.band.name {
            let band_from = std::mem::replace(&mut self.band, band).name;
            return Some(TelemetryEvent::DifficultyBandChanged {
                band_from,
                band_to: self.band.name.clone(),
                modifier: self.modifier,
                health_ratio: metrics.health_ratio,
                average_time_to_kill: metrics.average_time_to_kill,
                ammo_spent_ratio: metrics.ammo_spent_ratio,
                wave_index: context.wave_index,
                enemies_alive: context.enemies_alive,
            });
        }

        if (self.modifier - previous).abs() > self.config.drift_threshold {
            return Some(TelemetryEvent::DifficultyModifierDrift {
                modifier: self.modifier,
                health_ratio: metrics.health_ratio,
                average_time_to_kill: metrics.average_time_to_kill,
                ammo_spent_ratio: metrics.ammo_spent_ratio,
                wave_index: context.wave_index,
                enemies_alive: context.enemies_alive,
            });
        }
        None
    }

    /// Derive this tick's version of `wave`.
    ///
    /// `allowed_types` is the session allow-list; it stands in for unset wave
    /// types and for a band with no archetype restriction.
    pub fn apply_to_wave(&self, wave: &WaveDefinition, allowed_types: &[String]) -> AdjustedWave {
        let types: &[String] = if wave.types.is_empty() {
            allowed_types
        } else {
            &wave.types
        };
        let gate: &[String] = if self.band.allowed_archetypes.is_empty() {
            allowed_types
        } else {
            &self.band.allowed_archetypes
        };

        let filtered: Vec<String> = types
            .iter()
            .filter(|t| gate.is_empty() || gate.contains(t))
            .cloned()
            .collect();
        let types = if filtered.is_empty() {
            types.to_vec()
        } else {
            filtered
        };

        let base_interval = wave
            .spawn_interval
            .filter(|&i| i > 0.0)
            .or(Some(self.default_spawn_interval).filter(|&i| i > 0.0))
            .unwrap_or(1.0);

        AdjustedWave {
            count: ((wave.count as f32 * self.modifier).round() as u32).max(1),
            spawn_interval: base_interval / self.modifier,
            types,
        }
    }

    pub fn view(&self) -> DifficultyView {
        DifficultyView {
            modifier: self.modifier,
            band: self.band.name.clone(),
            raw_score: self.raw_score,
            ttk_samples: self.samples.len(),
        }
    }
}

fn resolve_in(bands: &[DifficultyBand], score: f32) -> DifficultyBand {
    bands
        .iter()
        .find(|band| band.contains(score))
        .cloned()
        .unwrap_or_else(DifficultyBand::baseline)
}
