//! Wave scheduler: paces spawns, waits for clearance, runs intermissions.
//!
//! Idle -> WaveActive -> Intermission -> WaveActive -> ... -> Complete.
//! The engine drives it in three steps per tick: [`WaveScheduler::advance`]
//! before difficulty scoring, then [`retire`] and [`spawn`], then
//! [`WaveScheduler::check_completion`].

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use breach_core::components::{Agent, AgentBrain, Arsenal, Health, Transform};
use breach_core::config::{EnemyConfig, WaveDefinition};
use breach_core::enums::{AgentState, SchedulePhase, TelemetryLevel, VisualKind};
use breach_core::events::{EntityRef, PresentationEvent, TelemetryEvent};
use breach_core::state::ScheduleView;
use breach_core::types::{AgentId, SimTime};
use breach_enemy_ai::profiles::{resolve_archetype, spawn_pool};
use glam::Vec3;

use crate::difficulty::{AdjustedWave, DifficultyController};
use crate::telemetry::Telemetry;

const MODULE: &str = "waves";

/// Ordered wave list and progress through it.
#[derive(Debug, Clone, Default)]
pub struct WaveScheduler {
    waves: Vec<WaveDefinition>,
    allowed_types: Vec<String>,
    default_intermission: f32,
    phase: SchedulePhase,
    spawned_this_wave: u32,
    spawn_timer: f32,
    /// Wave whose missing spawn points were already reported.
    stall_reported: Option<usize>,
    last_wave: Option<usize>,
}

impl WaveScheduler {
    /// Load a wave list. Resets all progress.
    pub fn configure(
        &mut self,
        waves: Vec<WaveDefinition>,
        allowed_types: Vec<String>,
        default_intermission: f32,
    ) {
        *self = Self {
            waves,
            allowed_types,
            default_intermission,
            ..Self::default()
        };
    }

    pub fn phase(&self) -> SchedulePhase {
        self.phase
    }

    pub fn total_waves(&self) -> usize {
        self.waves.len()
    }

    pub fn spawned_this_wave(&self) -> u32 {
        self.spawned_this_wave
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    /// Index of the wave being fought, if any.
    pub fn active_index(&self) -> Option<usize> {
        match self.phase {
            SchedulePhase::WaveActive { index } => Some(index),
            _ => None,
        }
    }

    /// The active wave after difficulty adjustment.
    pub fn adjusted_wave(&self, difficulty: &DifficultyController) -> Option<AdjustedWave> {
        let index = self.active_index()?;
        let wave = self.waves.get(index)?;
        Some(difficulty.apply_to_wave(wave, &self.allowed_types))
    }

    /// Count timers down and move between phases.
    pub fn advance(&mut self, dt: f32, telemetry: &mut Telemetry, time: &SimTime) {
        self.spawn_timer -= dt;

        match self.phase {
            SchedulePhase::Idle if !self.waves.is_empty() => {
                self.start_wave(0, telemetry, time);
            }
            SchedulePhase::Intermission {
                next_index,
                remaining_secs,
            } => {
                let remaining_secs = (remaining_secs - dt).max(0.0);
                self.phase = SchedulePhase::Intermission {
                    next_index,
                    remaining_secs,
                };
                telemetry.emit(
                    TelemetryLevel::Debug,
                    MODULE,
                    time,
                    TelemetryEvent::Intermission {
                        next_wave_number: next_index + 1,
                        total_waves: self.waves.len(),
                        remaining_secs,
                    },
                );
                if remaining_secs <= 0.0 {
                    self.start_wave(next_index, telemetry, time);
                }
            }
            _ => {}
        }
    }

    fn start_wave(&mut self, index: usize, telemetry: &mut Telemetry, time: &SimTime) {
        self.phase = SchedulePhase::WaveActive { index };
        self.spawned_this_wave = 0;
        self.spawn_timer = 0.0;
        self.last_wave = Some(index);

        let target_count = self.waves.get(index).map_or(0, |wave| wave.count);
        log::info!("wave {} of {} started", index + 1, self.waves.len());
        telemetry.breadcrumb(format!("wave {} started", index + 1));
        telemetry.emit(
            TelemetryLevel::Info,
            MODULE,
            time,
            TelemetryEvent::WaveStarted {
                wave_number: index + 1,
                total_waves: self.waves.len(),
                target_count,
            },
        );
    }

    /// Finish the active wave once its quota is spawned and nothing is left
    /// alive. Returns true when the wave finished this call.
    pub fn check_completion(
        &mut self,
        live_agents: usize,
        difficulty: &DifficultyController,
        telemetry: &mut Telemetry,
        time: &SimTime,
    ) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        let Some(adjusted) = self.adjusted_wave(difficulty) else {
            return false;
        };
        if self.spawned_this_wave < adjusted.count || live_agents > 0 {
            return false;
        }

        let total_waves = self.waves.len();
        telemetry.breadcrumb(format!("wave {} completed", index + 1));
        telemetry.emit(
            TelemetryLevel::Info,
            MODULE,
            time,
            TelemetryEvent::WaveCompleted {
                wave_number: index + 1,
                total_waves,
            },
        );

        if index + 1 >= total_waves {
            self.phase = SchedulePhase::Complete;
            log::info!("all {total_waves} waves cleared");
            telemetry.emit(
                TelemetryLevel::Info,
                MODULE,
                time,
                TelemetryEvent::ScheduleCompleted { total_waves },
            );
        } else {
            let remaining_secs = self.waves[index]
                .intermission
                .unwrap_or(self.default_intermission)
                .max(0.0);
            self.phase = SchedulePhase::Intermission {
                next_index: index + 1,
                remaining_secs,
            };
        }
        true
    }

    pub fn view(&self, enemies_alive: usize) -> ScheduleView {
        ScheduleView {
            phase: self.phase,
            wave_number: self.last_wave.map(|index| index + 1),
            total_waves: self.waves.len(),
            spawned_this_wave: self.spawned_this_wave,
            enemies_alive,
            intermission_remaining_secs: match self.phase {
                SchedulePhase::Intermission { remaining_secs, .. } => remaining_secs,
                _ => 0.0,
            },
            complete: self.phase == SchedulePhase::Complete,
        }
    }
}

/// Shared inputs for [`spawn`].
pub struct SpawnContext<'a> {
    pub enemies: &'a EnemyConfig,
    pub spawn_points: &'a [Vec3],
    pub time: &'a SimTime,
}

/// Spawn one agent if the active wave is due one.
pub fn spawn(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut WaveScheduler,
    difficulty: &mut DifficultyController,
    next_agent_id: &mut u32,
    ctx: &SpawnContext,
    presentation: &mut Vec<PresentationEvent>,
) -> Option<AgentId> {
    let index = scheduler.active_index()?;
    let adjusted = scheduler.adjusted_wave(difficulty)?;

    let live = super::live_agents(world);
    if scheduler.spawn_timer > 0.0
        || scheduler.spawned_this_wave >= adjusted.count
        || live >= ctx.enemies.max_simultaneous
    {
        return None;
    }

    if ctx.spawn_points.is_empty() {
        if scheduler.stall_reported != Some(index) {
            scheduler.stall_reported = Some(index);
            log::warn!("wave {} cannot spawn: level has no spawn points", index + 1);
        }
        return None;
    }

    let point = ctx.spawn_points[rng.gen_range(0..ctx.spawn_points.len())];
    let archetype_name = pick_archetype(rng, &adjusted.types, &scheduler.allowed_types, ctx.enemies);
    let (resolved_name, archetype) = resolve_archetype(&archetype_name, ctx.enemies)?;
    let (resolved_name, archetype) = (resolved_name.to_string(), archetype.clone());

    let id = AgentId(*next_agent_id);
    *next_agent_id += 1;
    let now = ctx.time.elapsed_secs;

    let health = archetype.health;
    world.spawn((
        Agent {
            id,
            archetype_name: resolved_name.clone(),
            archetype,
        },
        Transform {
            position: point,
            yaw: 0.0,
        },
        Health {
            current: health,
            max: health,
        },
        AgentBrain {
            state: AgentState::Patrol,
            state_entered_at: now,
            spawn_point: point,
            spawned_at: now,
            patrol_target: None,
            attack_cooldown: 0.0,
            death_timer: 0.0,
            died_at: None,
            provoked: false,
        },
        Arsenal::default(),
    ));

    difficulty.track_spawn(id, now);
    scheduler.spawn_timer = adjusted.spawn_interval;
    scheduler.spawned_this_wave += 1;

    log::debug!("spawned {resolved_name} {:?} at {point}", id);
    presentation.push(PresentationEvent::SpawnVisual {
        entity: Some(EntityRef::Agent(id)),
        visual: VisualKind::Agent {
            archetype: resolved_name,
        },
        position: point,
    });
    Some(id)
}

/// Uniform pick from the wave's eligible archetypes, or the default.
pub fn pick_archetype(
    rng: &mut ChaCha8Rng,
    wave_types: &[String],
    global_allowed: &[String],
    enemies: &EnemyConfig,
) -> String {
    let pool = spawn_pool(wave_types, global_allowed, enemies);
    pool[rng.gen_range(0..pool.len())].clone()
}

/// Count dead agents' despawn timers down and purge the expired ones,
/// committing their time-to-kill. Returns how many were purged.
pub fn retire(
    world: &mut World,
    dt: f32,
    difficulty: &mut DifficultyController,
    despawn_buffer: &mut Vec<Entity>,
    presentation: &mut Vec<PresentationEvent>,
) -> usize {
    despawn_buffer.clear();
    let mut killed: Vec<(AgentId, f64, Vec<EntityRef>)> = Vec::new();

    for (entity, (agent, brain, arsenal)) in
        world.query_mut::<(&Agent, &mut AgentBrain, &Arsenal)>()
    {
        if brain.state != AgentState::Dead {
            continue;
        }
        brain.death_timer = (brain.death_timer - dt).max(0.0);
        if brain.death_timer <= 0.0 {
            despawn_buffer.push(entity);
            let died_at = brain.died_at.unwrap_or(brain.spawned_at);
            let orphans = arsenal
                .projectiles
                .iter()
                .map(|p| EntityRef::Projectile(p.id))
                .collect();
            killed.push((agent.id, died_at, orphans));
        }
    }

    for (id, died_at, orphans) in killed {
        difficulty.track_kill(id, died_at);
        presentation.push(PresentationEvent::Remove {
            entity: EntityRef::Agent(id),
        });
        presentation.extend(
            orphans
                .into_iter()
                .map(|entity| PresentationEvent::Remove { entity }),
        );
    }

    let purged = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    purged
}
