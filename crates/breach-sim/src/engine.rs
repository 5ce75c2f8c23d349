//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world of enemy agents, the player, the
//! wave schedule and the difficulty controller, runs every system in a
//! fixed order once per tick and returns an `ArenaSnapshot`. Completely
//! headless, so a seeded run is reproducible.

use hecs::{Entity, World};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use breach_core::commands::PlayerInput;
use breach_core::config::GameConfig;
use breach_core::enums::TelemetryLevel;
use breach_core::error::SetupError;
use breach_core::events::{PresentationEvent, TelemetryEvent};
use breach_core::level::Level;
use breach_core::state::ArenaSnapshot;
use breach_core::types::{Obstacle, SimTime};
use glam::Vec3;

use crate::difficulty::{DifficultyContext, DifficultyController};
use crate::player::PlayerState;
use crate::systems;
use crate::systems::enemy_ai::AgentTick;
use crate::systems::wave_scheduler::{SpawnContext, WaveScheduler};
use crate::telemetry::{session_id_from, LogSink, Telemetry, TelemetrySink};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    config: GameConfig,
    obstacles: Vec<Obstacle>,
    spawn_points: Vec<Vec3>,
    scheduler: WaveScheduler,
    difficulty: DifficultyController,
    player: PlayerState,
    input: PlayerInput,
    reload_held: bool,
    telemetry: Telemetry,
    presentation: Vec<PresentationEvent>,
    despawn_buffer: Vec<Entity>,
    next_agent_id: u32,
    next_projectile_id: u32,
}

impl SimulationEngine {
    /// Create an engine reporting telemetry to the log.
    pub fn new(sim: SimConfig, config: GameConfig, level: Level) -> Result<Self, SetupError> {
        Self::with_sinks(sim, config, level, vec![Box::new(LogSink)])
    }

    /// Create an engine reporting telemetry to `sinks`. The config and
    /// level are validated first; nothing is built from invalid input.
    pub fn with_sinks(
        sim: SimConfig,
        config: GameConfig,
        level: Level,
        sinks: Vec<Box<dyn TelemetrySink>>,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        level.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(sim.seed);
        let session_id = session_id_from(rng.next_u64());

        let mut telemetry = Telemetry::new(session_id.clone(), level.name.clone());
        for sink in sinks {
            telemetry.add_sink(sink);
        }

        let waves = if level.waves.is_empty() {
            config.enemies.waves.clone()
        } else {
            level.waves.clone()
        };
        let allowed_types = if level.allowed_enemy_types.is_empty() {
            config.enemies.allowed_types.clone()
        } else {
            level.allowed_enemy_types.clone()
        };
        let mut scheduler = WaveScheduler::default();
        scheduler.configure(waves, allowed_types, config.enemies.wave_intermission);

        let difficulty = DifficultyController::new(
            config.enemies.difficulty.clone(),
            config.enemies.spawn_interval,
        );
        let player = PlayerState::new(level.player_start(), &config.player);

        let time = SimTime::default();
        log::info!(
            "session {session_id} on `{}`: {} obstacles, {} spawn points, {} waves",
            level.name,
            level.obstacles.len(),
            level.enemy_spawn_points.len(),
            scheduler.total_waves()
        );
        telemetry.breadcrumb("session started");
        telemetry.emit(
            TelemetryLevel::Info,
            "session",
            &time,
            TelemetryEvent::SessionStarted {
                session_id,
                level_name: level.name.clone(),
            },
        );

        Ok(Self {
            world: World::new(),
            time,
            rng,
            obstacles: level.obstacle_bounds(),
            spawn_points: level.spawn_points(),
            config,
            scheduler,
            difficulty,
            player,
            input: PlayerInput::default(),
            reload_held: false,
            telemetry,
            presentation: Vec::new(),
            despawn_buffer: Vec::new(),
            next_agent_id: 0,
            next_projectile_id: 0,
        })
    }

    /// Register another telemetry sink.
    pub fn add_sink(&mut self, sink: Box<dyn TelemetrySink>) {
        self.telemetry.add_sink(sink);
    }

    /// Input sampled for the next tick. Holds until replaced.
    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> ArenaSnapshot {
        let dt = dt.max(0.0);
        self.time.advance(dt);
        self.run_systems(dt);

        let presentation = std::mem::take(&mut self.presentation);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.scheduler,
            &self.difficulty,
            &self.player,
            self.config.enemies.death_duration,
            presentation,
        )
    }

    /// Current state without advancing. Carries no presentation deltas.
    pub fn snapshot(&self) -> ArenaSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.scheduler,
            &self.difficulty,
            &self.player,
            self.config.enemies.death_duration,
            Vec::new(),
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn difficulty(&self) -> &DifficultyController {
        &self.difficulty
    }

    pub fn session_id(&self) -> &str {
        self.telemetry.session_id()
    }

    /// Telemetry deliveries dropped because a sink failed.
    pub fn telemetry_failures(&self) -> u64 {
        self.telemetry.failures()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// Deal `damage` to the agent with `id` as a player hit would.
    #[cfg(test)]
    pub(crate) fn damage_agent(
        &mut self,
        id: breach_core::types::AgentId,
        damage: f32,
    ) -> systems::enemy_ai::AgentDamage {
        use breach_core::components::{Agent, AgentBrain, Health};
        let now = self.time.elapsed_secs;
        let death_duration = self.config.enemies.death_duration;
        for (_entity, (agent, health, brain)) in
            self.world.query_mut::<(&Agent, &mut Health, &mut AgentBrain)>()
        {
            if agent.id == id {
                return systems::enemy_ai::apply_damage(health, brain, damage, now, death_duration);
            }
        }
        systems::enemy_ai::AgentDamage::Ignored
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Schedule timers and phase changes
        self.scheduler.advance(dt, &mut self.telemetry, &self.time);

        // 2. Difficulty scoring
        let context = DifficultyContext {
            wave_index: self.scheduler.active_index(),
            enemies_alive: systems::live_agents(&self.world),
        };
        if let Some(event) = self.difficulty.update(&self.player.vitals(), &context) {
            let level = match event {
                TelemetryEvent::DifficultyBandChanged { ref band_to, .. } => {
                    self.telemetry.breadcrumb(format!("band {band_to}"));
                    TelemetryLevel::Info
                }
                _ => TelemetryLevel::Debug,
            };
            self.telemetry.emit(level, "difficulty", &self.time, event);
        }

        // 3. Retire despawned agents (commits time-to-kill)
        systems::wave_scheduler::retire(
            &mut self.world,
            dt,
            &mut self.difficulty,
            &mut self.despawn_buffer,
            &mut self.presentation,
        );

        // 4. Spawn
        systems::wave_scheduler::spawn(
            &mut self.world,
            &mut self.rng,
            &mut self.scheduler,
            &mut self.difficulty,
            &mut self.next_agent_id,
            &SpawnContext {
                enemies: &self.config.enemies,
                spawn_points: &self.spawn_points,
                time: &self.time,
            },
            &mut self.presentation,
        );

        // 5. Wave clearance
        self.scheduler.check_completion(
            systems::live_agents(&self.world),
            &self.difficulty,
            &mut self.telemetry,
            &self.time,
        );

        // 6. Agent behaviour, movement and melee
        let melee = systems::enemy_ai::run(
            &mut self.world,
            &mut self.rng,
            &AgentTick {
                enemies: &self.config.enemies,
                collision: &self.config.collision,
                obstacles: &self.obstacles,
                player_position: self.player.position,
                time: &self.time,
                dt,
            },
            &mut self.next_projectile_id,
            &mut self.presentation,
        );
        for hit in melee {
            self.damage_player(hit.damage);
        }

        // 7. Agent projectiles
        let shots = systems::projectiles::run_enemy(
            &mut self.world,
            self.player.position,
            &self.config.enemies,
            &self.obstacles,
            &self.time,
            dt,
            &mut self.presentation,
        );
        for damage in shots {
            self.damage_player(damage);
        }

        // 8. Player
        let reload_pressed = self.input.reload && !self.reload_held;
        self.reload_held = self.input.reload;
        systems::player::run(
            &mut self.player,
            &self.input,
            reload_pressed,
            &self.config,
            &self.obstacles,
            &self.time,
            dt,
            &mut self.next_projectile_id,
            &mut self.presentation,
        );

        // 9. Player projectiles
        let kills = systems::projectiles::run_player(
            &mut self.world,
            &mut self.player.projectiles,
            &self.config.combat,
            self.config.enemies.death_duration,
            &self.obstacles,
            &self.time,
            dt,
            &mut self.presentation,
        );
        for id in kills {
            self.player.score += self.config.combat.kill_score;
            log::debug!("{id:?} killed, score {}", self.player.score);
        }
    }

    fn damage_player(&mut self, damage: f32) {
        let report = self.player.take_damage(damage);
        if report.absorbed_by_armor + report.absorbed_by_health <= 0.0 {
            return;
        }
        self.presentation.push(PresentationEvent::PlayerHit { damage });
        if report.killed {
            let wave_number = self.scheduler.view(0).wave_number;
            log::warn!("player died with score {}", self.player.score);
            self.telemetry.breadcrumb("player died");
            self.telemetry.emit(
                TelemetryLevel::Warn,
                "player",
                &self.time,
                TelemetryEvent::PlayerDied {
                    score: self.player.score,
                    wave_number,
                },
            );
        }
    }
}
