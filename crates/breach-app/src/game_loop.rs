//! Frame loop: feeds autopilot input to the engine and ticks it.
//!
//! Runs as fast as possible by default. In realtime mode each frame is
//! paced to `dt` of wall-clock time, resetting the schedule when the loop
//! falls too far behind instead of trying to catch up.

use std::time::{Duration, Instant};

use breach_core::events::PresentationEvent;
use breach_core::state::ArenaSnapshot;
use breach_sim::engine::SimulationEngine;

use crate::autopilot::Autopilot;

/// How long and how fast to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopOptions {
    /// Upper bound on frames; the run also ends on player death or when
    /// every wave is cleared.
    pub max_ticks: u64,
    /// Seconds of simulation per frame.
    pub dt: f32,
    pub realtime: bool,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub score: u32,
    pub kills: u32,
    pub player_alive: bool,
    pub schedule_complete: bool,
    pub wave_number: Option<usize>,
    pub total_waves: usize,
    pub difficulty_band: String,
    pub difficulty_modifier: f32,
}

impl RunSummary {
    fn from_snapshot(ticks: u64, kills: u32, snapshot: &ArenaSnapshot) -> Self {
        Self {
            ticks,
            elapsed_secs: snapshot.time.elapsed_secs,
            score: snapshot.player.score,
            kills,
            player_alive: snapshot.player.alive,
            schedule_complete: snapshot.schedule.complete,
            wave_number: snapshot.schedule.wave_number,
            total_waves: snapshot.schedule.total_waves,
            difficulty_band: snapshot.difficulty.band.clone(),
            difficulty_modifier: snapshot.difficulty.modifier,
        }
    }

    pub fn log(&self) {
        let outcome = match (self.player_alive, self.schedule_complete) {
            (_, true) => "cleared",
            (false, _) => "died",
            (true, false) => "time up",
        };
        log::info!(
            "{outcome} after {} ticks ({:.1}s): score {}, {} kills, wave {}/{}",
            self.ticks,
            self.elapsed_secs,
            self.score,
            self.kills,
            self.wave_number.unwrap_or(0),
            self.total_waves
        );
        log::info!(
            "difficulty band `{}` at modifier {:.3}",
            self.difficulty_band,
            self.difficulty_modifier
        );
    }
}

/// Wall-clock duration of one frame.
pub fn frame_duration(dt: f32) -> Duration {
    Duration::from_secs_f32(dt.max(0.0))
}

/// Drive `engine` until the run ends.
pub fn run(engine: &mut SimulationEngine, autopilot: &mut Autopilot, options: &LoopOptions) -> RunSummary {
    let frame = frame_duration(options.dt);
    let mut next_frame = Instant::now();
    let mut snapshot = engine.snapshot();
    let mut ticks = 0;
    let mut kills = 0;

    while ticks < options.max_ticks {
        engine.set_input(autopilot.next_input(&snapshot));
        snapshot = engine.tick(options.dt);
        ticks += 1;

        kills += snapshot
            .presentation
            .iter()
            .filter(|event| matches!(event, PresentationEvent::AgentDied { .. }))
            .count() as u32;

        if !snapshot.player.alive || snapshot.schedule.complete {
            break;
        }

        if options.realtime {
            next_frame += frame;
            let now = Instant::now();
            if next_frame > now {
                std::thread::sleep(next_frame - now);
            } else if now - next_frame > frame * 2 {
                // Too far behind; drop the backlog.
                next_frame = now;
            }
        }
    }

    RunSummary::from_snapshot(ticks, kills, &snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use breach_core::config::{GameConfig, WaveDefinition};
    use breach_core::level::Level;
    use breach_sim::engine::SimConfig;

    use crate::setup;

    fn options(max_ticks: u64) -> LoopOptions {
        LoopOptions {
            max_ticks,
            dt: 1.0 / 60.0,
            realtime: false,
        }
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(0.5), Duration::from_millis(500));
        assert_eq!(frame_duration(-1.0), Duration::ZERO);
    }

    #[test]
    fn test_run_stops_at_tick_limit() {
        let level = setup::load_level(None).unwrap();
        let mut engine = SimulationEngine::new(SimConfig::default(), GameConfig::default(), level).unwrap();
        let summary = run(&mut engine, &mut Autopilot::new(), &options(120));

        assert_eq!(summary.ticks, 120);
        assert!((summary.elapsed_secs - 2.0).abs() < 1e-3);
        assert_eq!(summary.total_waves, 5);
        assert_eq!(summary.wave_number, Some(1));
    }

    #[test]
    fn test_autopilot_clears_a_single_grunt() {
        let mut config = GameConfig::default();
        config.enemies.waves = vec![WaveDefinition {
            count: 1,
            spawn_interval: Some(1.0),
            types: vec!["grunt".into()],
            intermission: None,
        }];
        config.enemies.difficulty.min_modifier = 1.0;
        config.enemies.difficulty.max_modifier = 1.0;
        let level = Level {
            name: "range".into(),
            enemy_spawn_points: vec![[0.0, 0.0, -15.0]],
            ..Level::default()
        };
        let mut engine = SimulationEngine::new(SimConfig { seed: 3 }, config, level).unwrap();

        let summary = run(&mut engine, &mut Autopilot::new(), &options(60 * 60));
        assert!(summary.schedule_complete);
        assert!(summary.player_alive);
        assert_eq!(summary.kills, 1);
        assert_eq!(summary.score, 100);
        assert!(summary.ticks < 60 * 60);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let level = setup::load_level(None).unwrap();
        let mut engine = SimulationEngine::new(SimConfig::default(), GameConfig::default(), level).unwrap();
        run(&mut engine, &mut Autopilot::new(), &options(300));

        let snapshot = engine.snapshot();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}
