//! Session inputs: tuning file and level description.

use std::path::Path;

use breach_core::config::GameConfig;
use breach_core::enums::TelemetryLevel;
use breach_core::error::{ConfigError, LevelError};
use breach_core::events::{TelemetryEvent, TelemetryRecord};
use breach_core::level::Level;
use breach_sim::telemetry::{LogSink, TelemetrySink};

/// Level used when no `--level` is given.
pub const TRAINING_GROUND: &str = include_str!("../assets/training_ground.json");

/// Reference tuning, or the file at `path` layered over it.
pub fn load_config(path: Option<&Path>) -> Result<GameConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = GameConfig::load(path)?;
            log::info!("loaded tuning from {}", path.display());
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Load the level at `path`, or the built-in training ground.
///
/// A failure is logged and reported as a `LevelLoadFailed` telemetry
/// record before it is returned.
pub fn load_level(path: Option<&Path>) -> Result<Level, LevelError> {
    let result = match path {
        Some(path) => Level::load(path),
        None => Level::from_json_str(TRAINING_GROUND),
    };
    if let Err(err) = &result {
        let source = path.map_or_else(|| "<built-in>".to_string(), |p| p.display().to_string());
        log::error!("{err}");
        report_level_failure(&mut LogSink, &source, err);
    }
    result
}

/// Send a `LevelLoadFailed` record to `sink`. No session exists yet, so
/// the record carries an empty session id.
pub fn report_level_failure(sink: &mut dyn TelemetrySink, path: &str, err: &LevelError) {
    let record = TelemetryRecord {
        level: TelemetryLevel::Error,
        module: "level",
        tick: 0,
        elapsed_secs: 0.0,
        session_id: String::new(),
        level_name: path.to_string(),
        breadcrumbs: Vec::new(),
        event: TelemetryEvent::LevelLoadFailed {
            path: path.to_string(),
            reason: err.to_string(),
        },
    };
    if let Err(sink_err) = sink.emit(&record) {
        log::warn!("{sink_err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breach_sim::telemetry::RecordingSink;

    #[test]
    fn test_training_ground_is_valid() {
        let level = load_level(None).unwrap();
        assert_eq!(level.name, "training_ground");
        assert_eq!(level.enemy_spawn_points.len(), 5);
        assert!(level.waves.is_empty());
        assert!(level.obstacle_bounds().iter().all(|o| o.min.cmplt(o.max).all()));
    }

    #[test]
    fn test_missing_level_file_is_an_error() {
        let err = load_level(Some(Path::new("/nonexistent/arena.json"))).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    #[test]
    fn test_level_failure_is_reported() {
        let recorder = RecordingSink::new();
        let err = Level::from_json_str("{ not json").unwrap_err();
        report_level_failure(&mut recorder.clone(), "arena.json", &err);

        let records = recorder.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, TelemetryLevel::Error);
        assert!(matches!(
            records[0].event,
            TelemetryEvent::LevelLoadFailed { ref path, .. } if path == "arena.json"
        ));
    }

    #[test]
    fn test_default_config_without_path() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }
}
