//! Error types for configuration, level loading, telemetry delivery and
//! engine setup.

use std::path::PathBuf;

use thiserror::Error;

/// The tuning surface could not be read or is semantically invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The level description could not be loaded.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("unable to load level from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid level: {0}")]
    Invalid(String),
}

/// A telemetry sink failed to deliver a record.
#[derive(Debug, Error)]
#[error("telemetry sink `{sink}` failed: {detail}")]
pub struct SinkError {
    pub sink: &'static str,
    pub detail: String,
}

impl SinkError {
    pub fn new(sink: &'static str, detail: impl Into<String>) -> Self {
        Self {
            sink,
            detail: detail.into(),
        }
    }
}

/// The engine refused to start because its inputs were invalid.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelError),
}
