//! Level description supplied once at session start.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::WaveDefinition;
use crate::error::LevelError;
use crate::types::Obstacle;

/// Obstacle as authored: centre position plus full `[width, height, depth]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub position: [f32; 3],
    pub size: [f32; 3],
}

/// Static level data. Immutable for the session's duration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    pub enemy_spawn_points: Vec<[f32; 3]>,
    #[serde(default)]
    pub player_start: [f32; 3],
    /// Overrides the configured wave list when non-empty.
    #[serde(default)]
    pub waves: Vec<WaveDefinition>,
    /// Global archetype allow-list. Empty means every defined archetype.
    #[serde(default)]
    pub allowed_enemy_types: Vec<String>,
}

impl Level {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, obstacle) in self.obstacles.iter().enumerate() {
            let finite = obstacle
                .position
                .iter()
                .chain(obstacle.size.iter())
                .all(|v| v.is_finite());
            if !finite || obstacle.size.iter().any(|&s| s <= 0.0) {
                return Err(LevelError::Invalid(format!(
                    "obstacle {index} must have a finite position and positive size"
                )));
            }
        }
        Ok(())
    }

    /// Obstacle bounds in world space.
    pub fn obstacle_bounds(&self) -> Vec<Obstacle> {
        self.obstacles
            .iter()
            .map(|o| Obstacle::from_center_size(Vec3::from(o.position), Vec3::from(o.size)))
            .collect()
    }

    pub fn spawn_points(&self) -> Vec<Vec3> {
        self.enemy_spawn_points.iter().copied().map(Vec3::from).collect()
    }

    pub fn player_start(&self) -> Vec3 {
        Vec3::from(self.player_start)
    }
}
