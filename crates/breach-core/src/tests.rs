#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::config::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::level::Level;
    use crate::state::ArenaSnapshot;
    use crate::types::{planar_distance, Obstacle, SimTime};

    #[test]
    fn test_reference_config_is_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        for name in ["grunt", "ranger", "skirmisher", "brute", "artillery"] {
            assert!(
                config.enemies.archetypes.contains_key(name),
                "reference archetype {name} missing"
            );
        }
        assert!(config.enemies.archetypes["ranger"].is_ranged());
        assert!(!config.enemies.archetypes["brute"].is_ranged());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "player": { "max_health": 200.0 }, "enemies": { "max_simultaneous": 4 } }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.player.max_health, 200.0);
        assert_eq!(config.player.max_armor, crate::constants::PLAYER_MAX_ARMOR);
        assert_eq!(config.enemies.max_simultaneous, 4);
        assert_eq!(config.enemies.default_type, "grunt");
        assert_eq!(config.movement, MovementConfig::default());
    }

    #[test]
    fn test_missing_default_archetype_is_rejected() {
        let json = r#"{ "enemies": { "default_type": "wraith" } }"#;
        let err = GameConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err:?}");
    }

    #[test]
    fn test_inverted_modifier_bounds_are_rejected() {
        let mut config = GameConfig::default();
        config.enemies.difficulty.min_modifier = 1.5;
        config.enemies.difficulty.max_modifier = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_attack_kind_serde() {
        let ranged = AttackKind::Ranged {
            projectile_speed: 30.0,
            projectile_lifetime: 2.0,
        };
        let json = serde_json::to_string(&ranged).unwrap();
        assert!(json.contains("\"kind\":\"ranged\""), "json was {json}");
        let back: AttackKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ranged);

        let melee: AttackKind = serde_json::from_str(r#"{"kind":"melee"}"#).unwrap();
        assert_eq!(melee, AttackKind::Melee);
    }

    #[test]
    fn test_band_half_open_ranges() {
        let bands = reference_bands();
        for score in [-0.2_f32, 0.2, -1.0, 0.0, 5.0] {
            let matches = bands.iter().filter(|b| b.contains(score)).count();
            assert_eq!(matches, 1, "score {score} matched {matches} bands");
        }
        let steady = &bands[1];
        assert!(steady.contains(-0.2));
        assert!(!steady.contains(0.2));
        assert!(DifficultyBand::baseline().contains(123.0));
    }

    #[test]
    fn test_level_parse_and_bounds() {
        let json = r#"{
            "name": "training_ground",
            "obstacles": [ { "position": [0, 1, 0], "size": [4, 2, 2] } ],
            "enemy_spawn_points": [[10, 0, 10], [-10, 0, -10]],
            "player_start": [0, 2.4, 12],
            "allowed_enemy_types": ["grunt"]
        }"#;
        let level = Level::from_json_str(json).unwrap();
        let bounds = level.obstacle_bounds();
        assert_eq!(bounds.len(), 1);
        assert_eq!(bounds[0].min, Vec3::new(-2.0, 0.0, -1.0));
        assert_eq!(bounds[0].max, Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(level.spawn_points().len(), 2);
        assert_eq!(level.player_start(), Vec3::new(0.0, 2.4, 12.0));
        assert!(level.waves.is_empty());
    }

    #[test]
    fn test_level_rejects_degenerate_obstacle() {
        let json = r#"{ "obstacles": [ { "position": [0, 0, 0], "size": [0, 1, 1] } ] }"#;
        assert!(Level::from_json_str(json).is_err());
    }

    #[test]
    fn test_obstacle_padded_containment() {
        let obstacle = Obstacle::from_center_size(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));
        assert!(obstacle.contains_padded(Vec3::new(1.5, 100.0, 0.0), 0.5));
        assert!(!obstacle.contains_padded(Vec3::new(1.6, 0.0, 0.0), 0.5));
        let closest = obstacle.closest_planar_point(Vec3::new(5.0, 3.0, 0.5));
        assert_eq!(closest, Vec3::new(1.0, 3.0, 0.5));
    }

    #[test]
    fn test_obstacle_segment_intersection() {
        let obstacle = Obstacle::from_center_size(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0));
        assert!(obstacle.segment_intersects_padded(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            0.0
        ));
        // Passes over the top.
        assert!(!obstacle.segment_intersects_padded(
            Vec3::new(-5.0, 3.0, 0.0),
            Vec3::new(5.0, 3.0, 0.0),
            0.5
        ));
        // Stops short.
        assert!(!obstacle.segment_intersects_padded(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            0.5
        ));
        // Padding reaches the segment.
        assert!(obstacle.segment_intersects_padded(
            Vec3::new(-5.0, 0.0, 1.4),
            Vec3::new(5.0, 0.0, 1.4),
            0.5
        ));
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let d = planar_distance(Vec3::new(0.0, 10.0, 0.0), Vec3::new(3.0, -4.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = ArenaSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ArenaSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
        assert_eq!(back.schedule.phase, SchedulePhase::Idle);
    }
}
