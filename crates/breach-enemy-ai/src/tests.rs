#[cfg(test)]
mod tests {
    use breach_core::config::{reference_archetypes, Archetype, EnemyConfig};
    use breach_core::constants::{ATTACK_HYSTERESIS, MELEE_REACH_BONUS};
    use breach_core::enums::AgentState;
    use breach_core::types::{planar_distance, planar_length, Obstacle};
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::fsm::*;
    use crate::locomotion::*;
    use crate::profiles::*;

    fn archetype(name: &str) -> Archetype {
        reference_archetypes()[name].clone()
    }

    fn context(archetype: &Archetype, state: AgentState, distance: f32) -> AgentContext<'_> {
        AgentContext {
            archetype,
            state,
            distance_to_player: distance,
            attack_hysteresis: ATTACK_HYSTERESIS,
            provoked: false,
        }
    }

    fn steer_input(position: Vec3, target: Vec3) -> SteerInput {
        SteerInput {
            position,
            target,
            elapsed: 0.0,
            speed: 5.0,
            dt: 0.1,
            strafe_amplitude: 0.0,
            strafe_weight: 1.0,
            strafe_frequency: 2.0,
            avoid_radius: 3.0,
            avoid_weight: 1.5,
        }
    }

    // ---- State machine ----

    #[test]
    fn test_patrol_to_chase_at_aggro_range() {
        let grunt = archetype("grunt");
        let update = evaluate(&context(&grunt, AgentState::Patrol, grunt.aggro_range));
        assert!(update.state_changed);
        assert_eq!(update.new_state, AgentState::Chase);

        let update = evaluate(&context(&grunt, AgentState::Patrol, grunt.aggro_range + 0.1));
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AgentState::Patrol);
    }

    #[test]
    fn test_chase_to_attack_and_back_to_patrol() {
        let ranger = archetype("ranger");
        let update = evaluate(&context(&ranger, AgentState::Chase, ranger.attack_range));
        assert_eq!(update.new_state, AgentState::Attack);

        let update = evaluate(&context(&ranger, AgentState::Chase, ranger.aggro_range + 1.0));
        assert_eq!(update.new_state, AgentState::Patrol);
    }

    #[test]
    fn test_provoked_agent_keeps_chasing_out_of_aggro_range() {
        let grunt = archetype("grunt");
        let far = grunt.aggro_range * 4.0;
        let provoked = AgentContext {
            provoked: true,
            ..context(&grunt, AgentState::Chase, far)
        };
        let update = evaluate(&provoked);
        assert!(!update.state_changed);
        assert_eq!(update.new_state, AgentState::Chase);

        // Still closes to attack range as usual.
        let close = AgentContext {
            provoked: true,
            ..context(&grunt, AgentState::Chase, grunt.attack_range)
        };
        assert_eq!(evaluate(&close).new_state, AgentState::Attack);
    }

    #[test]
    fn test_one_transition_per_evaluation() {
        // Patrol never jumps straight to attack even at point blank.
        let grunt = archetype("grunt");
        let update = evaluate(&context(&grunt, AgentState::Patrol, 0.5));
        assert_eq!(update.new_state, AgentState::Chase);
    }

    #[test]
    fn test_attack_hysteresis_band() {
        let ranger = archetype("ranger");
        let inside_band = ranger.attack_range * 1.1;
        let update = evaluate(&context(&ranger, AgentState::Attack, inside_band));
        assert_eq!(update.new_state, AgentState::Attack);
        assert!(!update.state_changed);

        let beyond_band = ranger.attack_range * ATTACK_HYSTERESIS + 0.01;
        let update = evaluate(&context(&ranger, AgentState::Attack, beyond_band));
        assert_eq!(update.new_state, AgentState::Chase);
    }

    #[test]
    fn test_dead_is_terminal() {
        let brute = archetype("brute");
        for distance in [0.0, 5.0, 500.0] {
            let update = evaluate(&context(&brute, AgentState::Dead, distance));
            assert_eq!(update.new_state, AgentState::Dead);
            assert!(!update.state_changed);
        }
        assert_eq!(state_after_damage(AgentState::Dead, 50.0), AgentState::Dead);
    }

    #[test]
    fn test_damage_transitions() {
        assert_eq!(state_after_damage(AgentState::Patrol, 10.0), AgentState::Chase);
        assert_eq!(state_after_damage(AgentState::Attack, 10.0), AgentState::Attack);
        assert_eq!(state_after_damage(AgentState::Chase, 0.0), AgentState::Dead);
        assert_eq!(state_after_damage(AgentState::Patrol, -5.0), AgentState::Dead);
    }

    // ---- Attacks ----

    #[test]
    fn test_attack_waits_for_cooldown() {
        let grunt = archetype("grunt");
        let roll = attack(&grunt, 0.5, 0.1, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), MELEE_REACH_BONUS);
        assert_eq!(roll.outcome, AttackOutcome::Waiting);
        assert!((roll.cooldown - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_melee_strike_within_reach() {
        let grunt = archetype("grunt");
        let target = Vec3::new(grunt.attack_range + MELEE_REACH_BONUS, 0.0, 0.0);
        let roll = attack(&grunt, 0.0, 0.016, Vec3::ZERO, target, MELEE_REACH_BONUS);
        assert_eq!(
            roll.outcome,
            AttackOutcome::Strike {
                damage: grunt.attack_damage
            }
        );
        assert_eq!(roll.cooldown, grunt.attack_cooldown);
    }

    #[test]
    fn test_melee_whiff_still_resets_cooldown() {
        let grunt = archetype("grunt");
        let target = Vec3::new(grunt.attack_range + MELEE_REACH_BONUS + 0.5, 0.0, 0.0);
        let roll = attack(&grunt, 0.0, 0.016, Vec3::ZERO, target, MELEE_REACH_BONUS);
        assert_eq!(roll.outcome, AttackOutcome::Whiff);
        assert_eq!(roll.cooldown, grunt.attack_cooldown);
    }

    #[test]
    fn test_ranged_fires_at_player() {
        let ranger = archetype("ranger");
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let target = Vec3::new(0.0, 1.0, -10.0);
        let roll = attack(&ranger, 0.0, 0.016, origin, target, MELEE_REACH_BONUS);
        match roll.outcome {
            AttackOutcome::Fire {
                velocity,
                lifetime,
                damage,
            } => {
                assert!((velocity - Vec3::new(0.0, 0.0, -28.0)).length() < 1e-4);
                assert_eq!(lifetime, 2.2);
                assert_eq!(damage, ranger.attack_damage);
            }
            other => panic!("expected a shot, got {other:?}"),
        }
        assert_eq!(roll.cooldown, ranger.attack_cooldown);
    }

    // ---- Locomotion ----

    #[test]
    fn test_steer_heads_for_target_at_speed() {
        let input = steer_input(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        let delta = steer(&input, &[]);
        assert!((planar_length(delta) - 0.5).abs() < 1e-5);
        assert!(delta.x > 0.49);
        assert_eq!(delta.y, 0.0);
    }

    #[test]
    fn test_steer_at_target_is_still() {
        let input = steer_input(Vec3::ONE, Vec3::ONE);
        assert_eq!(steer(&input, &[]), Vec3::ZERO);
    }

    #[test]
    fn test_strafe_is_lateral() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let offset = strafe_offset(forward, std::f32::consts::FRAC_PI_4, 2.0, 0.8);
        assert!(offset.z.abs() < 1e-6);
        assert!((offset.x.abs() - 0.8).abs() < 1e-5);
        assert_eq!(strafe_offset(forward, 0.0, 2.0, 0.8), Vec3::ZERO);
    }

    #[test]
    fn test_avoidance_scales_with_proximity() {
        let obstacles = [Obstacle::from_center_size(Vec3::ZERO, Vec3::new(2.0, 2.0, 2.0))];
        let far = avoidance_force(Vec3::new(5.0, 0.0, 0.0), &obstacles, 3.0);
        assert_eq!(far, Vec3::ZERO);

        let near = avoidance_force(Vec3::new(2.5, 0.0, 0.0), &obstacles, 3.0);
        // 1.5 from the face: half strength, pointing +x.
        assert!((near - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);

        let closer = avoidance_force(Vec3::new(1.5, 0.0, 0.0), &obstacles, 3.0);
        assert!(closer.x > near.x);
    }

    #[test]
    fn test_avoidance_bends_path_around_obstacle() {
        let obstacles = [Obstacle::from_center_size(
            Vec3::new(0.0, 0.0, -3.0),
            Vec3::new(2.0, 2.0, 2.0),
        )];
        let mut input = steer_input(Vec3::new(1.5, 0.0, -2.5), Vec3::new(1.5, 0.0, -20.0));
        input.avoid_radius = 1.0;
        let delta = steer(&input, &obstacles);
        // Beside the block, the push adds an outward x component.
        let plain = steer(&steer_input(input.position, input.target), &[]);
        assert!(plain.x.abs() < 1e-6);
        assert!(delta.x > 0.1);
        assert!((planar_length(delta) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_faces_direction() {
        assert!(yaw_towards(Vec3::new(0.0, 0.0, -1.0)).abs() < 1e-6);
        let yaw = yaw_towards(Vec3::new(1.0, 0.0, 0.0));
        assert!((yaw + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_patrol_targets_stay_within_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let spawn = Vec3::new(10.0, 0.0, -4.0);
        for _ in 0..200 {
            let target = pick_patrol_target(&mut rng, spawn, 6.0);
            assert!(planar_distance(spawn, target) <= 6.0 + 1e-4);
            assert_eq!(target.y, spawn.y);
        }
        assert_eq!(pick_patrol_target(&mut rng, spawn, 0.0), spawn);
    }

    #[test]
    fn test_needs_patrol_target() {
        assert!(needs_patrol_target(Vec3::ZERO, None, 1.0));
        assert!(needs_patrol_target(Vec3::ZERO, Some(Vec3::new(0.9, 0.0, 0.0)), 1.0));
        assert!(!needs_patrol_target(Vec3::ZERO, Some(Vec3::new(4.0, 0.0, 0.0)), 1.0));
    }

    // ---- Profiles ----

    #[test]
    fn test_unknown_archetype_falls_back_to_default() {
        let enemies = EnemyConfig::default();
        let (name, stats) = resolve_archetype("wraith", &enemies).unwrap();
        assert_eq!(name, "grunt");
        assert_eq!(stats, &enemies.archetypes["grunt"]);

        let (name, _) = resolve_archetype("artillery", &enemies).unwrap();
        assert_eq!(name, "artillery");
    }

    #[test]
    fn test_spawn_pool_filters() {
        let enemies = EnemyConfig::default();
        let types = vec!["brute".to_string(), "wraith".to_string(), "ranger".to_string()];

        assert_eq!(spawn_pool(&types, &[], &enemies), vec!["brute", "ranger"]);
        assert_eq!(
            spawn_pool(&types, &["ranger".to_string()], &enemies),
            vec!["ranger"]
        );
        assert_eq!(
            spawn_pool(&types, &["grunt".to_string()], &enemies),
            vec!["grunt"]
        );
        assert_eq!(spawn_pool(&[], &[], &enemies), vec!["grunt"]);
    }
}
