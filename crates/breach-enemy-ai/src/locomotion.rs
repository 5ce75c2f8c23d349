//! Steering for enemy agents.
//!
//! Produces a desired planar displacement per tick from a target point, a
//! sinusoidal strafe and an obstacle avoidance push. The displacement is
//! then handed to the collision resolver by the caller.

use breach_core::types::{flatten, Obstacle};
use glam::Vec3;
use rand::Rng;

/// Inputs for one steering evaluation.
#[derive(Debug, Clone, Copy)]
pub struct SteerInput {
    pub position: Vec3,
    pub target: Vec3,
    /// Seconds since session start; drives the strafe phase.
    pub elapsed: f32,
    pub speed: f32,
    pub dt: f32,
    pub strafe_amplitude: f32,
    /// Scales the strafe term: 1 when chasing, low when patrolling.
    pub strafe_weight: f32,
    pub strafe_frequency: f32,
    pub avoid_radius: f32,
    pub avoid_weight: f32,
}

/// Unit horizontal direction from `from` to `to`, if they are apart.
pub fn planar_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let flat = flatten(to - from);
    let length = flat.length();
    (length > 1e-3).then(|| flat / length)
}

/// Lateral weave perpendicular to `forward`.
pub fn strafe_offset(forward: Vec3, elapsed: f32, frequency: f32, amplitude: f32) -> Vec3 {
    let lateral = Vec3::new(-forward.z, 0.0, forward.x);
    lateral * (elapsed * frequency).sin() * amplitude
}

/// Push away from every obstacle footprint closer than `avoid_radius`.
///
/// Each contribution points from the footprint's nearest point to
/// `position` and scales linearly from 1 at contact to 0 at the radius.
pub fn avoidance_force(position: Vec3, obstacles: &[Obstacle], avoid_radius: f32) -> Vec3 {
    if avoid_radius <= 0.0 {
        return Vec3::ZERO;
    }

    obstacles.iter().fold(Vec3::ZERO, |push, obstacle| {
        let closest = obstacle.closest_planar_point(position);
        let offset = flatten(position - closest);
        let distance = offset.length();
        if distance >= avoid_radius {
            return push;
        }
        let away = if distance > 1e-4 {
            offset / distance
        } else {
            // Inside the footprint: push out from the centre.
            flatten(position - obstacle.center()).normalize_or_zero()
        };
        push + away * ((avoid_radius - distance) / avoid_radius)
    })
}

/// Desired displacement this tick, length `speed * dt` or zero.
pub fn steer(input: &SteerInput, obstacles: &[Obstacle]) -> Vec3 {
    let forward = planar_direction(input.position, input.target).unwrap_or(Vec3::ZERO);
    let strafe = if forward == Vec3::ZERO {
        Vec3::ZERO
    } else {
        strafe_offset(
            forward,
            input.elapsed,
            input.strafe_frequency,
            input.strafe_amplitude,
        ) * input.strafe_weight
    };
    let avoidance = avoidance_force(input.position, obstacles, input.avoid_radius) * input.avoid_weight;

    flatten(forward + strafe + avoidance).normalize_or_zero() * input.speed * input.dt
}

/// Heading that faces along `direction` (0 = facing -Z).
pub fn yaw_towards(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Whether a patrolling agent needs a fresh waypoint.
pub fn needs_patrol_target(position: Vec3, target: Option<Vec3>, arrival_distance: f32) -> bool {
    match target {
        None => true,
        Some(target) => breach_core::types::planar_distance(position, target) <= arrival_distance,
    }
}

/// Random waypoint within `radius` of `spawn`: uniform angle, uniform radius.
pub fn pick_patrol_target<R: Rng>(rng: &mut R, spawn: Vec3, radius: f32) -> Vec3 {
    if radius <= 0.0 {
        return spawn;
    }
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance: f32 = rng.gen_range(0.0..=radius);
    spawn + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}
