//! Discrete stepped collision against axis-aligned obstacles.
//!
//! One resolver serves player movement, enemy movement and projectile path
//! interruption. Bodies are plane-constrained: only `x`/`z` are resolved and
//! the vertical coordinate passes through untouched.

use breach_core::config::CollisionConfig;
use breach_core::types::{planar_length, Obstacle};
use glam::Vec3;

/// Horizontal axes a move was stopped on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockedAxes {
    pub x: bool,
    pub z: bool,
}

impl BlockedAxes {
    pub fn any(&self) -> bool {
        self.x || self.z
    }
}

/// Outcome of resolving one desired displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: Vec3,
    pub blocked: BlockedAxes,
}

impl Resolution {
    fn free(position: Vec3) -> Self {
        Self {
            position,
            blocked: BlockedAxes::default(),
        }
    }
}

/// Whether a body of `radius` at `position` overlaps any obstacle footprint.
pub fn intersects_any(position: Vec3, obstacles: &[Obstacle], radius: f32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| obstacle.contains_padded(position, radius))
}

/// Step length used when walking a blocked move.
pub fn step_size(body_radius: f32, config: &CollisionConfig) -> f32 {
    config.min_step.max(body_radius * config.step_factor)
}

/// Move from `position` by `delta`, stopping short of obstacles.
///
/// A clear direct target is taken in one go. Otherwise the planar delta is
/// walked in equal increments no longer than [`step_size`]; the last clear
/// increment is kept and every axis the delta moved along is reported
/// blocked. The returned position never lies beyond the direct target.
pub fn resolve(
    position: Vec3,
    delta: Vec3,
    obstacles: &[Obstacle],
    body_radius: f32,
    config: &CollisionConfig,
) -> Resolution {
    let planar = planar_length(delta);
    if planar <= f32::EPSILON {
        return Resolution::free(position);
    }

    let target = Vec3::new(position.x + delta.x, position.y, position.z + delta.z);
    if !intersects_any(target, obstacles, body_radius) {
        return Resolution::free(target);
    }

    let step = step_size(body_radius, config);
    let steps = ((planar / step).ceil() as u32).max(1);
    let increment = Vec3::new(delta.x / steps as f32, 0.0, delta.z / steps as f32);

    let mut current = position;
    for _ in 0..steps {
        let next = current + increment;
        if intersects_any(next, obstacles, body_radius) {
            break;
        }
        current = next;
    }

    Resolution {
        position: current,
        blocked: BlockedAxes {
            x: delta.x != 0.0,
            z: delta.z != 0.0,
        },
    }
}

/// Whether the segment `start..end` passes through any obstacle grown by
/// `padding`. Used to stop projectiles at walls.
pub fn segment_intercepts(start: Vec3, end: Vec3, obstacles: &[Obstacle], padding: f32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| obstacle.segment_intersects_padded(start, end, padding))
}
