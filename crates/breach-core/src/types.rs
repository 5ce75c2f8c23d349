//! Fundamental geometric and simulation types.
//!
//! World space is `y` up. Bodies move in the horizontal `x`/`z` plane.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable identity of a spawned enemy agent. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Stable identity of an in-flight projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Axis-aligned obstacle volume. Immutable once the level is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub min: Vec3,
    pub max: Vec3,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Obstacle {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Build from a centre point and a full `[width, height, depth]` size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether `point` lies inside the horizontal footprint grown by `padding`.
    /// Bounds are inclusive; the vertical coordinate is ignored.
    pub fn contains_padded(&self, point: Vec3, padding: f32) -> bool {
        point.x >= self.min.x - padding
            && point.x <= self.max.x + padding
            && point.z >= self.min.z - padding
            && point.z <= self.max.z + padding
    }

    /// Closest point of the horizontal footprint to `point`, at `point.y`.
    pub fn closest_planar_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y,
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Segment test against the full 3D box grown by `padding` on every side
    /// (slab method). Used for projectile path interruption.
    pub fn segment_intersects_padded(&self, start: Vec3, end: Vec3, padding: f32) -> bool {
        let lo = self.min - Vec3::splat(padding);
        let hi = self.max + Vec3::splat(padding);
        let dir = end - start;

        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        for axis in 0..3 {
            let origin = start[axis];
            let d = dir[axis];
            if d.abs() < f32::EPSILON {
                if origin < lo[axis] || origin > hi[axis] {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (lo[axis] - origin) * inv;
            let mut t1 = (hi[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return false;
            }
        }
        true
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Length of the horizontal component of `v`.
pub fn planar_length(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Horizontal distance between two points.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar_length(b - a)
}

/// `v` with its vertical component removed.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}
