//! Player input sampled once per tick from the input collaborator.
//!
//! Move and fire intents are level-triggered: holding them keeps them true
//! every tick. Reload is edge-triggered by the engine: only a rising edge
//! starts a reload cycle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Logical input state for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub reload: bool,
    /// Look direction in world space. Movement is relative to its
    /// horizontal projection; shots travel along it.
    pub look: Vec3,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            fire: false,
            reload: false,
            look: Vec3::NEG_Z,
        }
    }
}

impl PlayerInput {
    /// Whether any move intent is held.
    pub fn wants_to_move(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}
