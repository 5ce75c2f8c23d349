//! Scripted input source standing in for a human player.
//!
//! Each frame it looks at the latest snapshot, turns toward the nearest
//! live agent, fires while it has rounds, backs away from anything too
//! close, and taps reload when the magazine runs dry.

use breach_core::commands::PlayerInput;
use breach_core::state::{AgentView, ArenaSnapshot};
use breach_core::types::planar_distance;

/// Distance under which the autopilot backpedals.
const KEEP_AWAY: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot {
    last: PlayerInput,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next tick, decided from the snapshot the last tick
    /// produced.
    pub fn next_input(&mut self, snapshot: &ArenaSnapshot) -> PlayerInput {
        let player = &snapshot.player;
        let mut input = PlayerInput {
            look: self.last.look,
            ..PlayerInput::default()
        };
        if !player.alive {
            self.last = input;
            return input;
        }

        // Reload is edge-triggered, so only request it on a frame where
        // the previous input did not.
        let dry = player.ammo_in_magazine == 0 && player.reserve_ammo > 0 && !player.reloading;
        input.reload = dry && !self.last.reload;

        if let Some(target) = nearest_live_agent(snapshot) {
            let aim = target.position - player.position;
            if aim.length_squared() > f32::EPSILON {
                input.look = aim;
            }
            input.fire = player.ammo_in_magazine > 0 && !player.reloading;
            input.backward = planar_distance(target.position, player.position) < KEEP_AWAY;
        }

        self.last = input;
        input
    }
}

/// Closest agent that is not playing its death.
pub fn nearest_live_agent(snapshot: &ArenaSnapshot) -> Option<&AgentView> {
    let from = snapshot.player.position;
    snapshot
        .agents
        .iter()
        .filter(|agent| agent.state.is_alive())
        .min_by(|a, b| {
            planar_distance(a.position, from).total_cmp(&planar_distance(b.position, from))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use breach_core::enums::AgentState;
    use breach_core::state::PlayerView;
    use breach_core::types::AgentId;
    use glam::Vec3;

    fn agent(id: u32, position: Vec3, state: AgentState) -> AgentView {
        AgentView {
            id: AgentId(id),
            archetype: "grunt".into(),
            state,
            position,
            yaw: 0.0,
            health: 60.0,
            max_health: 60.0,
            scale: 1.0,
        }
    }

    fn snapshot(agents: Vec<AgentView>, ammo: u32) -> ArenaSnapshot {
        ArenaSnapshot {
            player: PlayerView {
                alive: true,
                ammo_in_magazine: ammo,
                reserve_ammo: 180,
                ..PlayerView::default()
            },
            agents,
            ..ArenaSnapshot::default()
        }
    }

    #[test]
    fn test_aims_at_nearest_live_agent() {
        let snap = snapshot(
            vec![
                agent(0, Vec3::new(2.0, 0.0, 0.0), AgentState::Dead),
                agent(1, Vec3::new(0.0, 0.0, -9.0), AgentState::Chase),
                agent(2, Vec3::new(20.0, 0.0, 0.0), AgentState::Patrol),
            ],
            24,
        );
        let mut pilot = Autopilot::new();
        let input = pilot.next_input(&snap);

        assert_eq!(nearest_live_agent(&snap).map(|a| a.id), Some(AgentId(1)));
        assert!(input.fire);
        assert!(!input.backward);
        assert!(input.look.normalize().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_backs_away_from_close_agents() {
        let snap = snapshot(vec![agent(0, Vec3::new(0.0, 0.0, 3.0), AgentState::Attack)], 24);
        let input = Autopilot::new().next_input(&snap);
        assert!(input.backward);
        assert!(input.look.z > 0.0);
    }

    #[test]
    fn test_reload_is_pulsed_when_dry() {
        let snap = snapshot(vec![agent(0, Vec3::new(0.0, 0.0, -9.0), AgentState::Chase)], 0);
        let mut pilot = Autopilot::new();

        let first = pilot.next_input(&snap);
        assert!(first.reload);
        assert!(!first.fire);

        let second = pilot.next_input(&snap);
        assert!(!second.reload, "reload must be released before it can trigger again");
        assert!(pilot.next_input(&snap).reload);
    }

    #[test]
    fn test_idle_without_targets() {
        let input = Autopilot::new().next_input(&snapshot(Vec::new(), 24));
        assert!(!input.fire);
        assert!(!input.wants_to_move());
        assert_eq!(input.look, Vec3::NEG_Z);
    }
}
