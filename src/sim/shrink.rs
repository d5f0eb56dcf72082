//! Planet shrink state machine
//!
//! Every [`AUTO_SHRINK_INTERVAL`] seconds the planet loses [`SHRINK_AMOUNT`]
//! of radius, interpolated over [`SHRINK_DURATION`]. All surface-bound
//! entities are repositioned against the interpolated radius each tick of
//! the transition. Reaching [`WIN_RADIUS`] wins the run.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Shrink transition state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShrinkState {
    Idle,
    Shrinking {
        start_time: f64,
        start_radius: f32,
        target_radius: f32,
    },
}

/// Advance the shrink machine and return this tick's effective radius.
///
/// Must run before spawning/motion/collision so every component positions
/// against the same radius.
pub fn update(state: &mut GameState) -> f32 {
    if state.shrink == ShrinkState::Idle
        && state.game_time - state.last_shrink_time >= AUTO_SHRINK_INTERVAL
    {
        let target = (state.current_radius - SHRINK_AMOUNT).max(WIN_RADIUS);
        state.shrink = ShrinkState::Shrinking {
            start_time: state.game_time,
            start_radius: state.current_radius,
            target_radius: target,
        };
        state.last_shrink_time = state.game_time;
        log::debug!(
            "Shrink started: {:.1} -> {:.1}",
            state.current_radius,
            target
        );
    }

    let mut eff = state.current_radius;
    if let ShrinkState::Shrinking {
        start_time,
        start_radius,
        target_radius,
    } = state.shrink
    {
        let progress = (((state.game_time - start_time) / SHRINK_DURATION) as f32).min(1.0);
        eff = start_radius + (target_radius - start_radius) * progress;
        reposition_surface_bound(state, eff);

        if progress >= 1.0 {
            state.shrink = ShrinkState::Idle;
            state.current_radius = target_radius;
            eff = target_radius;
            if state.current_radius <= WIN_RADIUS && state.phase == GamePhase::Running {
                state.phase = GamePhase::Won;
                log::info!(
                    "Run won at t={:.1}s with score {:.0}",
                    state.game_time,
                    state.score
                );
            }
        }
    }

    state.effective_radius = eff;
    eff
}

/// Pull lava, power-ups, and trees onto the sphere of radius `eff`.
/// Lava and power-ups scale from their base-radius original positions;
/// trees sit at their recorded radial plus height offset.
fn reposition_surface_bound(state: &mut GameState, eff: f32) {
    let scale = eff / state.base_radius;
    for lava in &mut state.lava_pools {
        lava.pos = lava.original_pos * scale;
    }
    for power_up in &mut state.power_ups {
        power_up.pos = power_up.original_pos * scale;
    }
    for tree in &mut state.trees {
        tree.pos = tree.radial * (eff + tree.offset);
    }
}
