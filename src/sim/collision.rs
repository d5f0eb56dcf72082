//! Player-versus-world collision resolution
//!
//! Plain Euclidean distance checks against each entity class, run once per
//! tick after motion. Hits are gated by the invulnerability window except
//! power-up pickup, which always lands. Lava deals damage over time while
//! contact is continuous.

use crate::consts::*;

use super::state::{GamePhase, GameState};

/// Resolve every player collision for this tick
pub fn resolve(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    let player_pos = state.player.pos;

    // Meteors: hit, explode, despawn
    let mut i = 0;
    while i < state.meteors.len() {
        let close = state.meteors[i].pos.distance(player_pos) < COLLISION_DISTANCE;
        if close && !state.invulnerable {
            let meteor = state.meteors.remove(i);
            state.take_hit();
            state.spawn_explosion(meteor.pos);
        } else {
            i += 1;
        }
    }

    // Shockwaves persist for their full duration; the invulnerability
    // window is the only thing preventing repeat damage
    for i in 0..state.shockwaves.len() {
        if state.invulnerable {
            break;
        }
        if state.shockwaves[i].pos.distance(player_pos) < BLAST_DAMAGE_RADIUS {
            state.take_hit();
        }
    }

    // Power-ups: always collectible, heal plus points
    let mut i = 0;
    while i < state.power_ups.len() {
        if state.power_ups[i].pos.distance(player_pos) < POWERUP_PICKUP_DISTANCE {
            state.power_ups.remove(i);
            state.heal();
            state.score += SCORE_PER_POWERUP;
        } else {
            i += 1;
        }
    }

    // Enemies: hit, award points, despawn
    let mut i = 0;
    while i < state.enemies.len() {
        let close = state.enemies[i].pos.distance(player_pos) < COLLISION_DISTANCE;
        if close && !state.invulnerable {
            state.enemies.remove(i);
            state.take_hit();
            state.score += SCORE_PER_ENEMY;
        } else {
            i += 1;
        }
    }

    resolve_lava(state, dt, player_pos);
}

/// Damage-over-time while standing in lava. Entering contact resets the
/// timer; each full [`LAVA_DAMAGE_INTERVAL`] of continuous, vulnerable
/// contact deals one hit.
fn resolve_lava(state: &mut GameState, dt: f32, player_pos: glam::Vec3) {
    let in_lava_now = state
        .lava_pools
        .iter()
        .any(|lava| lava.pos.distance(player_pos) < LAVA_CONTACT_DISTANCE);

    if in_lava_now && !state.in_lava {
        state.lava_damage_timer = 0.0;
    }
    state.in_lava = in_lava_now;

    if state.in_lava && !state.invulnerable {
        state.lava_damage_timer += dt;
        if state.lava_damage_timer >= LAVA_DAMAGE_INTERVAL {
            state.take_hit();
            state.lava_damage_timer = 0.0;
        }
    }
}
