//! Probabilistic spawning and the difficulty ramp
//!
//! Each entity class rolls once per tick against its live rate. Rates are
//! one-way ratchets driven by elapsed game time; an external config write is
//! the only way they go back down.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, EnemyKind, GamePhase, GameState, Meteor, PowerUp, Tree};
use crate::config::Config;
use crate::consts::*;
use crate::random_unit_vector;

/// Live per-tick spawn probabilities
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnRates {
    pub meteor: f32,
    pub enemy: f32,
    pub power_up: f32,
}

impl SpawnRates {
    pub fn from_config(config: &Config) -> Self {
        Self {
            meteor: config.meteor_spawn_rate,
            enemy: config.enemy_spawn_rate,
            power_up: config.powerup_spawn_rate,
        }
    }
}

/// Ratchet spawn rates up as the run drags on: meteors and enemies step
/// every whole second, power-ups every whole difficulty interval.
pub fn update_difficulty(state: &mut GameState) {
    let second = state.game_time.floor() as u64;
    if second > state.last_ramp_second {
        state.rates.meteor = (state.rates.meteor + METEOR_SPAWN_RATE_STEP).min(METEOR_SPAWN_RATE_MAX);
        state.rates.enemy = (state.rates.enemy + ENEMY_SPAWN_RATE_STEP).min(ENEMY_SPAWN_RATE_MAX);
        state.last_ramp_second = second;
    }

    let interval = (state.game_time / DIFFICULTY_INCREASE_INTERVAL).floor() as u64;
    if interval > state.last_powerup_ramp {
        state.rates.power_up =
            (state.rates.power_up + POWERUP_SPAWN_RATE_STEP).min(POWERUP_SPAWN_RATE_MAX);
        state.last_powerup_ramp = interval;
    }
}

/// Maybe spawn one meteor on the outer shell, falling toward the center
pub fn spawn_meteor(state: &mut GameState, eff: f32) {
    if state.phase != GamePhase::Running || state.rng.random::<f32>() >= state.rates.meteor {
        return;
    }

    let pos = random_unit_vector(&mut state.rng) * (eff * METEOR_SPAWN_SHELL);
    let direction = (-pos).normalize_or(Vec3::NEG_Y);
    let id = state.next_entity_id();
    state.meteors.push(Meteor::new(id, pos, direction, METEOR_SPEED));
}

/// Maybe spawn one enemy out of a random lava pool. No lava, no spawn.
pub fn spawn_enemy(state: &mut GameState, eff: f32) {
    if state.phase != GamePhase::Running || state.rng.random::<f32>() >= state.rates.enemy {
        return;
    }
    if state.lava_pools.is_empty() {
        return;
    }

    let pool_idx = state.rng.random_range(0..state.lava_pools.len());
    let radial = state.lava_pools[pool_idx].pos.normalize_or(Vec3::Y);
    let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];

    // Lift to the surface and jitter so stacked spawns separate
    let jitter = Vec3::new(
        (state.rng.random::<f32>() - 0.5) * 2.0,
        (state.rng.random::<f32>() - 0.5) * 2.0,
        (state.rng.random::<f32>() - 0.5) * 2.0,
    );
    let pos = radial * (eff + PLAYER_HEIGHT) + jitter;

    let id = state.next_entity_id();
    log::debug!("Enemy {} spawned from lava pool", kind.name());
    state.enemies.push(Enemy {
        id,
        kind,
        pos,
        orientation: glam::Quat::from_rotation_arc(Vec3::Y, radial),
        radial,
        height: PLAYER_HEIGHT,
        trail: Vec::with_capacity(ENEMY_TRAIL_LENGTH),
    });
}

/// Maybe spawn one power-up on the current surface
pub fn spawn_power_up(state: &mut GameState, eff: f32) {
    if state.phase != GamePhase::Running || state.rng.random::<f32>() >= state.rates.power_up {
        return;
    }

    let pos = random_unit_vector(&mut state.rng) * eff;
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp {
        id,
        pos,
        original_pos: pos * (state.base_radius / eff),
    });
}

/// Scatter `count` trees on the current surface, keeping a clear circle
/// around the player.
pub fn place_trees(state: &mut GameState, count: usize) {
    state.trees.clear();
    let radius = state.current_radius;
    let player_pos = state.player.pos;

    let mut attempts = 0;
    while state.trees.len() < count {
        attempts += 1;
        if attempts > count * 100 {
            log::warn!("Tree placement gave up after {attempts} attempts");
            break;
        }

        let radial = random_unit_vector(&mut state.rng);
        let surface_point = radial * radius;
        if surface_point.distance(player_pos) < TREE_CLEAR_RADIUS {
            continue;
        }

        let scale = 2.0 + state.rng.random::<f32>() * 3.0;
        let offset = PLAYER_HEIGHT + scale * 1.333;
        let id = state.next_entity_id();
        state.trees.push(Tree {
            id,
            pos: surface_point + radial * offset,
            radial,
            offset,
            scale,
        });
    }
}
