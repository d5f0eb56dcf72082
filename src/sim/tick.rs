//! Per-tick simulation advance
//!
//! One call per animation frame with the elapsed delta. The order inside a
//! tick is: clock/score, shrink (fixes this tick's effective radius),
//! difficulty ramp, invulnerability decay, spawns, entity motion, collision
//! resolution, player motion. Terminal phases make the tick a no-op.

use glam::{Quat, Vec3};

use super::state::{EnemyBehavior, GamePhase, GameState};
use super::{collision, motion, shrink, spawn};
use crate::consts::*;
use crate::project_onto_tangent;

/// Input intents for a single tick, sampled once by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub move_forward: bool,
    /// Fast about-face spin
    pub brake_turn: bool,
}

/// Advance the game state by one variable-delta tick
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    // Stalled-frame guard: a huge delta would let meteors tunnel straight
    // through the collision shell
    let dt = dt.min(MAX_TICK_DT);

    state.game_time += dt as f64;
    state.score += SCORE_PER_SECOND * dt as f64;

    let eff = shrink::update(state);
    if state.phase != GamePhase::Running {
        // Shrink completion just won the run
        return;
    }

    spawn::update_difficulty(state);

    if state.invulnerable {
        state.invuln_timer -= dt;
        if state.invuln_timer <= 0.0 {
            state.invulnerable = false;
            state.invuln_timer = 0.0;
        }
    }

    spawn::spawn_meteor(state, eff);
    spawn::spawn_enemy(state, eff);
    spawn::spawn_power_up(state, eff);

    update_entities(state, dt, eff);
    collision::resolve(state, dt);
    if state.phase != GamePhase::Running {
        // That collision ended the run
        return;
    }
    move_player(state, input, dt, eff);
}

/// Advance meteors, enemies, lava pulse, shockwaves, and particles
fn update_entities(state: &mut GameState, dt: f32, eff: f32) {
    // Meteors fall toward the center; touching the surface leaves a
    // shockwave, debris, and a lava pool
    let mut impacts: Vec<Vec3> = Vec::new();
    state.meteors.retain_mut(|meteor| {
        meteor.pos += meteor.direction * meteor.speed * dt;
        meteor.record_trail();
        if meteor.pos.length() <= eff + METEOR_RADIUS {
            impacts.push(meteor.pos.normalize_or(Vec3::Y) * eff);
            false
        } else {
            true
        }
    });
    for impact in impacts {
        log::debug!("Meteor impact at {impact:?}");
        state.spawn_explosion(impact);
        state.spawn_lava(impact, eff);
    }

    // Enemies pursue the player along the surface
    let player_pos = state.player.pos;
    let GameState { enemies, rng, .. } = state;
    for enemy in enemies.iter_mut() {
        let radial = enemy.pos.normalize_or(Vec3::Y);
        let direction = match enemy.kind.behavior() {
            // Jump currently shares the chase motion
            EnemyBehavior::Chase | EnemyBehavior::Jump => {
                motion::chase_direction(enemy.pos, player_pos, radial, rng)
            }
        };
        let step = motion::step_on_surface(
            enemy.pos,
            direction,
            enemy.kind.speed(),
            dt,
            eff + enemy.height,
        );
        enemy.pos = step.pos;
        enemy.orientation = step.correction * enemy.orientation;
        enemy.radial = step.radial;
        enemy.record_trail();
    }

    for lava in &mut state.lava_pools {
        lava.pulse += dt * 2.0;
    }

    state.shockwaves.retain_mut(|wave| {
        wave.age += dt;
        wave.age < EXPLOSION_DURATION
    });

    state.particles.retain_mut(|particle| {
        particle.pos += particle.vel * dt;
        particle.life -= dt;
        particle.life > 0.0
    });
}

/// Apply input intents to the player and re-project onto the current sphere
fn move_player(state: &mut GameState, input: &TickInput, dt: f32, eff: f32) {
    let player = &mut state.player;
    let radial = player.pos.normalize_or(Vec3::Y);

    if input.turn_left {
        player.orientation = Quat::from_axis_angle(radial, -TURN_SPEED * dt) * player.orientation;
    }
    if input.turn_right {
        player.orientation = Quat::from_axis_angle(radial, TURN_SPEED * dt) * player.orientation;
    }
    if input.brake_turn {
        player.orientation =
            Quat::from_axis_angle(radial, BRAKE_TURN_SPEED * dt) * player.orientation;
    }

    if input.move_forward {
        let forward =
            project_onto_tangent(player.orientation * Vec3::Z, radial).normalize_or_zero();
        if forward != Vec3::ZERO {
            // Pushing through a tree slows the player down
            let slowed = state
                .trees
                .iter()
                .any(|tree| tree.pos.distance(player.pos) < TREE_COLLISION_DISTANCE);
            let speed = state.config.forward_speed * if slowed { TREE_SLOWDOWN } else { 1.0 };
            player.pos += forward * speed * dt;
        }
    }

    // Re-project onto the current sphere every tick (the shrink moves the
    // surface under an idle player) and keep "up" continuous
    let new_radial = player.pos.normalize_or(Vec3::Y);
    player.pos = new_radial * (eff + PLAYER_HEIGHT);
    if new_radial.distance(player.radial) > 1e-7 {
        let correction = Quat::from_rotation_arc(player.radial, new_radial);
        player.orientation = correction * player.orientation;
        player.radial = new_radial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Meteor;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.rates.meteor = 0.0;
        state.rates.enemy = 0.0;
        state.rates.power_up = 0.0;
        // Pin the ramp counters so the difficulty ratchet can't raise the
        // zeroed rates back up during long runs
        state.last_ramp_second = u64::MAX;
        state.last_powerup_ramp = u64::MAX;
        state
    }

    #[test]
    fn test_score_accrues_with_time() {
        let mut state = quiet_state(1);
        let input = TickInput::default();
        for _ in 0..60 {
            tick(&mut state, &input, DT);
        }
        assert!((state.game_time - 1.0).abs() < 1e-3);
        assert!((state.score - SCORE_PER_SECOND).abs() < 0.1);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let mut state = quiet_state(1);
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.game_time - MAX_TICK_DT as f64).abs() < 1e-6);
    }

    #[test]
    fn test_meteor_falls_impacts_and_leaves_lava() {
        // Scenario: meteor spawned 5 radii out at speed 35 reaches the
        // 40-unit surface after about (200-41)/35 = 4.54s
        let mut state = quiet_state(2);
        let id = state.next_entity_id();
        let pos = Vec3::new(200.0, 0.0, 0.0);
        state
            .meteors
            .push(Meteor::new(id, pos, Vec3::NEG_X, METEOR_SPEED));

        let input = TickInput::default();
        let mut elapsed = 0.0f32;
        while !state.meteors.is_empty() && elapsed < 6.0 {
            tick(&mut state, &input, DT);
            elapsed += DT;
        }

        assert!(state.meteors.is_empty(), "meteor never impacted");
        assert!((elapsed - 4.54).abs() < 0.1, "impact at t={elapsed:.2}");
        assert_eq!(state.lava_pools.len(), 1);
        assert_eq!(state.shockwaves.len(), 1);
        // Lava sits at the impact point on the surface
        let lava = &state.lava_pools[0];
        assert!((lava.pos.length() - state.effective_radius).abs() < 0.1);
        assert!(lava.pos.x > 0.0);
    }

    #[test]
    fn test_surface_bound_entities_stay_on_sphere() {
        let mut state = GameState::new(42);
        // Crank spawns so the run fills with entities quickly
        state.rates.meteor = 0.5;
        state.rates.enemy = 0.5;
        state.rates.power_up = 0.5;

        let input = TickInput {
            move_forward: true,
            turn_right: true,
            ..Default::default()
        };

        for _ in 0..1200 {
            tick(&mut state, &input, DT);
            if state.phase != GamePhase::Running {
                break;
            }
            let eff = state.effective_radius;
            let player_r = state.player.pos.length();
            assert!(
                (player_r - (eff + PLAYER_HEIGHT)).abs() < 1e-3,
                "player off surface: {player_r} vs {eff}"
            );
            for enemy in &state.enemies {
                assert!((enemy.pos.length() - (eff + enemy.height)).abs() < 1e-3);
            }
            for power_up in &state.power_ups {
                assert!((power_up.pos.length() - eff).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn test_player_orientation_stays_normalized_and_up_aligned() {
        let mut state = quiet_state(7);
        let input = TickInput {
            move_forward: true,
            turn_left: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, DT);
        }
        let orientation = state.player.orientation;
        assert!((orientation.length() - 1.0).abs() < 1e-2);
        // The rotated model "up" tracks the radial
        let up = orientation * Vec3::Y;
        assert!(up.distance(state.player.radial) < 1e-2);
    }

    #[test]
    fn test_invulnerability_window_expires() {
        let mut state = quiet_state(3);
        state.take_hit();
        assert!(state.invulnerable);

        let input = TickInput::default();
        let steps = (INVULN_DURATION / DT).ceil() as usize + 2;
        for _ in 0..steps {
            tick(&mut state, &input, DT);
        }
        assert!(!state.invulnerable);
        assert_eq!(state.invuln_timer, 0.0);
    }

    #[test]
    fn test_full_run_ends_in_win_without_threats() {
        // Radius 40 -> 10 in 5-unit steps every 10s: six shrinks, ~70s
        let mut state = quiet_state(4);
        let input = TickInput::default();
        let dt = 1.0 / 30.0;
        let mut won_ticks = 0;
        for _ in 0..(80.0 / dt) as usize {
            tick(&mut state, &input, dt);
            if state.phase == GamePhase::Won {
                won_ticks += 1;
            }
        }
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.current_radius, WIN_RADIUS);
        // Terminal ticks are no-ops, so time froze at the win
        let frozen = state.game_time;
        tick(&mut state, &input, dt);
        assert_eq!(state.game_time, frozen);
        assert!(won_ticks > 0);
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let inputs = [
            TickInput {
                move_forward: true,
                ..Default::default()
            },
            TickInput {
                move_forward: true,
                turn_left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                brake_turn: true,
                ..Default::default()
            },
        ];

        for step in 0..2000 {
            let input = &inputs[step % inputs.len()];
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }

        assert_eq!(a.game_time, b.game_time);
        assert_eq!(a.hits, b.hits);
        assert_eq!(a.meteors.len(), b.meteors.len());
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.lava_pools.len(), b.lava_pools.len());
        assert!(a.player.pos.distance(b.player.pos) < 1e-6);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_tree_contact_slows_forward_motion() {
        let mut state = quiet_state(5);
        state.trees.clear();

        // Free run for one tick
        let input = TickInput {
            move_forward: true,
            ..Default::default()
        };
        let before = state.player.pos;
        tick(&mut state, &input, DT);
        let free_step = state.player.pos.distance(before);

        // Same setup with a tree planted on the player
        let mut slowed_state = quiet_state(5);
        slowed_state.trees.clear();
        let radial = slowed_state.player.pos.normalize();
        let id = slowed_state.next_entity_id();
        slowed_state.trees.push(crate::sim::state::Tree {
            id,
            pos: slowed_state.player.pos,
            radial,
            offset: PLAYER_HEIGHT,
            scale: 2.0,
        });
        let before = slowed_state.player.pos;
        tick(&mut slowed_state, &input, DT);
        let slowed_step = slowed_state.player.pos.distance(before);

        assert!(slowed_step < free_step);
        assert!((slowed_step / free_step - TREE_SLOWDOWN).abs() < 0.05);
    }
}
