//! Planet Panic - survival on a shrinking planet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spherical motion, spawning, collisions, game state)
//! - `config`: Runtime-adjustable tuning record
//! - `bestscore`: Best-score persistence
//!
//! Rendering, asset loading, and input-device binding are external
//! collaborators: they feed [`sim::TickInput`] and per-tick deltas in, and
//! read [`sim::Snapshot`] back out.

pub mod bestscore;
pub mod config;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bestscore::BestScore;
pub use config::Config;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// World geometry
    pub const BASE_PLANET_RADIUS: f32 = 40.0;
    /// Radial offset keeping the player's feet on the surface
    pub const PLAYER_HEIGHT: f32 = 0.5;
    /// Shrinking stops (and the run is won) at this radius
    pub const WIN_RADIUS: f32 = 10.0;
    pub const SHRINK_AMOUNT: f32 = 5.0;
    /// Seconds between automatic shrink triggers
    pub const AUTO_SHRINK_INTERVAL: f64 = 10.0;
    /// Seconds a shrink transition takes to interpolate
    pub const SHRINK_DURATION: f64 = 1.0;

    /// Player movement
    pub const FORWARD_SPEED: f32 = 8.0;
    pub const TURN_SPEED: f32 = 2.0;
    /// Fast about-face spin (radians/sec)
    pub const BRAKE_TURN_SPEED: f32 = std::f32::consts::PI * 2.0;
    /// Speed multiplier while pushing through a tree
    pub const TREE_SLOWDOWN: f32 = 0.4;

    /// Health
    pub const MAX_HITS: u8 = 3;
    pub const INVULN_DURATION: f32 = 3.0;

    /// Meteors
    pub const METEOR_SPAWN_RATE: f32 = 0.015;
    pub const METEOR_SPAWN_RATE_MAX: f32 = 0.06;
    pub const METEOR_SPAWN_RATE_STEP: f32 = 0.003;
    pub const METEOR_SPEED: f32 = 35.0;
    pub const METEOR_RADIUS: f32 = 1.0;
    /// Meteors spawn on a shell this many effective radii out
    pub const METEOR_SPAWN_SHELL: f32 = 5.0;
    pub const METEOR_TRAIL_LENGTH: usize = 15;

    /// Explosions
    pub const EXPLOSION_DURATION: f32 = 1.0;
    pub const BLAST_DAMAGE_RADIUS: f32 = 3.0;
    pub const EXPLOSION_PARTICLE_COUNT: usize = 30;
    pub const EXPLOSION_PARTICLE_SPEED: f32 = 15.0;
    pub const EXPLOSION_PARTICLE_LIFE: f32 = 1.5;

    /// Enemies
    pub const ENEMY_SPAWN_RATE: f32 = 0.008;
    pub const ENEMY_SPAWN_RATE_MAX: f32 = 0.012;
    pub const ENEMY_SPAWN_RATE_STEP: f32 = 0.0008;
    /// Table speeds are multiplied by this before use
    pub const ENEMY_SPEED_SCALE: f32 = 2.5;
    pub const ENEMY_TRAIL_LENGTH: usize = 8;

    /// Power-ups
    pub const POWERUP_SPAWN_RATE: f32 = 0.005;
    pub const POWERUP_SPAWN_RATE_MAX: f32 = 0.0003;
    pub const POWERUP_SPAWN_RATE_STEP: f32 = 0.0001;

    /// Collision thresholds
    pub const COLLISION_DISTANCE: f32 = 2.0;
    /// Power-ups are a little easier to grab
    pub const POWERUP_PICKUP_DISTANCE: f32 = COLLISION_DISTANCE + 0.5;
    pub const LAVA_CONTACT_DISTANCE: f32 = 1.5;
    /// Seconds of continuous lava contact per hit
    pub const LAVA_DAMAGE_INTERVAL: f32 = 0.3;

    /// Trees
    pub const TREE_COLLISION_DISTANCE: f32 = 5.0;
    pub const TREE_CLEAR_RADIUS: f32 = 10.0;
    pub const DEFAULT_TREE_COUNT: usize = 100;

    /// Scoring
    pub const SCORE_PER_SECOND: f64 = 10.0;
    pub const SCORE_PER_POWERUP: f64 = 100.0;
    pub const SCORE_PER_ENEMY: f64 = 50.0;

    /// Seconds between power-up rate ratchets
    pub const DIFFICULTY_INCREASE_INTERVAL: f64 = 8.0;

    /// Largest delta a single tick will integrate (stalled-tab guard)
    pub const MAX_TICK_DT: f32 = 0.1;
}

/// Project a vector onto the tangent plane perpendicular to `radial`
///
/// `radial` must be unit length. The result is not renormalized; callers
/// that need a direction should `normalize_or_zero` and handle the
/// degenerate (antipodal) case.
#[inline]
pub fn project_onto_tangent(v: Vec3, radial: Vec3) -> Vec3 {
    v - radial * v.dot(radial)
}

/// Uniform random unit vector (random point on the unit sphere)
pub fn random_unit_vector(rng: &mut impl rand::Rng) -> Vec3 {
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    let phi = (2.0 * rng.random::<f32>() - 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_tangent_projection_is_perpendicular() {
        let radial = Vec3::new(1.0, 2.0, -0.5).normalize();
        let v = Vec3::new(-3.0, 0.25, 7.0);
        let projected = project_onto_tangent(v, radial);
        assert!(projected.dot(radial).abs() < 1e-5);
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }
}
