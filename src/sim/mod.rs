//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (no ambient randomness)
//! - Stable iteration order (entity vectors, insertion order)
//! - No rendering or platform dependencies
//!
//! The host owns the clock: it calls [`tick`] once per frame with the
//! elapsed delta and whatever [`TickInput`] it sampled, then reads a
//! [`Snapshot`] for presentation.

pub mod collision;
pub mod motion;
pub mod shrink;
pub mod spawn;
pub mod state;
pub mod tick;

pub use motion::{SurfaceStep, chase_direction, step_on_surface};
pub use shrink::ShrinkState;
pub use spawn::SpawnRates;
pub use state::{
    Enemy, EnemyBehavior, EnemyKind, GamePhase, GameState, LavaPool, Meteor, Particle, Player,
    Pose, PowerUp, Shockwave, Snapshot, Tree,
};
pub use tick::{TickInput, tick};
