//! Game state and core simulation types
//!
//! One owned struct holds the whole world; every tick takes it by exclusive
//! reference. Entity classes are separate structs (no kind-dependent
//! optional fields), each kept in its own vector in insertion order.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::shrink::ShrinkState;
use super::spawn::{self, SpawnRates};
use crate::config::Config;
use crate::consts::*;
use crate::random_unit_vector;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Run in progress
    Running,
    /// Planet shrank down to the win radius
    Won,
    /// Player ran out of hits
    Lost,
}

/// Enemy movement behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyBehavior {
    /// Pursue the player along the surface
    Chase,
    /// Hop toward the player (currently moves like Chase)
    Jump,
}

/// Enemy archetype table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Chaser,
    Brute,
    Jumper,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Chaser, EnemyKind::Brute, EnemyKind::Jumper];

    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Chaser => "chaser",
            EnemyKind::Brute => "brute",
            EnemyKind::Jumper => "jumper",
        }
    }

    pub fn behavior(self) -> EnemyBehavior {
        match self {
            EnemyKind::Chaser | EnemyKind::Brute => EnemyBehavior::Chase,
            EnemyKind::Jumper => EnemyBehavior::Jump,
        }
    }

    /// Surface speed in units/sec
    pub fn speed(self) -> f32 {
        let base = match self {
            EnemyKind::Chaser => 2.0,
            EnemyKind::Brute => 1.2,
            EnemyKind::Jumper => 1.6,
        };
        base * ENEMY_SPEED_SCALE
    }

    /// Model scale hint for the renderer
    pub fn visual_scale(self) -> f32 {
        match self {
            EnemyKind::Chaser => 1.0,
            EnemyKind::Brute => 0.8,
            EnemyKind::Jumper => 1.2,
        }
    }
}

/// The player, constrained to the sphere surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub orientation: Quat,
    /// Radial at the end of the previous tick; the incremental orientation
    /// correction rotates from this to the new radial
    pub radial: Vec3,
}

impl Player {
    fn at_radius(radius: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, radius + PLAYER_HEIGHT, 0.0),
            orientation: Quat::IDENTITY,
            radial: Vec3::Y,
        }
    }
}

/// A meteor falling toward the planet center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meteor {
    pub id: u32,
    pub pos: Vec3,
    /// Unit vector toward the world center
    pub direction: Vec3,
    pub speed: f32,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec3>,
}

impl Meteor {
    pub fn new(id: u32, pos: Vec3, direction: Vec3, speed: f32) -> Self {
        // Seed the trail as a streak behind the spawn point
        let trail = (0..METEOR_TRAIL_LENGTH)
            .map(|j| pos - direction * (j as f32 * 2.0))
            .collect();
        Self {
            id,
            pos,
            direction,
            speed,
            trail,
        }
    }

    /// Record current position to trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        if self.trail.len() > METEOR_TRAIL_LENGTH {
            self.trail.pop();
        }
    }
}

/// A surface-bound enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec3,
    pub orientation: Quat,
    /// Radial at the end of the previous tick
    pub radial: Vec3,
    /// Radial offset above the surface
    pub height: f32,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<Vec3>,
}

impl Enemy {
    pub fn record_trail(&mut self) {
        self.trail.insert(0, self.pos);
        if self.trail.len() > ENEMY_TRAIL_LENGTH {
            self.trail.pop();
        }
    }
}

/// A lava pool left by a meteor impact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LavaPool {
    pub id: u32,
    pub pos: Vec3,
    /// Position rescaled to the base (unshrunk) radius; single source of
    /// truth for repositioning while the planet shrinks
    pub original_pos: Vec3,
    pub radius: f32,
    /// Phase for the pulsing animation
    pub pulse: f32,
}

impl LavaPool {
    /// Visual scale for the renderer (pulses with phase)
    pub fn pulse_scale(&self) -> f32 {
        1.0 + self.pulse.sin() * 0.2
    }
}

/// A collectible that heals one hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec3,
    /// See [`LavaPool::original_pos`]
    pub original_pos: Vec3,
}

/// An expanding blast wave; deals damage within [`BLAST_DAMAGE_RADIUS`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shockwave {
    pub id: u32,
    pub pos: Vec3,
    /// Seconds since the impact
    pub age: f32,
}

/// A visual-only debris particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds of life remaining
    pub life: f32,
}

/// A static tree obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub id: u32,
    pub pos: Vec3,
    pub radial: Vec3,
    /// Radial offset above the surface (derived from scale)
    pub offset: f32,
    pub scale: f32,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Elapsed simulated time in seconds
    pub game_time: f64,
    pub score: f64,
    pub hits: u8,
    pub invulnerable: bool,
    pub invuln_timer: f32,
    pub in_lava: bool,
    pub lava_damage_timer: f32,

    /// Unshrunk radius; `original_pos` rescaling is relative to this
    pub base_radius: f32,
    /// Committed radius (between shrink transitions)
    pub current_radius: f32,
    /// Radius used for positioning this tick (interpolated while shrinking)
    pub effective_radius: f32,
    pub shrink: ShrinkState,
    pub last_shrink_time: f64,

    /// Live spawn probabilities (ramped by the difficulty ratchet)
    pub rates: SpawnRates,
    pub last_ramp_second: u64,
    pub last_powerup_ramp: u64,

    pub player: Player,
    pub meteors: Vec<Meteor>,
    pub enemies: Vec<Enemy>,
    pub lava_pools: Vec<LavaPool>,
    pub power_ups: Vec<PowerUp>,
    pub shockwaves: Vec<Shockwave>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub trees: Vec<Tree>,

    /// Live tuning, re-read each tick
    pub config: Config,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Config::default())
    }

    /// Create a new run with explicit tuning
    pub fn with_config(seed: u64, config: Config) -> Self {
        let radius = config.planet_radius.max(WIN_RADIUS);
        let tree_count = config.tree_count;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            game_time: 0.0,
            score: 0.0,
            hits: 0,
            invulnerable: false,
            invuln_timer: 0.0,
            in_lava: false,
            lava_damage_timer: 0.0,
            base_radius: radius,
            current_radius: radius,
            effective_radius: radius,
            shrink: ShrinkState::Idle,
            last_shrink_time: 0.0,
            rates: SpawnRates::from_config(&config),
            last_ramp_second: 0,
            last_powerup_ramp: 0,
            player: Player::at_radius(radius),
            meteors: Vec::new(),
            enemies: Vec::new(),
            lava_pools: Vec::new(),
            power_ups: Vec::new(),
            shockwaves: Vec::new(),
            particles: Vec::new(),
            trees: Vec::new(),
            config,
            next_id: 1,
        };
        spawn::place_trees(&mut state, tree_count);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Register a hit on the player and arm the invulnerability window.
    /// Transitions to Lost exactly once when the hit cap is reached.
    pub fn take_hit(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.hits += 1;
        self.invulnerable = true;
        self.invuln_timer = INVULN_DURATION;
        log::debug!("Hit taken ({}/{})", self.hits, MAX_HITS);
        if self.hits >= MAX_HITS {
            self.phase = GamePhase::Lost;
            log::info!(
                "Run lost at t={:.1}s with score {:.0}",
                self.game_time,
                self.score
            );
        }
    }

    /// Recover one hit point; no-op at full health
    pub fn heal(&mut self) {
        if self.hits > 0 {
            self.hits -= 1;
        }
    }

    /// Spawn a blast shockwave plus debris particles at `pos`
    pub fn spawn_explosion(&mut self, pos: Vec3) {
        let id = self.next_entity_id();
        self.shockwaves.push(Shockwave { id, pos, age: 0.0 });
        for _ in 0..EXPLOSION_PARTICLE_COUNT {
            let dir = random_unit_vector(&mut self.rng);
            self.particles.push(Particle {
                pos,
                vel: dir * EXPLOSION_PARTICLE_SPEED,
                life: EXPLOSION_PARTICLE_LIFE,
            });
        }
    }

    /// Spawn a lava pool at a surface point on the sphere of radius `eff`
    pub fn spawn_lava(&mut self, pos: Vec3, eff: f32) {
        let id = self.next_entity_id();
        let radius = 1.0 + self.rng.random::<f32>() * 0.3;
        let pulse = self.rng.random::<f32>() * std::f32::consts::TAU;
        self.lava_pools.push(LavaPool {
            id,
            pos,
            original_pos: pos * (self.base_radius / eff),
            radius,
            pulse,
        });
    }

    /// External radius override (host UI). Repositions trees like the
    /// shrink transition does; monotonicity of the effective radius is
    /// waived for explicit writes.
    pub fn set_planet_radius(&mut self, radius: f32) {
        let radius = radius.max(WIN_RADIUS);
        self.current_radius = radius;
        self.effective_radius = radius;
        self.config.planet_radius = radius;
        for tree in &mut self.trees {
            tree.pos = tree.radial * (radius + tree.offset);
        }
        log::info!("Planet radius set to {radius:.1}");
    }

    /// External spawn-rate override (host UI). Writes through to both the
    /// config and the live rates; the difficulty ramp resumes ratcheting
    /// from the new values.
    pub fn set_spawn_rates(&mut self, meteor: f32, enemy: f32, power_up: f32) {
        self.config.meteor_spawn_rate = meteor;
        self.config.enemy_spawn_rate = enemy;
        self.config.powerup_spawn_rate = power_up;
        self.rates = SpawnRates::from_config(&self.config);
        log::info!("Spawn rates set to {meteor}/{enemy}/{power_up}");
    }

    /// Throw away the tree field and scatter a new one
    pub fn regenerate_trees(&mut self, count: usize) {
        self.config.tree_count = count;
        spawn::place_trees(self, count);
        log::info!("{count} trees regenerated");
    }

    /// Read-only view for the renderer and HUD
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            game_time: self.game_time,
            score: self.score,
            hits: self.hits,
            max_hits: MAX_HITS,
            invulnerable: self.invulnerable,
            in_lava: self.in_lava,
            effective_radius: self.effective_radius,
            player: Pose {
                pos: self.player.pos,
                orientation: self.player.orientation,
            },
            meteors: self
                .meteors
                .iter()
                .map(|m| MeteorView {
                    pos: m.pos,
                    trail: m.trail.clone(),
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pose: Pose {
                        pos: e.pos,
                        orientation: e.orientation,
                    },
                    kind: e.kind,
                    visual_scale: e.kind.visual_scale(),
                    trail: e.trail.clone(),
                })
                .collect(),
            lava_pools: self
                .lava_pools
                .iter()
                .map(|l| LavaView {
                    pos: l.pos,
                    radius: l.radius,
                    pulse_scale: l.pulse_scale(),
                })
                .collect(),
            power_ups: self.power_ups.iter().map(|p| p.pos).collect(),
            shockwaves: self
                .shockwaves
                .iter()
                .map(|s| ShockwaveView {
                    pos: s.pos,
                    progress: s.age / EXPLOSION_DURATION,
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    life: p.life,
                })
                .collect(),
            trees: self
                .trees
                .iter()
                .map(|t| TreeView {
                    pos: t.pos,
                    radial: t.radial,
                    scale: t.scale,
                })
                .collect(),
        }
    }
}

/// Position plus orientation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pose {
    pub pos: Vec3,
    pub orientation: Quat,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeteorView {
    pub pos: Vec3,
    pub trail: Vec<Vec3>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub pose: Pose,
    pub kind: EnemyKind,
    pub visual_scale: f32,
    pub trail: Vec<Vec3>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LavaView {
    pub pos: Vec3,
    pub radius: f32,
    pub pulse_scale: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShockwaveView {
    pub pos: Vec3,
    /// 0 at impact, 1 at expiry
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleView {
    pub pos: Vec3,
    pub life: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TreeView {
    pub pos: Vec3,
    pub radial: Vec3,
    pub scale: f32,
}

/// Per-tick presentation state: player and entity poses, HUD scalars, and
/// terminal flags. Everything a renderer needs, nothing it can mutate.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub game_time: f64,
    pub score: f64,
    pub hits: u8,
    pub max_hits: u8,
    pub invulnerable: bool,
    pub in_lava: bool,
    pub effective_radius: f32,
    pub player: Pose,
    pub meteors: Vec<MeteorView>,
    pub enemies: Vec<EnemyView>,
    pub lava_pools: Vec<LavaView>,
    pub power_ups: Vec<Vec3>,
    pub shockwaves: Vec<ShockwaveView>,
    pub particles: Vec<ParticleView>,
    pub trees: Vec<TreeView>,
}
