//! Runtime-adjustable tuning record
//!
//! A host UI can tweak values live without restarting the run. Forward
//! speed is re-read every tick; fields with downstream state go through
//! their `GameState` setters ([`crate::sim::GameState::set_planet_radius`],
//! [`crate::sim::GameState::regenerate_trees`],
//! [`crate::sim::GameState::set_spawn_rates`]) so dependent geometry and
//! live rates follow the write.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Live game tuning, adjustable while a run is in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base (unshrunk) planet radius
    pub planet_radius: f32,
    /// Number of trees scattered on the surface
    pub tree_count: usize,
    /// Initial spawn probabilities (per tick). The difficulty ramp owns the
    /// live values (`GameState::rates`) once a run starts; changing them
    /// mid-run goes through `GameState::set_spawn_rates`, a direct write to
    /// these fields is not picked up
    pub meteor_spawn_rate: f32,
    pub enemy_spawn_rate: f32,
    pub powerup_spawn_rate: f32,
    /// Player forward speed (units/sec along the surface)
    pub forward_speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planet_radius: BASE_PLANET_RADIUS,
            tree_count: DEFAULT_TREE_COUNT,
            meteor_spawn_rate: METEOR_SPAWN_RATE,
            enemy_spawn_rate: ENEMY_SPAWN_RATE,
            powerup_spawn_rate: POWERUP_SPAWN_RATE,
            forward_speed: FORWARD_SPEED,
        }
    }
}

impl Config {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "planet_panic_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_tuning_constants() {
        let config = Config::default();
        assert_eq!(config.planet_radius, BASE_PLANET_RADIUS);
        assert_eq!(config.tree_count, DEFAULT_TREE_COUNT);
        assert_eq!(config.meteor_spawn_rate, METEOR_SPAWN_RATE);
        assert_eq!(config.forward_speed, FORWARD_SPEED);
    }

    #[test]
    fn test_roundtrips_through_json() {
        let config = Config {
            planet_radius: 55.0,
            tree_count: 42,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.planet_radius, 55.0);
        assert_eq!(back.tree_count, 42);
    }
}
