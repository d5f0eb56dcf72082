//! Best-score persistence
//!
//! A single best-score value surviving process restarts: LocalStorage on
//! wasm, a JSON file natively. Store failures are logged and swallowed so a
//! broken disk or blocked storage quota can never stall the tick loop.

use serde::{Deserialize, Serialize};

/// Errors from the native file store
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Highest score achieved across all runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub score: f64,
}

impl BestScore {
    /// LocalStorage key (wasm) / file name (native)
    const STORAGE_KEY: &'static str = "planet_panic_bestscore";

    /// Record a finished run's score. Returns true (and updates the stored
    /// value) only when it beats the previous best.
    pub fn record(&mut self, score: f64) -> bool {
        if score > self.score {
            self.score = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score: {:.0}", best.score);
                    return best;
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved: {:.0}", self.score);
            }
        }
    }

    /// Load the best score from the store file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(best) => {
                log::info!("Loaded best score: {:.0}", best.score);
                best
            }
            Err(err) => {
                log::warn!("Best score unavailable ({err}), starting fresh");
                Self::default()
            }
        }
    }

    /// Save the best score to the store file (native), logging on failure
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        if let Err(err) = self.try_save() {
            log::warn!("Failed to save best score: {err}");
        } else {
            log::info!("Best score saved: {:.0}", self.score);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn store_path() -> std::path::PathBuf {
        std::env::var_os("PLANET_PANIC_DATA_DIR")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
            .join(format!("{}.json", Self::STORAGE_KEY))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn try_load() -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(Self::store_path())?;
        Ok(serde_json::from_str(&json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn try_save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        std::fs::write(Self::store_path(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_only_on_improvement() {
        let mut best = BestScore::default();
        assert!(best.record(120.0));
        assert_eq!(best.score, 120.0);

        // Equal or lower scores leave the stored value alone
        assert!(!best.record(120.0));
        assert!(!best.record(80.0));
        assert_eq!(best.score, 120.0);

        assert!(best.record(150.5));
        assert_eq!(best.score, 150.5);
    }
}
