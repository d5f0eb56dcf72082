//! Browser bindings
//!
//! The cdylib surface for a host page: module init (logger + panic hook)
//! plus a thin wrapper that owns one run and hands out JSON snapshots.
//! The page owns the frame clock and input sampling; it calls [`WebGame::tick`]
//! once per animation frame and reads the snapshot back for rendering.

use wasm_bindgen::prelude::*;

use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::{BestScore, Config};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Planet Panic module loaded");
}

/// One game session, owned by the JS side
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    best: BestScore,
    best_recorded: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a run. Omitting the seed derives one from the wall clock.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> WebGame {
        let seed = seed.unwrap_or_else(js_sys::Date::now) as u64;
        log::info!("New run with seed {seed}");
        WebGame {
            state: GameState::with_config(seed, Config::load()),
            best: BestScore::load(),
            best_recorded: false,
        }
    }

    /// Advance one frame with the page's sampled input
    pub fn tick(
        &mut self,
        dt: f32,
        turn_left: bool,
        turn_right: bool,
        move_forward: bool,
        brake_turn: bool,
    ) {
        let input = TickInput {
            turn_left,
            turn_right,
            move_forward,
            brake_turn,
        };
        tick(&mut self.state, &input, dt);

        if self.state.phase != GamePhase::Running && !self.best_recorded {
            self.best_recorded = true;
            if self.best.record(self.state.score) {
                self.best.save();
            }
        }
    }

    /// Full presentation snapshot as a JSON string
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_default()
    }

    // Scalar HUD getters, cheaper than a full snapshot

    pub fn score(&self) -> f64 {
        self.state.score
    }

    pub fn best_score(&self) -> f64 {
        self.best.score
    }

    pub fn hits(&self) -> u8 {
        self.state.hits
    }

    pub fn effective_radius(&self) -> f32 {
        self.state.effective_radius
    }

    pub fn phase(&self) -> String {
        match self.state.phase {
            GamePhase::Running => "running".into(),
            GamePhase::Won => "won".into(),
            GamePhase::Lost => "lost".into(),
        }
    }
}
