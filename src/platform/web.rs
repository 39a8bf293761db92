//! Browser bindings
//!
//! Exposes the simulation to JavaScript. The page owns rendering, audio, DOM
//! and input wiring; it calls the request methods on key/touch events, calls
//! `frame` from `requestAnimationFrame`, and reacts to the returned events.

use wasm_bindgen::prelude::*;

use super::FrameClock;
use crate::sim::{GameState, TickInput, tick};
use crate::{HighScores, Tuning};

const HIGHSCORES_KEY: &str = "lane_runner_highscores";

#[wasm_bindgen]
pub struct WebRunner {
    state: GameState,
    clock: FrameClock,
    highscores: HighScores,
    idle_mode: bool,
}

#[wasm_bindgen]
impl WebRunner {
    /// Create a runner; `tuning_json` may override any gameplay constant
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>, highscores_json: Option<String>) -> WebRunner {
        console_error_panic_hook::set_once();
        // A second runner on the same page finds the logger already installed
        let _ = console_log::init_with_level(log::Level::Info);

        let tuning = tuning_json
            .as_deref()
            .map(Tuning::from_json_or_default)
            .unwrap_or_default();
        let highscores = highscores_json
            .as_deref()
            .and_then(|json| match HighScores::from_json(json) {
                Ok(scores) => Some(scores),
                Err(e) => {
                    log::warn!("Ignoring stored high scores: {e}");
                    None
                }
            })
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        log::info!("Lane Runner initialized with seed: {}", seed);

        WebRunner {
            state: GameState::with_tuning(seed, tuning),
            clock: FrameClock::new(),
            highscores,
            idle_mode: false,
        }
    }

    pub fn start_run(&mut self) {
        self.clock.resync();
        self.state.start_run();
    }

    pub fn reset_run(&mut self) {
        self.clock.resync();
        self.state.reset_run();
    }

    pub fn end_run(&mut self) {
        self.state.end_run();
    }

    pub fn request_jump(&mut self) {
        self.state.request_jump();
    }

    pub fn request_slide(&mut self) {
        self.state.request_slide();
    }

    pub fn request_punch(&mut self) {
        self.state.request_punch();
    }

    pub fn request_move_lane(&mut self, direction: i32) {
        self.state.request_move_lane(direction);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if !paused {
            self.clock.resync();
        }
        self.state.set_paused(paused);
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    /// Advance by an explicit delta (seconds); returns drained events as JSON
    pub fn tick(&mut self, delta: f32) -> String {
        let input = TickInput {
            idle_mode: self.idle_mode,
            ..Default::default()
        };
        tick(&mut self.state, &input, delta);
        self.flush_events()
    }

    /// Advance from a `requestAnimationFrame` timestamp; returns events as JSON
    pub fn frame(&mut self, timestamp_ms: f64) -> String {
        let delta = self.clock.frame(timestamp_ms);
        self.tick(delta)
    }

    pub fn score(&self) -> u64 {
        self.state.display_score()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_default()
    }

    /// Instance buffer contents for the current frame
    pub fn instance_bytes(&self) -> Vec<u8> {
        let instances = crate::render::build_instances(&self.state);
        crate::render::as_bytes(&instances).to_vec()
    }

    /// Leaderboard JSON for the page to store under `storage_key()`
    pub fn highscores_json(&self) -> String {
        self.highscores.to_json().unwrap_or_default()
    }

    pub fn storage_key() -> String {
        HIGHSCORES_KEY.to_string()
    }
}

impl WebRunner {
    fn flush_events(&mut self) -> String {
        let events = self.state.drain_events();
        for event in &events {
            self.highscores.record(event);
        }
        serde_json::to_string(&events).unwrap_or_default()
    }
}
