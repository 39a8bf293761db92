//! Platform abstraction layer
//!
//! Host-side glue around the simulation:
//! - Frame timing (host timestamps to clamped tick deltas)
//! - Browser bindings (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::MAX_FRAME_DT;

/// Turns host frame timestamps (milliseconds) into tick deltas (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous frame, clamped to `MAX_FRAME_DT`.
    ///
    /// The first frame, and any frame whose timestamp goes backwards, yields 0.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta.min(MAX_FRAME_DT)
    }

    /// Forget the last timestamp (after a pause or a hidden tab)
    pub fn resync(&mut self) {
        self.last_ms = None;
    }
}
