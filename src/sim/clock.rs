//! Pausable simulation clock
//!
//! Elapsed time only advances while the clock is running. Every timed action
//! is measured against this clock, so pausing freezes them all alike.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    elapsed: f32,
    running: bool,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Back to zero, stopped
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.running = false;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds of running time since the last reset
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by `dt` seconds and return the delta actually applied.
    ///
    /// A stopped clock, or a negative/non-finite delta, applies zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        self.elapsed += dt;
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_does_not_advance() {
        let mut clock = SimClock::new();
        assert_eq!(clock.advance(0.5), 0.0);
        assert_eq!(clock.elapsed(), 0.0);

        clock.start();
        assert_eq!(clock.advance(0.5), 0.5);
        clock.stop();
        clock.advance(1.0);
        assert_eq!(clock.elapsed(), 0.5);
    }

    #[test]
    fn test_rejects_bad_deltas() {
        let mut clock = SimClock::new();
        clock.start();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.advance(f32::INFINITY), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = SimClock::new();
        clock.start();
        clock.advance(3.0);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_running());
    }
}
