//! Score and speed progression
//!
//! Speed is a staircase of elapsed time only; score is distance travelled.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// World speed at `elapsed` seconds: `base + floor(elapsed / step) * increment`
#[inline]
pub fn speed_at(elapsed: f32, tuning: &Tuning) -> f32 {
    tuning.base_speed + (elapsed / tuning.speed_step_secs).floor() * tuning.speed_increment
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Accumulated (fractional) score
    pub score: f32,
    /// Current world speed
    pub speed: f32,
    /// Total distance travelled this run
    pub distance: f32,
}

impl Progress {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0.0,
            speed: tuning.base_speed,
            distance: 0.0,
        }
    }

    /// Score as shown to the player
    #[inline]
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Credit `distance` travelled. Returns the new display score when it changed.
    pub fn add_distance(&mut self, distance: f32, tuning: &Tuning) -> Option<u64> {
        if distance <= 0.0 {
            return None;
        }
        let before = self.display_score();
        self.distance += distance;
        self.score += distance * tuning.score_factor.max(0.0);
        let after = self.display_score();
        (after != before).then_some(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_staircase() {
        let tuning = Tuning::default();
        let base = tuning.base_speed;
        let inc = tuning.speed_increment;
        assert_eq!(speed_at(0.0, &tuning), base);
        assert_eq!(speed_at(9.99, &tuning), base);
        assert_eq!(speed_at(10.0, &tuning), base + inc);
        assert_eq!(speed_at(23.4, &tuning), base + 2.0 * inc);
    }

    #[test]
    fn test_score_changed_reports_floor() {
        let tuning = Tuning::default();
        let mut progress = Progress::new(&tuning);
        assert_eq!(progress.add_distance(0.4, &tuning), None);
        assert_eq!(progress.add_distance(0.7, &tuning), Some(1));
        assert_eq!(progress.display_score(), 1);
        assert_eq!(progress.add_distance(-5.0, &tuning), None);
        assert_eq!(progress.display_score(), 1);
    }

    proptest! {
        #[test]
        fn prop_speed_never_decreases(a in 0.0f32..1000.0, b in 0.0f32..1000.0) {
            let tuning = Tuning::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(speed_at(lo, &tuning) <= speed_at(hi, &tuning));
        }

        #[test]
        fn prop_score_never_decreases(steps in proptest::collection::vec(-1.0f32..5.0, 1..100)) {
            let tuning = Tuning::default();
            let mut progress = Progress::new(&tuning);
            for step in steps {
                let before = progress.score;
                progress.add_distance(step, &tuning);
                prop_assert!(progress.score >= before);
            }
        }
    }
}
