//! High score leaderboard
//!
//! Tracks the top 10 runs in memory. Storage is the host's business; the
//! leaderboard only converts to and from JSON.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u64,
    /// Distance travelled
    pub distance: f32,
    /// Seconds survived
    pub elapsed: f32,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot a new score would take: after every entry it does not beat
    fn insertion_index(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// Zero never ranks; otherwise the board must have room or a lower entry
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0 && self.insertion_index(score) < MAX_HIGH_SCORES
    }

    /// 1-based rank `score` would take, if it qualifies
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score).then(|| self.insertion_index(score) + 1)
    }

    /// Insert a finished run. Ties rank below existing entries.
    pub fn add_score(&mut self, score: u64, distance: f32, elapsed: f32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                distance,
                elapsed,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Feed one drained event; only `RunEnded` adds an entry
    pub fn record(&mut self, event: &GameEvent) -> Option<usize> {
        let GameEvent::RunEnded {
            run_id,
            final_score,
            distance,
            elapsed,
        } = *event
        else {
            return None;
        };
        let rank = self.add_score(final_score, distance, elapsed)?;
        log::info!("Run {run_id} placed #{rank} with {final_score}");
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a stored leaderboard, keeping it sorted and bounded
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: HighScores = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TickInput, tick};

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_ranks_and_truncation() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, s as f32, s as f32);
        }
        assert_eq!(scores.top_score(), Some(100));
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add_score(55, 5.5, 5.5), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_records_run_ended() {
        let mut state = GameState::new(1);
        state.start_run();
        state.progress.score = 77.0;
        state.end_run();

        let mut scores = HighScores::new();
        for event in state.drain_events() {
            scores.record(&event);
        }
        assert_eq!(scores.top_score(), Some(77));
    }

    #[test]
    fn test_reset_before_drain_keeps_ended_run() {
        let mut state = GameState::new(2);
        state.start_run();
        for _ in 0..120 {
            state.world.obstacles.clear();
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }
        let distance = state.progress.distance;
        let elapsed = state.elapsed();
        state.end_run();
        state.reset_run();

        let mut scores = HighScores::new();
        for event in state.drain_events() {
            scores.record(&event);
        }
        assert_eq!(scores.entries.len(), 1);
        let entry = &scores.entries[0];
        assert_eq!(entry.score, distance.floor() as u64);
        assert_eq!(entry.distance, distance);
        assert_eq!(entry.elapsed, elapsed);
        assert!(entry.distance > 0.0 && entry.elapsed > 0.0);
    }

    #[test]
    fn test_ties_rank_below_existing() {
        let mut scores = HighScores::new();
        scores.add_score(50, 1.0, 1.0);
        assert_eq!(scores.add_score(50, 2.0, 2.0), Some(2));
        assert_eq!(scores.entries[0].distance, 1.0);
    }

    #[test]
    fn test_json_restores_order() {
        let json = r#"{"entries":[
            {"score":5,"distance":5.0,"elapsed":1.0},
            {"score":9,"distance":9.0,"elapsed":2.0}
        ]}"#;
        let scores = HighScores::from_json(json).unwrap();
        assert_eq!(scores.top_score(), Some(9));
        let back = HighScores::from_json(&scores.to_json().unwrap()).unwrap();
        assert_eq!(back, scores);
        assert!(HighScores::from_json("[").is_err());
    }
}
