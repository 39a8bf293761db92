//! Lane Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, actions, obstacles, collisions)
//! - `tuning`: Data-driven game balance
//! - `autopilot`: Idle/demo mode controller
//! - `render`: Read-only projection of state into instance records
//! - `highscores`: Leaderboard fed by run-ended events
//! - `platform`: Browser/native host shims

pub mod autopilot;
pub mod highscores;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed host timestep used by the native demo (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest delta a host frame may feed into a tick
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lateral lane centers, left to right
    pub const LANE_OFFSETS: [f32; 3] = [-2.5, 0.0, 2.5];
    /// Lane the player starts in
    pub const START_LANE: usize = 1;
    /// Per-tick exponential smoothing toward the target lane
    pub const LANE_SMOOTHING: f32 = 0.1;

    /// World speed at t=0 (units/s)
    pub const BASE_SPEED: f32 = 10.0;
    /// Speed added every `SPEED_STEP_SECS` of elapsed time
    pub const SPEED_INCREMENT: f32 = 2.0;
    pub const SPEED_STEP_SECS: f32 = 10.0;
    /// Score per unit of distance traveled
    pub const SCORE_FACTOR: f32 = 1.0;

    /// Player box, centered on the player's position
    pub const PLAYER_HALF_WIDTH: f32 = 0.4;
    pub const PLAYER_HALF_DEPTH: f32 = 0.4;
    pub const PLAYER_RUN_HEIGHT: f32 = 1.0;
    pub const PLAYER_SLIDE_HEIGHT: f32 = 0.5;
    /// Center height while running (box rests on the ground)
    pub const RUN_Y: f32 = PLAYER_RUN_HEIGHT / 2.0;
    /// Center height while sliding
    pub const SLIDE_Y: f32 = PLAYER_SLIDE_HEIGHT / 2.0;

    /// Jump timing and apex above `RUN_Y`
    pub const JUMP_DURATION: f32 = 0.5;
    pub const JUMP_HEIGHT: f32 = 2.0;
    pub const SLIDE_DURATION: f32 = 1.0;
    pub const PUNCH_DURATION: f32 = 0.3;
    /// Vertical separation required for jump-over / slide-under
    pub const CLEARANCE: f32 = 0.5;

    /// Obstacles appear here (negative z is ahead of the player)
    pub const SPAWN_Z: f32 = -100.0;
    /// Distance the spawn cursor must travel before the next group
    pub const SPAWN_SPACING: f32 = 20.0;
    /// Probability that a group covers two lanes instead of one
    pub const TWO_LANE_CHANCE: f64 = 0.3;
    /// Obstacles past this z are behind the camera and culled
    pub const CULL_Z: f32 = 10.0;
    pub const CAMERA_Z: f32 = 5.0;

    /// Road strip tiling
    pub const ROAD_SEGMENTS: usize = 3;
    pub const ROAD_SEGMENT_LENGTH: f32 = 50.0;

    /// Ambient drifting particle field
    pub const AMBIENT_COUNT: usize = 200;
    pub const AMBIENT_FRONT_Z: f32 = 10.0;
    pub const AMBIENT_BACK_Z: f32 = -100.0;
    pub const AMBIENT_HALF_WIDTH: f32 = 20.0;
    pub const AMBIENT_HEIGHT: f32 = 15.0;

    /// Debris burst on breakable destruction
    pub const DEBRIS_COUNT: usize = 50;
    pub const DEBRIS_TTL: f32 = 1.0;
    pub const DEBRIS_GRAVITY: f32 = 9.8;
    pub const DEBRIS_SPREAD: f32 = 5.0;
    pub const DEBRIS_LIFT_MIN: f32 = 2.0;
    pub const DEBRIS_LIFT_MAX: f32 = 10.0;
}

/// Lateral offset of a lane, clamping out-of-range indices to the nearest edge
#[inline]
pub fn lane_x(offsets: &[f32; 3], lane: usize) -> f32 {
    offsets[lane.min(offsets.len() - 1)]
}

/// Apply a signed lane step and clamp into `[0, 2]`
#[inline]
pub fn clamp_lane(lane: usize, direction: i32) -> usize {
    (lane as i32 + direction).clamp(0, 2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_lane_edges() {
        assert_eq!(clamp_lane(0, -1), 0);
        assert_eq!(clamp_lane(0, 1), 1);
        assert_eq!(clamp_lane(2, 1), 2);
        assert_eq!(clamp_lane(1, -5), 0);
    }

    #[test]
    fn test_lane_x() {
        assert_eq!(lane_x(&consts::LANE_OFFSETS, 0), -2.5);
        assert_eq!(lane_x(&consts::LANE_OFFSETS, 9), 2.5);
    }

    proptest! {
        #[test]
        fn prop_lane_always_in_range(
            directions in proptest::collection::vec(-3i32..=3, 1..200),
        ) {
            let mut state = sim::GameState::new(0);
            state.start_run();
            for dir in directions {
                let before = state.player.lane;
                state.request_move_lane(dir);
                let lane = state.player.lane;
                prop_assert!(lane <= 2);
                prop_assert_eq!(lane, clamp_lane(before, dir.signum()));
            }
        }

        #[test]
        fn prop_clamp_lane_stays_in_range(lane in 0usize..3, dir in any::<i16>()) {
            prop_assert!(clamp_lane(lane, dir as i32) <= 2);
        }
    }
}
