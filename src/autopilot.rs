//! Idle/demo mode controller
//!
//! Looks at the nearest unresolved obstacle in the player's lane and answers
//! it with the matching action: punch breakables, jump low bars, slide under
//! high bars, and step around walls toward the clearest neighbouring lane.

use crate::clamp_lane;
use crate::sim::{GameState, Obstacle, ObstacleKind, TickInput};

/// How far ahead (seconds of travel) the autopilot reacts to obstacles
pub const LOOKAHEAD_SECS: f32 = 1.2;

/// Seconds until `obstacle` first touches the player box at `speed`
fn time_to_contact(state: &GameState, obstacle: &Obstacle, speed: f32) -> f32 {
    let front = obstacle.z + obstacle.kind.shape().size.z / 2.0;
    let gap = -state.tuning.player_half_depth - front;
    gap / speed
}

/// Nearest unresolved obstacle in `lane` inside the look-ahead window
fn nearest_threat(state: &GameState, lane: usize, speed: f32) -> Option<(&Obstacle, f32)> {
    state
        .obstacles()
        .iter()
        .filter(|o| !o.collided && o.lane == lane)
        .map(|o| (o, time_to_contact(state, o, speed)))
        .filter(|&(_, ttc)| ttc > -0.2 && ttc <= LOOKAHEAD_SECS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Pick the neighbouring lane to dodge into, if any
fn escape_direction(state: &GameState, speed: f32) -> Option<i32> {
    let lane = state.player.lane;
    [-1, 1]
        .into_iter()
        .filter(|&dir| clamp_lane(lane, dir) != lane)
        .map(|dir| {
            // Clear lanes rank highest, then lanes with a non-wall threat,
            // then whichever wall is furthest away
            let rank = match nearest_threat(state, clamp_lane(lane, dir), speed) {
                None => f32::INFINITY,
                Some((o, _)) if o.kind != ObstacleKind::Wall => LOOKAHEAD_SECS * 2.0,
                Some((_, ttc)) => ttc,
            };
            (dir, rank)
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(dir, _)| dir)
}

/// Decide this tick's input from the current state
pub fn plan(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let speed = state.speed().max(0.001);
    let tuning = &state.tuning;
    let player = &state.player;

    let Some((obstacle, ttc)) = nearest_threat(state, player.lane, speed) else {
        return input;
    };

    match obstacle.kind {
        ObstacleKind::Breakable => {
            input.punch = !player.is_punching() && ttc <= tuning.punch_duration * 0.5;
        }
        ObstacleKind::Jump => {
            input.jump = ttc <= tuning.jump_duration * 0.2;
        }
        ObstacleKind::Slide => {
            input.slide = ttc <= tuning.slide_duration * 0.3;
        }
        ObstacleKind::Wall => {
            if let Some(dir) = escape_direction(state, speed) {
                input.lane = dir;
            }
        }
    }

    input
}
