//! Lane and action state machine for the player avatar
//!
//! The player never moves along z; the world comes to it. Lateral position
//! glides toward the current lane, vertical position follows the active
//! action (jump arc, slide crouch, or run height).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{clamp_lane, lane_x};

/// Timed player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Jump,
    Slide,
    Punch,
}

/// An action running on the simulation clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionTimer {
    pub active: bool,
    /// Clock time the action began
    pub start: f32,
    /// Length in clock seconds
    pub duration: f32,
}

impl ActionTimer {
    pub fn begin(&mut self, now: f32, duration: f32) {
        self.active = true;
        self.start = now;
        self.duration = duration;
    }

    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Normalized progress, 0 at start and 1 at expiry
    #[inline]
    pub fn progress(&self, now: f32) -> f32 {
        (now - self.start) / self.duration
    }

    #[inline]
    pub fn expired(&self, now: f32) -> bool {
        now - self.start >= self.duration
    }

    /// Clear the timer if its time is up; returns whether it is still active
    fn tick(&mut self, now: f32) -> bool {
        if self.active && self.expired(now) {
            self.active = false;
        }
        self.active
    }
}

/// Height above run level for a jump at `progress` through its duration.
///
/// Symmetric parabola: zero at 0 and 1, `height` at 0.5.
#[inline]
pub fn jump_offset(progress: f32, height: f32) -> f32 {
    if progress <= 0.0 || progress >= 1.0 {
        return 0.0;
    }
    height * 4.0 * (progress - progress * progress)
}

/// The player avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Target lane, always in `0..=2`
    pub lane: usize,
    pub jump: ActionTimer,
    pub slide: ActionTimer,
    pub punch: ActionTimer,
    /// Smoothed position; z stays at the origin
    pub pos: Vec3,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let lane = tuning.start_lane.min(2);
        Self {
            lane,
            jump: ActionTimer::default(),
            slide: ActionTimer::default(),
            punch: ActionTimer::default(),
            pos: Vec3::new(lane_x(&tuning.lane_offsets, lane), tuning.run_y(), 0.0),
        }
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.jump.active
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.slide.active
    }

    #[inline]
    pub fn is_punching(&self) -> bool {
        self.punch.active
    }

    /// Step one lane left (-1) or right (+1). Refused mid-jump.
    ///
    /// Returns true if the target lane changed.
    pub fn move_lane(&mut self, direction: i32) -> bool {
        if self.is_jumping() {
            return false;
        }
        let lane = clamp_lane(self.lane, direction.signum());
        let changed = lane != self.lane;
        self.lane = lane;
        changed
    }

    /// Begin a jump unless already airborne or sliding
    pub fn start_jump(&mut self, now: f32, tuning: &Tuning) -> bool {
        if self.is_jumping() || self.is_sliding() {
            return false;
        }
        self.jump.begin(now, tuning.jump_duration);
        true
    }

    /// Begin a slide unless already airborne or sliding
    pub fn start_slide(&mut self, now: f32, tuning: &Tuning) -> bool {
        if self.is_jumping() || self.is_sliding() {
            return false;
        }
        self.slide.begin(now, tuning.slide_duration);
        self.pos.y = tuning.slide_y();
        true
    }

    /// Begin a punch; independent of lane, jump and slide
    pub fn start_punch(&mut self, now: f32, tuning: &Tuning) -> bool {
        if self.is_punching() {
            return false;
        }
        self.punch.begin(now, tuning.punch_duration);
        true
    }

    /// Expire finished actions and resolve the pose for clock time `now`
    pub fn update(&mut self, now: f32, tuning: &Tuning) {
        self.punch.tick(now);

        if self.jump.active {
            let progress = self.jump.progress(now);
            if progress < 1.0 {
                self.pos.y = tuning.run_y() + jump_offset(progress, tuning.jump_height);
            } else {
                self.jump.clear();
                self.pos.y = tuning.run_y();
            }
        } else if self.slide.tick(now) {
            self.pos.y = tuning.slide_y();
        } else {
            self.pos.y = tuning.run_y();
        }

        // Exponential glide toward the lane; never snaps
        let target_x = lane_x(&tuning.lane_offsets, self.lane);
        self.pos.x += (target_x - self.pos.x) * tuning.lane_smoothing;
    }
}
