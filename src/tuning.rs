//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives on [`Tuning`]. The
//! defaults mirror [`crate::consts`]; hosts may override any subset from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lanes ===
    pub lane_offsets: [f32; 3],
    pub start_lane: usize,
    pub lane_smoothing: f32,

    // === Progression ===
    pub base_speed: f32,
    pub speed_increment: f32,
    pub speed_step_secs: f32,
    pub score_factor: f32,

    // === Player ===
    pub player_half_width: f32,
    pub player_half_depth: f32,
    pub player_run_height: f32,
    pub player_slide_height: f32,
    pub jump_duration: f32,
    pub jump_height: f32,
    pub slide_duration: f32,
    pub punch_duration: f32,
    pub clearance: f32,

    // === Spawning / culling ===
    pub spawn_z: f32,
    pub spawn_spacing: f32,
    pub two_lane_chance: f64,
    pub cull_z: f32,
    pub camera_z: f32,

    // === Scenery ===
    pub road_segments: usize,
    pub road_segment_length: f32,
    pub ambient_count: usize,
    pub ambient_front_z: f32,
    pub ambient_back_z: f32,
    pub ambient_half_width: f32,
    pub ambient_height: f32,

    // === Debris ===
    pub debris_count: usize,
    pub debris_ttl: f32,
    pub debris_gravity: f32,
    pub debris_spread: f32,
    pub debris_lift_min: f32,
    pub debris_lift_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_offsets: LANE_OFFSETS,
            start_lane: START_LANE,
            lane_smoothing: LANE_SMOOTHING,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_step_secs: SPEED_STEP_SECS,
            score_factor: SCORE_FACTOR,

            player_half_width: PLAYER_HALF_WIDTH,
            player_half_depth: PLAYER_HALF_DEPTH,
            player_run_height: PLAYER_RUN_HEIGHT,
            player_slide_height: PLAYER_SLIDE_HEIGHT,
            jump_duration: JUMP_DURATION,
            jump_height: JUMP_HEIGHT,
            slide_duration: SLIDE_DURATION,
            punch_duration: PUNCH_DURATION,
            clearance: CLEARANCE,

            spawn_z: SPAWN_Z,
            spawn_spacing: SPAWN_SPACING,
            two_lane_chance: TWO_LANE_CHANCE,
            cull_z: CULL_Z,
            camera_z: CAMERA_Z,

            road_segments: ROAD_SEGMENTS,
            road_segment_length: ROAD_SEGMENT_LENGTH,
            ambient_count: AMBIENT_COUNT,
            ambient_front_z: AMBIENT_FRONT_Z,
            ambient_back_z: AMBIENT_BACK_Z,
            ambient_half_width: AMBIENT_HALF_WIDTH,
            ambient_height: AMBIENT_HEIGHT,

            debris_count: DEBRIS_COUNT,
            debris_ttl: DEBRIS_TTL,
            debris_gravity: DEBRIS_GRAVITY,
            debris_spread: DEBRIS_SPREAD,
            debris_lift_min: DEBRIS_LIFT_MIN,
            debris_lift_max: DEBRIS_LIFT_MAX,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse tuning, falling back to defaults (with a warning) on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning, using defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Player center height while running
    #[inline]
    pub fn run_y(&self) -> f32 {
        self.player_run_height / 2.0
    }

    /// Player center height while sliding
    #[inline]
    pub fn slide_y(&self) -> f32 {
        self.player_slide_height / 2.0
    }

    /// Check values the simulation relies on being sane
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite, non-negative number",
                })
            }
        }
        fn finite(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                })
            }
        }

        if !self.lane_offsets.windows(2).all(|w| w[0] < w[1]) {
            return Err(TuningError::Invalid {
                field: "lane_offsets",
                reason: "must be strictly ascending",
            });
        }
        if self.start_lane > 2 {
            return Err(TuningError::Invalid {
                field: "start_lane",
                reason: "must be 0, 1 or 2",
            });
        }
        if !(self.lane_smoothing > 0.0 && self.lane_smoothing <= 1.0) {
            return Err(TuningError::Invalid {
                field: "lane_smoothing",
                reason: "must be in (0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.two_lane_chance) {
            return Err(TuningError::Invalid {
                field: "two_lane_chance",
                reason: "must be in [0, 1]",
            });
        }
        non_negative("speed_increment", self.speed_increment)?;
        non_negative("debris_spread", self.debris_spread)?;
        finite("debris_lift_min", self.debris_lift_min)?;
        finite("debris_lift_max", self.debris_lift_max)?;
        if self.debris_lift_min > self.debris_lift_max {
            return Err(TuningError::Invalid {
                field: "debris_lift_min",
                reason: "must not exceed debris_lift_max",
            });
        }
        finite("ambient_front_z", self.ambient_front_z)?;
        finite("ambient_back_z", self.ambient_back_z)?;
        non_negative("ambient_half_width", self.ambient_half_width)?;
        if self.road_segments == 0 {
            return Err(TuningError::Invalid {
                field: "road_segments",
                reason: "must be at least 1",
            });
        }
        if self.ambient_back_z >= self.ambient_front_z {
            return Err(TuningError::Invalid {
                field: "ambient_back_z",
                reason: "must be behind ambient_front_z",
            });
        }

        positive("base_speed", self.base_speed)?;
        positive("speed_step_secs", self.speed_step_secs)?;
        positive("jump_duration", self.jump_duration)?;
        positive("slide_duration", self.slide_duration)?;
        positive("punch_duration", self.punch_duration)?;
        positive("spawn_spacing", self.spawn_spacing)?;
        positive("road_segment_length", self.road_segment_length)?;
        positive("debris_ttl", self.debris_ttl)?;
        positive("player_run_height", self.player_run_height)?;
        positive("player_slide_height", self.player_slide_height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_speed": 14.0 }"#).unwrap();
        assert_eq!(tuning.base_speed, 14.0);
        assert_eq!(tuning.jump_duration, JUMP_DURATION);
        assert_eq!(tuning.lane_offsets, LANE_OFFSETS);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "lane_smoothing": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "lane_smoothing",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "lane_offsets": [1.0, 0.0, 2.0] }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "lane_offsets",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "debris_spread": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "debris_spread",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "debris_lift_min": 12.0, "debris_lift_max": 3.0 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "debris_lift_min",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "two_lane_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "two_lane_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let tuning = Tuning {
            speed_increment: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "speed_increment",
                ..
            })
        ));

        let tuning = Tuning {
            debris_lift_max: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "debris_lift_max",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert_eq!(Tuning::from_json_or_default("{ nope"), Tuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning {
            jump_height: 3.0,
            ..Default::default()
        };
        assert_eq!(Tuning::from_json(&tuning.to_json()).unwrap(), tuning);
    }
}
