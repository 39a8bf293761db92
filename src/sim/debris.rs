//! Debris bursts from destroyed obstacles
//!
//! Visual only: debris never affects gameplay, but it lives in the simulation
//! so it pauses, transports and resets with everything else.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A burst of particles sharing one lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisBatch {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    /// Seconds left
    pub ttl: f32,
    /// Seconds at creation, for fade
    pub max_ttl: f32,
    pub color: [f32; 3],
}

impl DebrisBatch {
    /// Spawn `debris_count` particles at `origin` with randomized velocities:
    /// lateral and forward symmetric around zero, vertical biased upward
    pub fn burst<R: Rng + ?Sized>(origin: Vec3, color: [f32; 3], rng: &mut R, tuning: &Tuning) -> Self {
        let count = tuning.debris_count;
        let spread = tuning.debris_spread;
        let lift_max = tuning.debris_lift_max.max(tuning.debris_lift_min);

        let velocities = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-spread..=spread),
                    rng.random_range(tuning.debris_lift_min..=lift_max),
                    rng.random_range(-spread..=spread),
                )
            })
            .collect();

        Self {
            positions: vec![origin; count],
            velocities,
            ttl: tuning.debris_ttl,
            max_ttl: tuning.debris_ttl,
            color,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Remaining life fraction, used as opacity
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.max_ttl <= 0.0 {
            return 0.0;
        }
        (self.ttl / self.max_ttl).clamp(0.0, 1.0)
    }

    /// Move with the world along the travel axis
    pub fn translate_z(&mut self, distance: f32) {
        for pos in &mut self.positions {
            pos.z += distance;
        }
    }

    /// Age and integrate one tick. Returns false once the batch has expired.
    ///
    /// Gravity is the per-tick `-g * dt^2` nudge rather than exact kinematics.
    pub fn update(&mut self, dt: f32, gravity: f32) -> bool {
        self.ttl -= dt;
        if self.ttl <= 0.0 {
            return false;
        }
        for (pos, vel) in self.positions.iter_mut().zip(&self.velocities) {
            *pos += *vel * dt;
            pos.y -= gravity * dt * dt;
        }
        true
    }
}

/// Integrate every batch and drop the expired ones
pub fn update_batches(batches: &mut Vec<DebrisBatch>, dt: f32, gravity: f32) {
    batches.retain_mut(|batch| batch.update(dt, gravity));
}
