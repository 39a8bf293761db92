//! Procedural obstacle spawning
//!
//! The spawn cursor starts on the spawn plane and is carried toward the
//! player by world transport. Once it has travelled `spawn_spacing`, a new
//! group is rolled and the cursor returns to the spawn plane.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use crate::tuning::Tuning;

/// One spawn decision: a single kind across one or two distinct lanes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub kind: ObstacleKind,
    /// Distinct lanes, ascending
    pub lanes: Vec<usize>,
}

/// Roll a group: 1 or 2 lanes (weighted), distinct lanes, one shared kind
pub fn roll_group<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> SpawnGroup {
    let size = if rng.random_bool(tuning.two_lane_chance) {
        2
    } else {
        1
    };
    let mut lanes = index::sample(rng, 3, size).into_vec();
    lanes.sort_unstable();
    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    SpawnGroup { kind, lanes }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Tracked z of the last group's spawn point
    pub cursor_z: f32,
}

impl Spawner {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            cursor_z: tuning.spawn_z,
        }
    }

    /// Carry the cursor along with the world
    #[inline]
    pub fn advance(&mut self, distance: f32) {
        self.cursor_z += distance;
    }

    /// Whether the cursor has cleared the minimum spacing
    #[inline]
    pub fn ready(&self, tuning: &Tuning) -> bool {
        self.cursor_z - tuning.spawn_z >= tuning.spawn_spacing
    }

    /// Roll a group if the spacing gate is open, resetting the cursor to the
    /// spawn plane
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        tuning: &Tuning,
    ) -> Option<SpawnGroup> {
        if !self.ready(tuning) {
            return None;
        }
        self.cursor_z = tuning.spawn_z;
        Some(roll_group(rng, tuning))
    }
}
