//! Obstacle kinds and the obstacle entity
//!
//! Each kind is a row in a static table: footprint, resting height, color and
//! breakability. Adding a kind means adding a row, not a branch.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::lane_x;

/// Obstacle types, each with its own avoidance affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low bar: jump over it
    Jump,
    /// High bar: slide under it
    Slide,
    /// Full height: change lanes
    Wall,
    /// Full height: punch through it
    Breakable,
}

/// Geometry and look of one obstacle kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleShape {
    /// Full extents (width, height, depth)
    pub size: Vec3,
    /// Height of the box center above the road
    pub center_y: f32,
    pub color: [f32; 3],
    pub breakable: bool,
}

static OBSTACLE_TABLE: [ObstacleShape; 4] = [
    // Jump
    ObstacleShape {
        size: Vec3::new(2.0, 0.6, 0.5),
        center_y: 0.3,
        color: [1.0, 0.55, 0.1],
        breakable: false,
    },
    // Slide
    ObstacleShape {
        size: Vec3::new(2.0, 1.2, 0.5),
        center_y: 1.0,
        color: [0.2, 0.5, 1.0],
        breakable: false,
    },
    // Wall
    ObstacleShape {
        size: Vec3::new(2.0, 2.5, 0.5),
        center_y: 1.25,
        color: [0.5, 0.5, 0.55],
        breakable: false,
    },
    // Breakable
    ObstacleShape {
        size: Vec3::new(2.0, 2.5, 0.5),
        center_y: 1.25,
        color: [0.9, 0.2, 0.2],
        breakable: true,
    },
];

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Jump,
        ObstacleKind::Slide,
        ObstacleKind::Wall,
        ObstacleKind::Breakable,
    ];

    #[inline]
    pub fn shape(self) -> &'static ObstacleShape {
        &OBSTACLE_TABLE[self as usize]
    }
}

/// A live obstacle travelling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: usize,
    pub kind: ObstacleKind,
    /// Travel-axis position of the box center
    pub z: f32,
    /// One-shot latch: once set, the obstacle never produces another outcome
    pub collided: bool,
}

impl Obstacle {
    pub fn new(id: u32, lane: usize, kind: ObstacleKind, z: f32) -> Self {
        Self {
            id,
            lane: lane.min(2),
            kind,
            z,
            collided: false,
        }
    }

    #[inline]
    pub fn is_breakable(&self) -> bool {
        self.kind.shape().breakable
    }

    /// Box center in world space
    pub fn position(&self, lane_offsets: &[f32; 3]) -> Vec3 {
        Vec3::new(
            lane_x(lane_offsets, self.lane),
            self.kind.shape().center_y,
            self.z,
        )
    }

    pub fn bounds(&self, lane_offsets: &[f32; 3]) -> Aabb {
        Aabb::from_center_size(self.position(lane_offsets), self.kind.shape().size)
    }
}
