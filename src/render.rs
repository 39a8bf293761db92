//! Render projection
//!
//! Flattens a `GameState` into per-instance box records a GPU (or any other
//! front end) can upload directly. Pure: reads state, never mutates it.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::lane_x;
use crate::sim::GameState;

/// One box to draw: unit cube scaled and translated, flat color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub color: [f32; 4],
}

impl Instance {
    pub fn new(position: Vec3, scale: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            scale: scale.to_array(),
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const ROAD: [f32; 4] = [0.15, 0.15, 0.18, 1.0];
    pub const LANE_MARK: [f32; 4] = [0.8, 0.8, 0.85, 1.0];
    pub const PLAYER: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const PLAYER_PUNCH: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const AMBIENT: [f32; 4] = [0.7, 0.8, 1.0, 0.6];
}

const ROAD_THICKNESS: f32 = 0.1;
const LANE_MARK_WIDTH: f32 = 0.08;
const DEBRIS_SIZE: f32 = 0.12;
const AMBIENT_SIZE: f32 = 0.05;

/// Build every instance for the current frame, back to front by category:
/// road, lane marks, obstacles, player, debris, ambient
pub fn build_instances(state: &GameState) -> Vec<Instance> {
    let tuning = &state.tuning;
    let debris_total: usize = state.debris().iter().map(|b| b.len()).sum();
    let mut instances = Vec::with_capacity(
        state.road_segments().len() * 3
            + state.obstacles().len()
            + 1
            + debris_total
            + state.ambient().points.len(),
    );

    let road_width = (tuning.lane_offsets[2] - tuning.lane_offsets[0]) * 1.5;
    let road_center = (tuning.lane_offsets[0] + tuning.lane_offsets[2]) / 2.0;
    for segment in state.road_segments() {
        instances.push(Instance::new(
            Vec3::new(road_center, -ROAD_THICKNESS / 2.0, segment.z),
            Vec3::new(road_width, ROAD_THICKNESS, tuning.road_segment_length),
            colors::ROAD,
        ));
        // Dividers between adjacent lanes
        for pair in tuning.lane_offsets.windows(2) {
            instances.push(Instance::new(
                Vec3::new((pair[0] + pair[1]) / 2.0, 0.0, segment.z),
                Vec3::new(LANE_MARK_WIDTH, 0.01, tuning.road_segment_length),
                colors::LANE_MARK,
            ));
        }
    }

    for obstacle in state.obstacles() {
        let shape = obstacle.kind.shape();
        let [r, g, b] = shape.color;
        instances.push(Instance::new(
            obstacle.position(&tuning.lane_offsets),
            shape.size,
            [r, g, b, 1.0],
        ));
    }

    let player = state.player();
    let height = if player.is_sliding() {
        tuning.player_slide_height
    } else {
        tuning.player_run_height
    };
    let color = if player.is_punching() {
        colors::PLAYER_PUNCH
    } else {
        colors::PLAYER
    };
    instances.push(Instance::new(
        player.pos,
        Vec3::new(
            tuning.player_half_width * 2.0,
            height,
            tuning.player_half_depth * 2.0,
        ),
        color,
    ));

    for batch in state.debris() {
        let [r, g, b] = batch.color;
        let alpha = batch.alpha();
        for &pos in &batch.positions {
            instances.push(Instance::new(pos, Vec3::splat(DEBRIS_SIZE), [r, g, b, alpha]));
        }
    }

    for &point in &state.ambient().points {
        instances.push(Instance::new(point, Vec3::splat(AMBIENT_SIZE), colors::AMBIENT));
    }

    instances
}

/// Raw bytes for a GPU instance buffer
pub fn as_bytes(instances: &[Instance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Where the player is heading, for camera follow
pub fn camera_target(state: &GameState) -> Vec3 {
    let player = state.player();
    Vec3::new(
        lane_x(&state.tuning.lane_offsets, player.lane),
        state.tuning.run_y(),
        0.0,
    )
}
