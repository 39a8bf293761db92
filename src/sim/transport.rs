//! World transport
//!
//! The player stays at the origin and the world moves toward the camera
//! (+z). Each kind of world entity lives in its own typed collection.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::debris::DebrisBatch;
use super::obstacle::Obstacle;
use crate::tuning::Tuning;

/// One tile of the endless road strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    /// Center of the tile along the travel axis
    pub z: f32,
}

/// Background particles that drift past and wrap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmbientField {
    pub points: Vec<Vec3>,
}

impl AmbientField {
    /// Scatter `ambient_count` points through the ambient volume
    pub fn scatter<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        let hw = tuning.ambient_half_width.abs();
        let points = (0..tuning.ambient_count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-hw..=hw),
                    rng.random_range(0.0..=tuning.ambient_height.max(0.0)),
                    rng.random_range(tuning.ambient_back_z..=tuning.ambient_front_z),
                )
            })
            .collect();
        Self { points }
    }

    /// Drift forward; anything past the front bound restarts at the back
    pub fn advance(&mut self, distance: f32, tuning: &Tuning) {
        for point in &mut self.points {
            point.z += distance;
            if point.z > tuning.ambient_front_z {
                point.z = tuning.ambient_back_z;
            }
        }
    }
}

/// All world-space entities
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub road: Vec<RoadSegment>,
    pub obstacles: Vec<Obstacle>,
    pub debris: Vec<DebrisBatch>,
    pub ambient: AmbientField,
}

impl World {
    /// Fresh world: road tiled back from the player, no obstacles or debris
    pub fn new<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        let road = (0..tuning.road_segments)
            .map(|i| RoadSegment {
                z: -(i as f32) * tuning.road_segment_length,
            })
            .collect();
        Self {
            road,
            obstacles: Vec::new(),
            debris: Vec::new(),
            ambient: AmbientField::scatter(rng, tuning),
        }
    }

    /// Move everything toward the camera by `distance`, recycle road tiles and
    /// cull obstacles behind the view. Returns the number culled.
    pub fn advance(&mut self, distance: f32, tuning: &Tuning) -> usize {
        for obstacle in &mut self.obstacles {
            obstacle.z += distance;
        }
        for batch in &mut self.debris {
            batch.translate_z(distance);
        }
        self.advance_road(distance, tuning);
        self.ambient.advance(distance, tuning);

        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.z <= tuning.cull_z);
        before - self.obstacles.len()
    }

    /// Tiles whose far edge has passed the camera move behind the rearmost
    fn advance_road(&mut self, distance: f32, tuning: &Tuning) {
        let half = tuning.road_segment_length / 2.0;
        for segment in &mut self.road {
            segment.z += distance;
        }
        for i in 0..self.road.len() {
            if self.road[i].z - half > tuning.camera_z {
                let rearmost = self
                    .road
                    .iter()
                    .map(|s| s.z)
                    .fold(f32::INFINITY, f32::min);
                self.road[i].z = rearmost - tuning.road_segment_length;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> (Tuning, World) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let world = World::new(&mut rng, &tuning);
        (tuning, world)
    }

    #[test]
    fn test_obstacles_move_and_cull() {
        let (tuning, mut world) = world();
        world
            .obstacles
            .push(Obstacle::new(1, 0, ObstacleKind::Wall, tuning.cull_z - 1.0));
        world.obstacles.push(Obstacle::new(2, 1, ObstacleKind::Jump, -50.0));

        assert_eq!(world.advance(0.5, &tuning), 0);
        assert_eq!(world.obstacles[1].z, -49.5);

        assert_eq!(world.advance(1.0, &tuning), 1);
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.obstacles[0].id, 2);
    }

    #[test]
    fn test_road_stays_contiguous() {
        let (tuning, mut world) = world();
        let len = tuning.road_segment_length;
        for _ in 0..500 {
            world.advance(0.7, &tuning);
            let mut zs: Vec<f32> = world.road.iter().map(|s| s.z).collect();
            zs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for w in zs.windows(2) {
                assert!((w[1] - w[0] - len).abs() < 1e-2, "gap in road: {zs:?}");
            }
            // Nearest tile still covers the camera
            assert!(zs.last().unwrap() - len / 2.0 <= tuning.camera_z);
        }
    }

    #[test]
    fn test_ambient_wraps_to_back() {
        let (tuning, mut world) = world();
        assert_eq!(world.ambient.points.len(), tuning.ambient_count);
        world.ambient.points[0].z = tuning.ambient_front_z - 0.1;
        world.advance(0.5, &tuning);
        assert_eq!(world.ambient.points[0].z, tuning.ambient_back_z);
        assert!(
            world
                .ambient
                .points
                .iter()
                .all(|p| p.z >= tuning.ambient_back_z && p.z <= tuning.ambient_front_z)
        );
    }

    #[test]
    fn test_debris_travels_with_world() {
        let (tuning, mut world) = world();
        let mut rng = Pcg32::seed_from_u64(5);
        world.debris.push(DebrisBatch::burst(
            Vec3::new(0.0, 1.0, -10.0),
            [1.0; 3],
            &mut rng,
            &tuning,
        ));
        world.advance(2.0, &tuning);
        assert!(world.debris[0].positions.iter().all(|p| p.z == -8.0));
    }
}
