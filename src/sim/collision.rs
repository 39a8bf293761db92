//! Collision detection and resolution between the player and obstacles
//!
//! Both sides are axis-aligned boxes. An intersection is resolved by the first
//! matching exemption rule:
//! 1. breakable while punching: destroyed
//! 2. jump bar while jumping above it: passed over
//! 3. slide bar while sliding below it: passed under
//! 4. anything else: run over
//!
//! Every outcome latches the obstacle's `collided` flag, so an intersection
//! that persists over several ticks resolves exactly once.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use crate::tuning::Tuning;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap on all three axes; touching faces do not count
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmplt(other.max).all() && self.max.cmpgt(other.min).all()
    }
}

/// The player's box for the current pose: reduced height while sliding
pub fn player_bounds(player: &Player, tuning: &Tuning) -> Aabb {
    let height = if player.is_sliding() {
        tuning.player_slide_height
    } else {
        tuning.player_run_height
    };
    Aabb::from_center_size(
        player.pos,
        Vec3::new(
            tuning.player_half_width * 2.0,
            height,
            tuning.player_half_depth * 2.0,
        ),
    )
}

/// What an intersection did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    Destroyed,
    JumpedOver,
    SlidUnder,
    Fatal,
}

/// Apply the exemption rules, in precedence order, to an intersecting obstacle
pub fn classify(player: &Player, obstacle: &Obstacle, tuning: &Tuning) -> CollisionOutcome {
    let obstacle_y = obstacle.kind.shape().center_y;
    let player_y = player.pos.y;

    if obstacle.is_breakable() && player.is_punching() {
        CollisionOutcome::Destroyed
    } else if obstacle.kind == ObstacleKind::Jump
        && player.is_jumping()
        && player_y > obstacle_y + tuning.clearance
    {
        CollisionOutcome::JumpedOver
    } else if obstacle.kind == ObstacleKind::Slide
        && player.is_sliding()
        && player_y < obstacle_y - tuning.clearance
    {
        CollisionOutcome::SlidUnder
    } else {
        CollisionOutcome::Fatal
    }
}

/// One resolved intersection
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Obstacle as it was when hit (already latched)
    pub obstacle: Obstacle,
    pub outcome: CollisionOutcome,
}

/// Everything one resolution pass produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub hits: Vec<Hit>,
}

impl Resolution {
    /// The run-ending hit, if any
    pub fn fatal(&self) -> Option<&Hit> {
        self.hits
            .iter()
            .find(|h| h.outcome == CollisionOutcome::Fatal)
    }

    pub fn destroyed(&self) -> impl Iterator<Item = &Obstacle> {
        self.hits
            .iter()
            .filter(|h| h.outcome == CollisionOutcome::Destroyed)
            .map(|h| &h.obstacle)
    }
}

/// Test the player against every live, unlatched obstacle.
///
/// Latches each intersected obstacle, removes destroyed ones from `obstacles`,
/// and stops at the first fatal hit.
pub fn resolve(player: &Player, obstacles: &mut Vec<Obstacle>, tuning: &Tuning) -> Resolution {
    let player_box = player_bounds(player, tuning);
    let mut resolution = Resolution::default();

    for obstacle in obstacles.iter_mut() {
        if obstacle.collided {
            continue;
        }
        if !player_box.intersects(&obstacle.bounds(&tuning.lane_offsets)) {
            continue;
        }

        let outcome = classify(player, obstacle, tuning);
        obstacle.collided = true;
        resolution.hits.push(Hit {
            obstacle: obstacle.clone(),
            outcome,
        });
        if outcome == CollisionOutcome::Fatal {
            break;
        }
    }

    let has_destroyed = resolution.destroyed().next().is_some();
    if has_destroyed {
        obstacles.retain(|o| {
            !resolution
                .hits
                .iter()
                .any(|h| h.outcome == CollisionOutcome::Destroyed && h.obstacle.id == o.id)
        });
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tuning, Player) {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        (tuning, player)
    }

    #[test]
    fn test_aabb_intersection() {
        let a = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center_size(Vec3::new(0.9, 0.0, 0.0), Vec3::ONE);
        let c = Aabb::from_center_size(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c), "touching faces are not a hit");
    }

    #[test]
    fn test_slide_box_is_shorter() {
        let (tuning, mut player) = setup();
        let run = player_bounds(&player, &tuning);
        player.start_slide(0.0, &tuning);
        let slide = player_bounds(&player, &tuning);
        assert!(slide.max.y < run.max.y);
        assert!(slide.min.y.abs() < 1e-6);
    }

    #[test]
    fn test_wall_is_fatal() {
        let (tuning, player) = setup();
        let mut obstacles = vec![Obstacle::new(1, player.lane, ObstacleKind::Wall, 0.0)];
        let resolution = resolve(&player, &mut obstacles, &tuning);
        assert_eq!(resolution.fatal().map(|h| h.obstacle.id), Some(1));
        assert!(obstacles[0].collided);
    }

    #[test]
    fn test_other_lane_misses() {
        let (tuning, player) = setup();
        let mut obstacles = vec![Obstacle::new(1, 0, ObstacleKind::Wall, 0.0)];
        let resolution = resolve(&player, &mut obstacles, &tuning);
        assert!(resolution.hits.is_empty());
        assert!(!obstacles[0].collided);
    }

    #[test]
    fn test_punch_destroys_breakable() {
        let (tuning, mut player) = setup();
        player.start_punch(0.0, &tuning);
        let mut obstacles = vec![
            Obstacle::new(1, player.lane, ObstacleKind::Breakable, 0.0),
            Obstacle::new(2, player.lane, ObstacleKind::Wall, -50.0),
        ];
        let resolution = resolve(&player, &mut obstacles, &tuning);
        assert_eq!(resolution.destroyed().count(), 1);
        assert!(resolution.fatal().is_none());
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
    }

    #[test]
    fn test_breakable_without_punch_is_fatal() {
        let (tuning, player) = setup();
        let obstacle = Obstacle::new(1, player.lane, ObstacleKind::Breakable, 0.0);
        assert_eq!(classify(&player, &obstacle, &tuning), CollisionOutcome::Fatal);
    }

    #[test]
    fn test_jump_clearance() {
        let (tuning, mut player) = setup();
        let obstacle = Obstacle::new(1, player.lane, ObstacleKind::Jump, 0.0);
        let bar_y = ObstacleKind::Jump.shape().center_y;

        // Running into the bar
        assert_eq!(classify(&player, &obstacle, &tuning), CollisionOutcome::Fatal);

        // Jumping but still too low
        player.start_jump(0.0, &tuning);
        player.pos.y = bar_y + tuning.clearance - 0.05;
        assert_eq!(classify(&player, &obstacle, &tuning), CollisionOutcome::Fatal);

        // Jumping high enough
        player.pos.y = bar_y + tuning.clearance + 0.05;
        assert_eq!(
            classify(&player, &obstacle, &tuning),
            CollisionOutcome::JumpedOver
        );
    }

    #[test]
    fn test_slide_under_bar() {
        let (tuning, mut player) = setup();
        let obstacle = Obstacle::new(1, player.lane, ObstacleKind::Slide, 0.0);

        let mut obstacles = vec![obstacle.clone()];
        let resolution = resolve(&player, &mut obstacles, &tuning);
        assert!(resolution.fatal().is_some(), "running into a slide bar");

        player.start_slide(0.0, &tuning);
        let mut obstacles = vec![obstacle];
        let resolution = resolve(&player, &mut obstacles, &tuning);
        assert_eq!(resolution.hits.len(), 1);
        assert_eq!(resolution.hits[0].outcome, CollisionOutcome::SlidUnder);
    }

    #[test]
    fn test_jump_does_not_clear_wall() {
        let (tuning, mut player) = setup();
        player.start_jump(0.0, &tuning);
        player.update(tuning.jump_duration * 0.5, &tuning);
        let mut obstacles = vec![Obstacle::new(1, player.lane, ObstacleKind::Wall, 0.0)];
        assert!(resolve(&player, &mut obstacles, &tuning).fatal().is_some());
    }

    #[test]
    fn test_latched_obstacle_is_skipped() {
        let (tuning, player) = setup();
        let mut obstacles = vec![Obstacle::new(1, player.lane, ObstacleKind::Wall, 0.0)];
        assert!(resolve(&player, &mut obstacles, &tuning).fatal().is_some());
        assert!(resolve(&player, &mut obstacles, &tuning).hits.is_empty());
    }
}
