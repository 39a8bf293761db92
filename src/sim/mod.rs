//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from tick deltas
//! - Seeded RNG only
//! - Stable iteration order (insertion order of each collection)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod debris;
pub mod obstacle;
pub mod player;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod transport;

pub use clock::SimClock;
pub use collision::{Aabb, CollisionOutcome, Resolution, classify, player_bounds, resolve};
pub use debris::DebrisBatch;
pub use obstacle::{Obstacle, ObstacleKind, ObstacleShape};
pub use player::{Action, ActionTimer, Player, jump_offset};
pub use progression::{Progress, speed_at};
pub use spawner::{SpawnGroup, Spawner, roll_group};
pub use state::{GameEvent, GameState, RunPhase, Snapshot};
pub use tick::{TickInput, apply_input, tick};
pub use transport::{AmbientField, RoadSegment, World};
