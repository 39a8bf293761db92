//! Game state and run lifecycle
//!
//! `GameState` owns every piece of simulation state: clock, player, world
//! collections, spawner, progression, RNG and the outgoing event queue.
//! There are no globals; two states never share anything.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::debris::DebrisBatch;
use super::obstacle::{Obstacle, ObstacleKind};
use super::player::{Action, Player};
use super::progression::Progress;
use super::spawner::{SpawnGroup, Spawner};
use super::transport::{AmbientField, RoadSegment, World};
use crate::tuning::Tuning;

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// App started, no run yet
    NotStarted,
    /// Ticks advance the simulation
    Running,
    /// Frozen until unpaused
    Paused,
    /// Run ended by a collision or `end_run`
    GameOver,
}

/// Notifications for hosts (UI, audio, particles)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted {
        run_id: u32,
    },
    /// New integer score
    ScoreChanged(u64),
    /// Carries the ended run's totals so late consumers never read a newer run
    RunEnded {
        run_id: u32,
        final_score: u64,
        distance: f32,
        elapsed: f32,
    },
    ObstacleDestroyed {
        position: Vec3,
        kind: ObstacleKind,
        color: [f32; 3],
    },
    ObstacleSpawned {
        kind: ObstacleKind,
        lanes: Vec<usize>,
    },
    ActionStarted(Action),
    PauseChanged(bool),
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Incremented by every reset; 0 before the first run
    pub run_id: u32,
    pub tuning: Tuning,
    pub phase: RunPhase,
    pub clock: SimClock,
    pub player: Player,
    pub spawner: Spawner,
    pub world: World,
    pub progress: Progress,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a state with custom tuning. Invalid tuning is replaced by the
    /// defaults (with a warning), so the simulation never sees out-of-range values.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning, using defaults: {e}");
                Tuning::default()
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&mut rng, &tuning);
        Self {
            seed,
            run_id: 0,
            phase: RunPhase::NotStarted,
            clock: SimClock::new(),
            player: Player::new(&tuning),
            spawner: Spawner::new(&tuning),
            world,
            progress: Progress::new(&tuning),
            rng,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {event:?}");
        self.events.push(event);
    }

    /// Events queued since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Lifecycle ===

    /// Begin a run from `NotStarted` or `GameOver`; ignored mid-run
    pub fn start_run(&mut self) {
        match self.phase {
            RunPhase::NotStarted | RunPhase::GameOver => self.reset_run(),
            RunPhase::Running | RunPhase::Paused => {}
        }
    }

    /// Discard the current run and start a fresh one, whatever the phase
    pub fn reset_run(&mut self) {
        self.run_id += 1;
        self.clock.reset();
        self.clock.start();
        self.player = Player::new(&self.tuning);
        self.spawner = Spawner::new(&self.tuning);
        self.world = World::new(&mut self.rng, &self.tuning);
        self.progress = Progress::new(&self.tuning);
        self.phase = RunPhase::Running;

        log::info!("Run {} started (seed {})", self.run_id, self.seed);
        self.emit(GameEvent::RunStarted {
            run_id: self.run_id,
        });
        self.emit(GameEvent::ScoreChanged(0));
    }

    /// End the current run. Fires `RunEnded` once; no-op outside a run.
    pub fn end_run(&mut self) {
        if !matches!(self.phase, RunPhase::Running | RunPhase::Paused) {
            return;
        }
        self.phase = RunPhase::GameOver;
        self.clock.stop();

        let final_score = self.display_score();
        log::info!(
            "Run {} ended: score {} after {:.1}s",
            self.run_id,
            final_score,
            self.clock.elapsed()
        );
        self.emit(GameEvent::RunEnded {
            run_id: self.run_id,
            final_score,
            distance: self.progress.distance,
            elapsed: self.clock.elapsed(),
        });
    }

    /// Pause or resume. Only meaningful between `Running` and `Paused`.
    pub fn set_paused(&mut self, paused: bool) {
        match (self.phase, paused) {
            (RunPhase::Running, true) => {
                self.phase = RunPhase::Paused;
                self.clock.stop();
            }
            (RunPhase::Paused, false) => {
                self.phase = RunPhase::Running;
                self.clock.start();
            }
            _ => return,
        }
        self.emit(GameEvent::PauseChanged(paused));
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    // === Player requests ===
    // Requests are only honored while running; anything else is silently ignored.

    /// Step one lane left (-1) or right (+1), clamped to the outer lanes
    pub fn request_move_lane(&mut self, direction: i32) {
        if !self.is_running() {
            return;
        }
        self.player.move_lane(direction);
    }

    pub fn request_jump(&mut self) {
        if self.is_running() && self.player.start_jump(self.clock.elapsed(), &self.tuning) {
            self.emit(GameEvent::ActionStarted(Action::Jump));
        }
    }

    pub fn request_slide(&mut self) {
        if self.is_running() && self.player.start_slide(self.clock.elapsed(), &self.tuning) {
            self.emit(GameEvent::ActionStarted(Action::Slide));
        }
    }

    pub fn request_punch(&mut self) {
        if self.is_running() && self.player.start_punch(self.clock.elapsed(), &self.tuning) {
            self.emit(GameEvent::ActionStarted(Action::Punch));
        }
    }

    // === World mutation ===

    /// Place one obstacle of `kind` in `lane` at `z`
    pub fn spawn_obstacle(&mut self, lane: usize, kind: ObstacleKind, z: f32) -> u32 {
        let id = self.next_entity_id();
        self.world.obstacles.push(Obstacle::new(id, lane, kind, z));
        id
    }

    /// Instantiate a rolled group on the spawn plane
    pub(crate) fn spawn_group(&mut self, group: SpawnGroup) {
        let z = self.tuning.spawn_z;
        for &lane in &group.lanes {
            self.spawn_obstacle(lane, group.kind, z);
        }
        log::debug!("Spawned {:?} in lanes {:?}", group.kind, group.lanes);
        self.emit(GameEvent::ObstacleSpawned {
            kind: group.kind,
            lanes: group.lanes,
        });
    }

    /// Replace a destroyed obstacle with a debris burst
    pub(crate) fn shatter(&mut self, obstacle: &Obstacle) {
        let position = obstacle.position(&self.tuning.lane_offsets);
        let color = obstacle.kind.shape().color;
        let batch = DebrisBatch::burst(position, color, &mut self.rng, &self.tuning);
        self.world.debris.push(batch);
        self.emit(GameEvent::ObstacleDestroyed {
            position,
            kind: obstacle.kind,
            color,
        });
    }

    // === Read-only views ===

    #[inline]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.progress.speed
    }

    #[inline]
    pub fn display_score(&self) -> u64 {
        self.progress.display_score()
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.world.obstacles
    }

    #[inline]
    pub fn debris(&self) -> &[DebrisBatch] {
        &self.world.debris
    }

    #[inline]
    pub fn road_segments(&self) -> &[RoadSegment] {
        &self.world.road
    }

    #[inline]
    pub fn ambient(&self) -> &AmbientField {
        &self.world.ambient
    }

    /// Serializable view for hosts
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            run_id: self.run_id,
            phase: self.phase,
            elapsed: self.clock.elapsed(),
            speed: self.progress.speed,
            score: self.display_score(),
            player: &self.player,
            obstacles: &self.world.obstacles,
            debris: &self.world.debris,
            road: &self.world.road,
        }
    }
}

/// Borrowed, serializable view of a state
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub run_id: u32,
    pub phase: RunPhase,
    pub elapsed: f32,
    pub speed: f32,
    pub score: u64,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub debris: &'a [DebrisBatch],
    pub road: &'a [RoadSegment],
}
