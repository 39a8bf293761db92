//! Per-frame simulation tick
//!
//! Stage order within a tick is fixed: clock and speed, pose, transport,
//! collision, spawn, score, debris. Later stages read positions written by
//! earlier ones.

use super::collision;
use super::debris;
use super::progression::speed_at;
use super::state::{GameEvent, GameState, RunPhase};

/// Input commands gathered for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Lane step: negative = left, positive = right, 0 = stay
    pub lane: i32,
    pub jump: bool,
    pub slide: bool,
    pub punch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Route an input batch through the same requests a host would call directly
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            RunPhase::Running => state.set_paused(true),
            RunPhase::Paused => state.set_paused(false),
            _ => {}
        }
    }

    if input.lane != 0 {
        state.request_move_lane(input.lane.signum());
    }
    if input.jump {
        state.request_jump();
    }
    if input.slide {
        state.request_slide();
    }
    if input.punch {
        state.request_punch();
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.idle_mode && state.is_running() {
        let mut planned = crate::autopilot::plan(state);
        planned.pause = input.pause;
        apply_input(state, &planned);
    } else {
        apply_input(state, input);
    }

    // Don't tick if paused, over, or not yet started
    if !state.is_running() {
        return;
    }

    let dt = state.clock.advance(dt);
    if dt <= 0.0 {
        return;
    }
    let elapsed = state.clock.elapsed();

    // 1. Speed and pose
    state.progress.speed = speed_at(elapsed, &state.tuning);
    state.player.update(elapsed, &state.tuning);

    // 2. Transport
    let distance = state.progress.speed * dt;
    state.world.advance(distance, &state.tuning);
    state.spawner.advance(distance);

    // 3. Collision
    let resolution = collision::resolve(&state.player, &mut state.world.obstacles, &state.tuning);
    for obstacle in resolution.destroyed() {
        state.shatter(obstacle);
    }
    if let Some(hit) = resolution.fatal() {
        log::info!(
            "Hit {:?} in lane {} at z={:.2}",
            hit.obstacle.kind,
            hit.obstacle.lane,
            hit.obstacle.z
        );
        state.end_run();
        return;
    }

    // 4. Spawn
    if let Some(group) = state.spawner.maybe_spawn(&mut state.rng, &state.tuning) {
        state.spawn_group(group);
    }

    // 5. Score
    if let Some(score) = state.progress.add_distance(distance, &state.tuning) {
        state.emit(GameEvent::ScoreChanged(score));
    }

    // 6. Debris
    debris::update_batches(&mut state.world.debris, dt, state.tuning.debris_gravity);
}
