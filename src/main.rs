//! Lane Runner entry point
//!
//! Native builds run a headless demo: the autopilot plays one run at a fixed
//! timestep and the events are logged. The browser build is driven from JS
//! through `platform::web::WebRunner`.
//!
//! Usage: `lane-runner [seed] [max_seconds]`
//! Set `LANE_RUNNER_TUNING` to a JSON file to override gameplay constants.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::consts::SIM_DT;
    use lane_runner::sim::{GameEvent, GameState, TickInput, tick};
    use lane_runner::{HighScores, Tuning};

    env_logger::init();
    log::info!("Lane Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let max_secs = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(120.0);

    let tuning = match std::env::var("LANE_RUNNER_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {path}: {e}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let mut state = GameState::with_tuning(seed, tuning);
    let mut highscores = HighScores::new();
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    state.start_run();
    let mut destroyed = 0u32;
    while state.is_running() && state.elapsed() < max_secs {
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            match &event {
                GameEvent::ObstacleDestroyed { kind, .. } => {
                    destroyed += 1;
                    log::debug!("Smashed {kind:?}");
                }
                GameEvent::RunEnded { .. } => {
                    highscores.record(&event);
                }
                _ => {}
            }
        }
    }
    if state.is_running() {
        state.end_run();
        for event in state.drain_events() {
            highscores.record(&event);
        }
    }

    println!(
        "seed {seed}: score {} in {:.1}s (speed {:.1}, {destroyed} smashed)",
        state.display_score(),
        state.elapsed(),
        state.speed()
    );
    if let Ok(json) = highscores.to_json() {
        println!("{json}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebRunner, this is just to satisfy the compiler
}
