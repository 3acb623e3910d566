//! Birb entry point
//!
//! Native builds run the game headless: a schedule file (or a generated
//! schedule) and scripted or autopilot flaps are folded onto the initial
//! state, and the final snapshot is printed as JSON. The browser build
//! starts from `birb::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use birb::autopilot;
    use birb::schedule::Schedule;
    use birb::settings::Settings;
    use birb::sim::{Action, GameState};
    use birb::source::Timeline;

    /// Ticks between progress lines
    const LOG_EVERY_TICKS: u64 = 20;

    #[derive(Debug, thiserror::Error)]
    pub enum RunError {
        #[error("failed to read schedule {}: {source}", .path.display())]
        ReadSchedule {
            path: PathBuf,
            source: std::io::Error,
        },

        #[error("failed to encode final state: {0}")]
        Encode(#[from] serde_json::Error),
    }

    fn load_schedule(path: Option<PathBuf>, settings: &Settings) -> Result<Schedule, RunError> {
        match path {
            Some(path) => {
                let text =
                    std::fs::read_to_string(&path).map_err(|source| RunError::ReadSchedule {
                        path: path.clone(),
                        source,
                    })?;
                log::info!("Reading schedule from {}", path.display());
                Ok(Schedule::parse(&text))
            }
            None => Ok(Schedule::generate(
                settings.schedule_seed,
                settings.generated_pipes,
            )),
        }
    }

    /// Fold the timeline, letting the autopilot flap before each tick
    pub fn play(timeline: &Timeline, settings: &Settings) -> GameState {
        let mut state = GameState::new();

        for event in timeline.actions(settings.max_ticks) {
            if let Action::Tick { elapsed } = event.action {
                if settings.autopilot && autopilot::should_flap(&state) {
                    state = Action::Flap.apply(&state);
                }
                state = event.action.apply(&state);

                if elapsed % LOG_EVERY_TICKS == 0 {
                    log::info!(
                        "t={} ({} ms) lives={} score={} pipes={}",
                        elapsed,
                        event.at_ms,
                        state.lives,
                        state.score,
                        state.top_pipes.len()
                    );
                }
            } else {
                state = event.action.apply(&state);
            }

            if state.game_ended {
                log::info!("Stopping: game ended at t={}", state.elapsed_time);
                break;
            }
        }

        state
    }

    pub fn run() -> Result<(), RunError> {
        let settings = Settings::load();
        let schedule_path = std::env::args().nth(1).map(PathBuf::from);
        let schedule = load_schedule(schedule_path, &settings)?;

        let timeline = Timeline::new(settings.tick_rate_ms)
            .with_schedule(&schedule)
            .with_flaps(&settings.flaps_ms);
        log::info!(
            "Running up to {} ticks, {} ms per tick, {} pipe pairs",
            settings.max_ticks,
            timeline.tick_rate_ms(),
            schedule.len()
        );

        let state = play(&timeline, &settings);
        log::info!(
            "Finished: score={} lives={} ended={}",
            state.score,
            state.lives,
            state.game_ended
        );

        println!("{}", serde_json::to_string_pretty(&state)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Birb (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is birb::web::wasm_start, this is just to satisfy the compiler
}
