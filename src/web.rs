//! Browser bindings
//!
//! The page owns timers, key events and SVG painting. It drives a `WebGame`
//! with ticks, flaps and the current time, and paints the `Frame` JSON it
//! gets back.

use wasm_bindgen::prelude::*;

use crate::schedule::Schedule;
use crate::settings::Settings;
use crate::sim::{Action, GameState};
use crate::view::Frame;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Birb starting...");
}

/// Game instance holding the current snapshot and the pending schedule
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    schedule: Schedule,
    /// Index of the next schedule row not yet spawned
    next_spawn: usize,
    settings: Settings,
}

impl WebGame {
    fn apply(&mut self, action: Action) {
        self.state = action.apply(&self.state);
    }
}

#[wasm_bindgen]
impl WebGame {
    /// Start a game from the schedule CSV text
    #[wasm_bindgen(constructor)]
    pub fn new(csv: &str) -> WebGame {
        let settings = Settings::load();
        let schedule = Schedule::parse(csv);
        log::info!(
            "Game initialized: {} pipe pairs, tick every {} ms",
            schedule.len(),
            settings.tick_rate_ms
        );
        WebGame {
            state: GameState::new(),
            schedule,
            next_spawn: 0,
            settings,
        }
    }

    pub fn tick(&mut self, elapsed: u32) {
        self.apply(Action::Tick {
            elapsed: elapsed as u64,
        });
    }

    pub fn flap(&mut self) {
        self.apply(Action::Flap);
    }

    /// Spawn every scheduled pipe pair whose time has come; returns how many
    pub fn spawn_due(&mut self, now_seconds: f64) -> u32 {
        let mut spawned = 0;
        while let Some(spawn) = self.schedule.spawns.get(self.next_spawn).copied() {
            if spawn.time > now_seconds {
                break;
            }
            self.apply(spawn.action());
            self.next_spawn += 1;
            spawned += 1;
        }
        spawned
    }

    /// Frame for the renderer, as JSON
    pub fn frame_json(&self) -> String {
        serde_json::to_string(&Frame::from_state(&self.state)).unwrap_or_default()
    }

    /// Full snapshot, as JSON
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.state).unwrap_or_default()
    }

    pub fn game_ended(&self) -> bool {
        self.state.game_ended
    }

    pub fn schedule_len(&self) -> usize {
        self.schedule.len()
    }

    pub fn tick_rate_ms(&self) -> u32 {
        self.settings.tick_rate_ms as u32
    }

    /// Current settings, as JSON
    pub fn settings_json(&self) -> String {
        self.settings.to_json().unwrap_or_default()
    }

    /// Replace the settings from JSON and persist them to LocalStorage.
    /// Takes effect for the page's timers on the next `tick_rate_ms` read.
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings = Settings::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings: {e}")))?;
        settings.save();
        self.settings = settings;
        Ok(())
    }
}
