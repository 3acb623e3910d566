//! Runtime settings
//!
//! Native builds read a JSON file; the browser build uses LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE_MS;

/// Environment variable naming the native settings file
pub const SETTINGS_ENV: &str = "BIRB_SETTINGS";
/// Settings file used when the variable is unset
pub const DEFAULT_SETTINGS_PATH: &str = "birb.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Real-time period between ticks
    pub tick_rate_ms: u64,
    /// Headless runs stop after this many ticks
    pub max_ticks: u64,
    /// Let the demo player flap
    pub autopilot: bool,
    /// Seed for the generated schedule when no schedule file is given
    pub schedule_seed: u64,
    /// Pipe pairs in a generated schedule
    pub generated_pipes: usize,
    /// Scripted flap inputs (ms from game start)
    pub flaps_ms: Vec<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: TICK_RATE_MS,
            max_ticks: 2400,
            autopilot: false,
            schedule_seed: 42,
            generated_pipes: 30,
            flaps_ms: Vec::new(),
        }
    }
}

impl Settings {
    /// Clamp values the game loop cannot run with
    pub fn validated(mut self) -> Self {
        if self.tick_rate_ms == 0 {
            log::warn!("tick_rate_ms must be positive, using 1");
            self.tick_rate_ms = 1;
        }
        self.flaps_ms.sort_unstable();
        self
    }

    /// Parse from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "birb_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                    log::info!("Settings saved");
                } else {
                    log::warn!("Failed to write settings to LocalStorage");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }

    /// Load settings from `$BIRB_SETTINGS` or `birb.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path =
            std::env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        Self::load_from(std::path::Path::new(&path))
    }

    /// Load from a file; a missing or unreadable file yields defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
