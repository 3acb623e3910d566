//! Birb - a Flappy-Bird style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic state reduction (physics, collisions, scoring, lifecycle)
//! - `schedule`: Pipe schedule parsing and generation
//! - `source`: Merges ticks, flaps and scheduled spawns into one action log
//! - `autopilot`: Demo player
//! - `view`: Presentation contract (what the renderer paints/removes)
//! - `settings`: Runtime configuration

pub mod autopilot;
pub mod schedule;
pub mod settings;
pub mod sim;
pub mod source;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use schedule::{PipeSpawn, Schedule, ScheduleError};
pub use settings::Settings;
pub use sim::{Action, GameState};

/// Game configuration constants
pub mod consts {
    use crate::sim::Vector;

    /// Viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f64 = 600.0;
    pub const VIEWPORT_HEIGHT: f64 = 400.0;

    /// Bird extents
    pub const BIRD_WIDTH: f64 = 42.0;
    pub const BIRD_HEIGHT: f64 = 30.0;
    /// Bird anchor (top-left), centred at 30% of the width and half the height
    pub const BIRD_START_POS: Vector = Vector::new(
        VIEWPORT_WIDTH * 0.3 - BIRD_WIDTH / 2.0,
        VIEWPORT_HEIGHT / 2.0 - BIRD_HEIGHT / 2.0,
    );
    pub const BIRD_HREF: &str = "assets/birb.png";

    /// Pipe defaults
    pub const PIPE_WIDTH: f64 = 50.0;
    pub const PIPE_VEL: Vector = Vector::new(-5.0, 0.0);
    pub const PIPE_FILL: &str = "green";

    /// Per-tick physics
    pub const GRAVITY: Vector = Vector::new(0.0, 1.0);
    pub const FLAP_VEL: Vector = Vector::new(0.0, -7.0);

    /// Bounce speed is drawn from [BOUNCE_SPEED_MIN, BOUNCE_SPEED_MIN + BOUNCE_SPEED_SPREAD]
    pub const BOUNCE_SPEED_MIN: f64 = 15.0;
    pub const BOUNCE_SPEED_SPREAD: f64 = 5.0;

    pub const START_LIVES: i32 = 3;
    pub const START_SCORE: u32 = 0;
    pub const START_TIME: u64 = 0;

    /// Real-time period between ticks
    pub const TICK_RATE_MS: u64 = 50;
}
