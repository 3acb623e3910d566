//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per `Action::Tick`
//! - Bounce speeds seeded from simulation time only
//! - Stable iteration order (newest pipe first)
//! - No rendering or platform dependencies

pub mod action;
pub mod body;
pub mod collision;
pub mod rng;
pub mod state;
pub mod vector;

pub use action::{Action, reduce, scan};
pub use body::{Body, BodyKind, Surface};
pub use collision::{Aabb, Direction, detect_collision};
pub use state::GameState;
pub use vector::Vector;
