//! 2D vector value type
//!
//! `Vector` is a plain `Copy` value: `a + b` adds, `a - b` subtracts and
//! `a * s` scales, each producing a new value.

/// Positions, velocities and accelerations (f64 pixels, per tick)
pub type Vector = glam::DVec2;
