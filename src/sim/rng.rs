//! Hash-based bounce speed generator
//!
//! A single linear-congruential step: `hash(seed) = (A * seed + C) mod M`.
//! There is no running generator state; every draw is seeded from the
//! simulation clock so a bounce speed is a pure function of elapsed time.

use crate::consts::{BOUNCE_SPEED_MIN, BOUNCE_SPEED_SPREAD};

pub const LCG_A: u64 = 1_103_515_245;
pub const LCG_C: u64 = 12_345;
/// 2^31
pub const LCG_M: u64 = 0x8000_0000;

/// One LCG step, result in `[0, M - 1]`.
///
/// Arithmetic wraps at 2^64; since M divides 2^64 the residue is exact.
#[inline]
pub fn hash(seed: u64) -> u64 {
    LCG_A.wrapping_mul(seed).wrapping_add(LCG_C) & (LCG_M - 1)
}

/// Map a hash from `[0, M - 1]` onto `[-1, 1]`
#[inline]
pub fn scale(hash: u64) -> f64 {
    2.0 * hash as f64 / (LCG_M - 1) as f64 - 1.0
}

/// Bounce speed for a collision at the given tick
pub fn bounce_speed(elapsed_time: u64) -> f64 {
    let unit = (scale(hash(elapsed_time)) + 1.0) / 2.0;
    BOUNCE_SPEED_MIN + unit * BOUNCE_SPEED_SPREAD
}
