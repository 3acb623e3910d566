//! Demo-mode player
//!
//! Looks at a snapshot and decides whether to flap before the next tick.
//! Aims for the middle of the nearest gap still ahead of the bird.

use crate::consts::{GRAVITY, VIEWPORT_HEIGHT};
use crate::sim::{Body, GameState};

/// Vertical line the bird should hold
pub fn target_y(state: &GameState) -> f64 {
    let bird_left = state.bird.position().x;

    let nearest = state
        .top_pipes
        .iter()
        .filter(|p| p.position().x + p.width > bird_left)
        .min_by(|a, b| a.position().x.total_cmp(&b.position().x));

    match nearest {
        Some(top) => gap_centre(state, top),
        None => VIEWPORT_HEIGHT / 2.0,
    }
}

fn gap_centre(state: &GameState, top: &Body) -> f64 {
    let gap_top = top.position().y + top.height;
    let gap_bottom = state
        .bottom_pipes
        .iter()
        .find(|b| b.id == top.id + 1)
        .map(|b| b.position().y)
        .unwrap_or(VIEWPORT_HEIGHT);
    (gap_top + gap_bottom) / 2.0
}

/// Flap if, after the next gravity step, the bird's centre would sink below the target
pub fn should_flap(state: &GameState) -> bool {
    if state.game_ended {
        return false;
    }
    let bird = &state.bird;
    let falling = bird.vel.y >= 0.0;
    let next_centre = bird.position().y + bird.height / 2.0 + bird.vel.y + GRAVITY.y;
    falling && next_centre > target_y(state)
}
