//! Game state snapshot
//!
//! A `GameState` is never mutated once handed out: every action builds a
//! fresh snapshot from the previous one.

use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::*;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Remaining lives; going below zero ends the game
    pub lives: i32,
    /// Pipes passed, never decreases
    pub score: u32,
    /// Terminal and absorbing once set
    pub game_ended: bool,
    /// The player-controlled body
    pub bird: Body,
    /// Latest tick index, also the bounce PRNG seed
    pub elapsed_time: u64,
    /// Active top pipes, newest first
    pub top_pipes: Vec<Body>,
    /// Active bottom pipes, newest first
    pub bottom_pipes: Vec<Body>,
    /// Bodies that left the play field during the last tick
    pub expired: Vec<Body>,
    /// Ids minted so far (the bird holds id 0)
    pub spawned_object_count: u32,
    /// Id of the top pipe the bird must pass next
    pub next_scoring_pipe_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Initial snapshot: bird at rest under gravity, no pipes, full lives
    pub fn new() -> Self {
        Self {
            lives: START_LIVES,
            score: START_SCORE,
            game_ended: false,
            bird: Body::bird(),
            elapsed_time: START_TIME,
            top_pipes: Vec::new(),
            bottom_pipes: Vec::new(),
            expired: Vec::new(),
            spawned_object_count: 1,
            next_scoring_pipe_id: 1,
        }
    }

    /// Active pipes of both kinds
    pub fn pipes(&self) -> impl Iterator<Item = &Body> {
        self.top_pipes.iter().chain(self.bottom_pipes.iter())
    }

    /// The top pipe that scores next, if it is still on the field
    pub fn next_scoring_pipe(&self) -> Option<&Body> {
        self.top_pipes
            .iter()
            .find(|p| p.id == self.next_scoring_pipe_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BodyKind;

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert!(!state.game_ended);
        assert_eq!(state.elapsed_time, 0);
        assert!(state.top_pipes.is_empty());
        assert!(state.bottom_pipes.is_empty());
        assert!(state.expired.is_empty());
        assert_eq!(state.bird.kind, BodyKind::Bird);
        assert_eq!(state.spawned_object_count, 1);
        assert_eq!(state.next_scoring_pipe_id, 1);
        assert!(state.next_scoring_pipe().is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let state = GameState::new();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
