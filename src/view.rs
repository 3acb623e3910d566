//! Presentation contract
//!
//! The renderer is outside the core. A `Frame` tells it, for one snapshot,
//! what to show: the overlay, the counters, each live body keyed by id with
//! its translation, and which ids to remove.

use serde::{Deserialize, Serialize};

use crate::sim::{Body, BodyKind, GameState};

/// Element type the renderer creates for a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Image,
    Rect,
}

impl From<BodyKind> for ViewType {
    fn from(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Bird => ViewType::Image,
            BodyKind::Pipe => ViewType::Rect,
        }
    }
}

/// Create-or-update instruction for one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: String,
    pub view_type: ViewType,
    /// Anchor used when the element is first created
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// `translate(dx, dy)` applied every frame
    pub translate: (f64, f64),
}

impl From<&Body> for Sprite {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id.to_string(),
            view_type: body.kind.into(),
            x: body.start_pos.x,
            y: body.start_pos.y,
            width: body.width,
            height: body.height,
            href: body.href.clone(),
            fill: body.fill.clone(),
            translate: (body.displacement.x, body.displacement.y),
        }
    }
}

/// Everything the renderer needs for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub game_over: bool,
    pub lives: i32,
    pub score: u32,
    /// Bird, then top pipes, then bottom pipes
    pub sprites: Vec<Sprite>,
    /// Ids whose elements must be removed
    pub removals: Vec<String>,
}

impl Frame {
    pub fn from_state(state: &GameState) -> Self {
        if state.game_ended {
            // Only the overlay changes once the game is over
            return Self {
                game_over: true,
                lives: state.lives,
                score: state.score,
                sprites: Vec::new(),
                removals: Vec::new(),
            };
        }

        let sprites = std::iter::once(&state.bird)
            .chain(state.pipes())
            .map(Sprite::from)
            .collect();
        let removals = state.expired.iter().map(|b| b.id.to_string()).collect();

        Self {
            game_over: false,
            lives: state.lives,
            score: state.score,
            sprites,
            removals,
        }
    }
}
