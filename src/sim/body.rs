//! Physical entities: the bird and the pipes
//!
//! A body never moves its anchor. Motion accumulates in `displacement` so
//! the renderer only needs a translation.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::vector::Vector;
use crate::consts::*;

/// How the presentation layer draws a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Rendered as an image
    Bird,
    /// Rendered as a rectangle
    Pipe,
}

/// Which surface a body represents for collision bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    TopPipe,
    BottomPipe,
    Ceiling,
    Floor,
}

/// A physical game entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Unique within its owning collection while alive
    pub id: u32,
    /// Simulation time of spawn (seconds for pipes, 0 for the bird)
    pub created_at: f64,
    pub kind: BodyKind,
    /// Top-left anchor at spawn
    pub start_pos: Vector,
    pub width: f64,
    pub height: f64,
    pub vel: Vector,
    pub acc: Vector,
    /// Offset from `start_pos` accumulated since spawn
    pub displacement: Vector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<Surface>,
}

impl Body {
    /// The player's bird, at rest under gravity
    pub fn bird() -> Self {
        Self {
            id: 0,
            created_at: 0.0,
            kind: BodyKind::Bird,
            start_pos: BIRD_START_POS,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            vel: Vector::ZERO,
            acc: GRAVITY,
            displacement: Vector::ZERO,
            fill: None,
            href: Some(BIRD_HREF.to_string()),
            surface: None,
        }
    }

    /// A pipe entering from just past the right edge
    pub fn pipe(id: u32, created_at: f64, top: f64, height: f64, surface: Surface) -> Self {
        Self {
            id,
            created_at,
            kind: BodyKind::Pipe,
            start_pos: Vector::new(VIEWPORT_WIDTH, top),
            width: PIPE_WIDTH,
            height: height.max(0.0),
            vel: PIPE_VEL,
            acc: Vector::ZERO,
            displacement: Vector::ZERO,
            fill: Some(PIPE_FILL.to_string()),
            href: None,
            surface: Some(surface),
        }
    }

    /// Current top-left corner
    #[inline]
    pub fn position(&self) -> Vector {
        self.start_pos + self.displacement
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.position(), Vector::new(self.width, self.height))
    }

    /// Semi-implicit Euler step: velocity first, then displacement
    pub fn integrate(&self) -> Self {
        let vel = self.vel + self.acc;
        Self {
            vel,
            displacement: self.displacement + vel,
            ..self.clone()
        }
    }

    /// Carried fully past the left edge of the viewport
    pub fn is_off_screen(&self) -> bool {
        self.displacement.x < -(VIEWPORT_WIDTH + self.width)
    }
}
