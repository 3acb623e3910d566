//! Collision detection for axis-aligned rectangles
//!
//! Everything in the play field is an axis-aligned box: the bird, the pipes,
//! and the two edges of the viewport (tested as half-planes).

use serde::{Deserialize, Serialize};

use super::body::{Body, Surface};
use super::vector::Vector;
use crate::consts::VIEWPORT_HEIGHT;

/// Axis-aligned bounding box (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vector,
    /// Bottom-right corner
    pub max: Vector,
}

impl Aabb {
    pub fn from_origin_size(origin: Vector, size: Vector) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Strict overlap on both axes; touching edges do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Bounce direction after a collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction the bird is pushed after touching a surface
    pub fn away_from(surface: Surface) -> Self {
        match surface {
            Surface::TopPipe | Surface::Ceiling => Direction::Down,
            Surface::BottomPipe | Surface::Floor => Direction::Up,
        }
    }

    /// Unit vector (y grows downward)
    pub fn unit(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0.0, -1.0),
            Direction::Down => Vector::new(0.0, 1.0),
        }
    }
}

fn hits_any(bird: &Aabb, pipes: &[Body]) -> bool {
    pipes.iter().any(|pipe| bird.overlaps(&pipe.bounds()))
}

/// First surface the bird touches, top pipes and ceiling before bottom pipes and floor.
pub fn detect_collision(bird: &Body, top_pipes: &[Body], bottom_pipes: &[Body]) -> Option<Surface> {
    let b = bird.bounds();

    if hits_any(&b, top_pipes) {
        Some(Surface::TopPipe)
    } else if b.min.y <= 0.0 {
        Some(Surface::Ceiling)
    } else if hits_any(&b, bottom_pipes) {
        Some(Surface::BottomPipe)
    } else if b.max.y >= VIEWPORT_HEIGHT {
        Some(Surface::Floor)
    } else {
        None
    }
}
