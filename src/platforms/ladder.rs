//! Platforms domain: ladder trigger volumes. Ladders never block movement.

use bevy::prelude::*;

use crate::physics::rect_at;

pub const DEFAULT_LADDER_WIDTH: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    pub rect: Rect,
}

impl Ladder {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            rect: rect_at(position, size),
        }
    }

    pub fn with_height(position: Vec2, height: f32) -> Self {
        Self::new(position, Vec2::new(DEFAULT_LADDER_WIDTH, height))
    }
}
