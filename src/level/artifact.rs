//! Level domain: collectibles picked up by touching them.

use bevy::prelude::*;

use crate::camera::HasWorldRect;
use crate::physics::rect_at;

/// Side length of every artifact's square pickup area.
pub const ARTIFACT_SIZE: f32 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub name: String,
    pub rect: Rect,
    pub collected: bool,
}

impl Artifact {
    pub fn new(name: impl Into<String>, position: Vec2) -> Self {
        Self {
            name: name.into(),
            rect: rect_at(position, Vec2::splat(ARTIFACT_SIZE)),
            collected: false,
        }
    }

    pub fn collect(&mut self) {
        self.collected = true;
    }

    pub fn reset(&mut self) {
        self.collected = false;
    }
}

impl HasWorldRect for Artifact {
    fn world_rect(&self) -> Rect {
        self.rect
    }
}
