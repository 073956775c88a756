//! Physics domain: shared position/velocity state and the integration step.

use bevy::prelude::*;

/// Axis-aligned body shared by players and platforms.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
}

impl KinematicBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width: size.x,
            height: size.y,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        rect_at(self.position, self.size())
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    /// Semi-implicit Euler: gravity updates the velocity first, then the new
    /// velocity moves the body. Gravity only acts on airborne bodies.
    pub fn integrate(&mut self, dt: f32, gravity: f32, airborne: bool, max_fall_speed: f32) {
        if airborne {
            self.velocity.y = (self.velocity.y + gravity * dt).min(max_fall_speed);
        }
        self.position += self.velocity * dt;
    }

    /// Swap the hitbox size while keeping the bottom edge where it was.
    pub fn resize_keep_feet(&mut self, size: Vec2) {
        let bottom = self.bottom();
        self.width = size.x;
        self.height = size.y;
        self.position.y = bottom - size.y;
    }

    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Rectangle from a top-left corner and a size.
pub fn rect_at(min: Vec2, size: Vec2) -> Rect {
    Rect { min, max: min + size }
}

/// Strict overlap test. Rectangles that only share an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}
