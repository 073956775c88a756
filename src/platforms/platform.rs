//! Platforms domain: platform state and the back-and-forth oscillator.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::rect_at;

/// Index of a platform within the level it was loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformId(pub usize);

/// When a moving platform turns around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Reversal {
    /// Turn once the distance from the start exceeds the range length.
    /// The platform sweeps `start ± range`.
    #[default]
    Distance,
    /// Also turn when crossing back past the start along the initial
    /// direction. The platform sweeps `start .. start + range`.
    Bounded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformMotion {
    pub direction: Vec2,
    pub range: Vec2,
    pub speed: f32,
    pub reversal: Reversal,
}

#[derive(Debug, Clone)]
pub struct Platform {
    /// Tag consumed by level scripting ("checkpoint1", "finish-line", ...).
    pub name: String,
    pub start_position: Vec2,
    pub position: Vec2,
    pub size: Vec2,
    pub direction: Vec2,
    pub movement_range: Vec2,
    pub speed: f32,
    pub is_moving: bool,
    pub reversal: Reversal,
    /// `direction * speed` while moving, zero otherwise. Riders read this.
    pub velocity: Vec2,
    initial_direction: Vec2,
}

impl Platform {
    pub fn fixed(name: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            name: name.into(),
            start_position: position,
            position,
            size,
            direction: Vec2::ZERO,
            movement_range: Vec2::ZERO,
            speed: 0.0,
            is_moving: false,
            reversal: Reversal::Distance,
            velocity: Vec2::ZERO,
            initial_direction: Vec2::ZERO,
        }
    }

    /// A moving platform. A zero-length range or direction leaves it static.
    pub fn moving(name: impl Into<String>, position: Vec2, size: Vec2, motion: PlatformMotion) -> Self {
        let mut platform = Self::fixed(name, position, size);
        let direction = motion.direction.normalize_or_zero();

        if direction == Vec2::ZERO || motion.range.length() <= f32::EPSILON {
            warn!(
                "Platform '{}' has a degenerate motion (direction={}, range={}), treating it as static",
                platform.name, motion.direction, motion.range
            );
            return platform;
        }

        platform.direction = direction;
        platform.initial_direction = direction;
        platform.movement_range = motion.range;
        platform.speed = motion.speed;
        platform.reversal = motion.reversal;
        platform.is_moving = true;
        platform
    }

    pub fn rect(&self) -> Rect {
        rect_at(self.position, self.size)
    }

    pub fn advance(&mut self, dt: f32) {
        let range = self.movement_range.length();
        let heading = self.direction.normalize_or_zero();

        if !self.is_moving || range <= f32::EPSILON || heading == Vec2::ZERO {
            self.velocity = Vec2::ZERO;
            return;
        }

        self.velocity = heading * self.speed;
        self.position += self.velocity * dt;

        let offset = self.position - self.start_position;
        if offset.length() > range {
            // Pulled back onto the bound, then bounce.
            self.position = self.start_position + offset.normalize_or_zero() * range;
            self.direction = -self.direction;
            debug!("Platform '{}' reversed at range bound", self.name);
        } else if self.reversal == Reversal::Bounded && self.crossed_start(offset) {
            self.position = self.start_position;
            self.direction = -self.direction;
            debug!("Platform '{}' reversed at start", self.name);
        }
    }

    fn crossed_start(&self, offset: Vec2) -> bool {
        offset.dot(self.initial_direction) < 0.0 && self.direction.dot(self.initial_direction) < 0.0
    }

    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.direction = self.initial_direction;
        self.velocity = Vec2::ZERO;
    }

    pub fn distance_from_start(&self) -> f32 {
        self.position.distance(self.start_position)
    }
}
