//! Simulation domain: explicit context and level layout handed to the engine.

use bevy::prelude::*;

use crate::camera::CameraConfig;
use crate::physics::{CollisionConfig, rect_at};
use crate::platforms::{Ladder, Platform};

/// Clock, window and tuning shared by the loop, resolver and camera.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationContext {
    pub fixed_dt: f32,
    pub max_steps_per_frame: u32,
    /// Longer frames are treated as this long.
    pub max_frame_delta: f32,
    pub window: Vec2,
    pub collision: CollisionConfig,
    pub camera: CameraConfig,
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 5,
            max_frame_delta: 0.25,
            window: Vec2::new(1280.0, 720.0),
            collision: CollisionConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// Geometry of one level, ready to simulate.
#[derive(Debug, Clone)]
pub struct LevelLayout {
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    /// Top-left of the standing hitbox at spawn.
    pub spawn: Vec2,
    pub world_bounds: Rect,
}

impl LevelLayout {
    pub fn new(world_size: Vec2, spawn: Vec2) -> Self {
        Self {
            platforms: Vec::new(),
            ladders: Vec::new(),
            spawn,
            world_bounds: rect_at(Vec2::ZERO, world_size),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn with_ladder(mut self, ladder: Ladder) -> Self {
        self.ladders.push(ladder);
        self
    }
}
