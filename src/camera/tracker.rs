//! Camera domain: bounding-box tracking with smoothed zoom.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::Player;
use crate::physics::rect_at;
use crate::platforms::{Ladder, Platform};

/// Anything the camera can frame or draw.
pub trait HasWorldRect {
    fn world_rect(&self) -> Rect;
}

impl HasWorldRect for Player {
    fn world_rect(&self) -> Rect {
        self.rect()
    }
}

impl HasWorldRect for Platform {
    fn world_rect(&self) -> Rect {
        self.rect()
    }
}

impl HasWorldRect for Ladder {
    fn world_rect(&self) -> Rect {
        self.rect
    }
}

impl HasWorldRect for Rect {
    fn world_rect(&self) -> Rect {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Tracking,
    /// Position and zoom are driven by level scripting.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space padding around the tracked players.
    pub margin: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Exponential approach rate toward the target zoom; 0 snaps.
    pub zoom_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            margin: 100.0,
            min_zoom: 0.5,
            max_zoom: 1.0,
            zoom_rate: 4.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CameraTracker {
    config: CameraConfig,
    window: Vec2,
    world: Rect,
    viewport: Rect,
    zoom: f32,
    mode: CameraMode,
}

impl CameraTracker {
    pub fn new(config: CameraConfig, window: Vec2, world: Rect) -> Self {
        let mut tracker = Self {
            config,
            window,
            world,
            viewport: rect_at(world.min, window),
            zoom: config.max_zoom,
            mode: CameraMode::Tracking,
        };
        tracker.viewport = tracker.place(world.min + window / 2.0);
        tracker
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != self.mode {
            debug!("Camera mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Take manual control and place the viewport directly.
    pub fn set_manual(&mut self, origin: Vec2, zoom: f32) {
        self.mode = CameraMode::Manual;
        self.zoom = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.viewport = rect_at(origin, self.window / self.zoom);
    }

    pub fn set_world_bounds(&mut self, world: Rect) {
        self.world = world;
    }

    /// Zoom that fits `framed` in the window, never above `max_zoom` and
    /// never below `min_zoom`.
    pub fn fit_zoom(&self, framed: Rect) -> f32 {
        let size = framed.size().max(Vec2::splat(f32::EPSILON));
        (self.window.x / size.x)
            .min(self.window.y / size.y)
            .min(self.config.max_zoom)
            .max(self.config.min_zoom)
    }

    /// Frame every target. Does nothing in manual mode or without targets.
    pub fn track<'a, T, I>(&mut self, targets: I, dt: f32)
    where
        T: HasWorldRect + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        if self.mode == CameraMode::Manual {
            return;
        }
        let Some(bounds) = targets
            .into_iter()
            .map(HasWorldRect::world_rect)
            .reduce(|a, b| a.union(b))
        else {
            return;
        };

        let framed = bounds.inflate(self.config.margin);
        let target = self.fit_zoom(framed);

        self.zoom = if self.config.zoom_rate <= 0.0 {
            target
        } else {
            let t = 1.0 - (-self.config.zoom_rate * dt).exp();
            self.zoom + (target - self.zoom) * t
        };
        self.zoom = self.zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.viewport = self.place(framed.center());
    }

    /// Viewport of the current zoom centred on `center`, kept inside the world.
    fn place(&self, center: Vec2) -> Rect {
        let size = self.window / self.zoom;
        let origin = center - size / 2.0;
        let origin = Vec2::new(
            clamp_axis(origin.x, size.x, self.world.min.x, self.world.max.x),
            clamp_axis(origin.y, size.y, self.world.min.y, self.world.max.y),
        );
        rect_at(origin, size)
    }

    /// World rect to screen-space rect for the current viewport.
    pub fn to_screen(&self, item: &impl HasWorldRect) -> Rect {
        let rect = item.world_rect();
        Rect {
            min: (rect.min - self.viewport.min) * self.zoom,
            max: (rect.max - self.viewport.min) * self.zoom,
        }
    }
}

fn clamp_axis(origin: f32, size: f32, min: f32, max: f32) -> f32 {
    if size >= max - min {
        // Viewport larger than the world: centre on it.
        min + (max - min - size) / 2.0
    } else {
        origin.clamp(min, max - size)
    }
}
