//! Data definitions for level, settings and binding files.
//!
//! Levels live in assets/levels/ as RON or JSON. Settings and bindings live
//! in assets/data/*.ron. Everything here is plain deserialized data; the
//! conversions at the bottom turn it into simulation types.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;
use crate::level::{Artifact, resolve_spawn};
use crate::movement::MovementTuning;
use crate::physics::CollisionConfig;
use crate::platforms::{DEFAULT_LADDER_WIDTH, Ladder, Platform, PlatformMotion, Reversal};
use crate::simulation::{LevelLayout, SimulationContext};

// ============================================================================
// Levels (assets/levels/*.ron, *.json)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelDef {
    pub id: String,
    pub world_size: (f32, f32),
    /// Falls back to the top of `starting-platform` when absent.
    #[serde(default)]
    pub spawn: Option<(f32, f32)>,
    /// Players start without jump and slide until a gate unlocks them.
    #[serde(default)]
    pub tutorial: bool,
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub ladders: Vec<LadderDef>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlatformDef {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Hex string such as "#8b5a2b".
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub motion: Option<MotionDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MotionDef {
    pub direction: (f32, f32),
    pub range: (f32, f32),
    pub speed: f32,
    #[serde(default)]
    pub reversal: Reversal,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LadderDef {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    pub height: f32,
}

/// A collectible; `x`/`y` is the top-left of its pickup square.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArtifactDef {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

// ============================================================================
// Settings (assets/data/simulation.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub fixed_dt: f32,
    pub max_steps_per_frame: u32,
    pub max_frame_delta: f32,
    pub window: (f32, f32),
    pub player_count: usize,
    pub collision: CollisionConfig,
    pub camera: CameraConfig,
    pub movement: MovementTuning,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let ctx = SimulationContext::default();
        Self {
            fixed_dt: ctx.fixed_dt,
            max_steps_per_frame: ctx.max_steps_per_frame,
            max_frame_delta: ctx.max_frame_delta,
            window: (ctx.window.x, ctx.window.y),
            player_count: 1,
            collision: ctx.collision,
            camera: ctx.camera,
            movement: MovementTuning::default(),
        }
    }
}

impl SimulationSettings {
    pub fn context(&self) -> SimulationContext {
        SimulationContext {
            fixed_dt: self.fixed_dt,
            max_steps_per_frame: self.max_steps_per_frame,
            max_frame_delta: self.max_frame_delta,
            window: Vec2::new(self.window.0, self.window.1),
            collision: self.collision,
            camera: self.camera,
        }
    }

    pub fn standing_size(&self) -> Vec2 {
        Vec2::new(self.movement.standing_width, self.movement.standing_height)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl PlatformDef {
    pub fn to_platform(&self) -> Platform {
        let position = Vec2::new(self.x, self.y);
        let size = Vec2::new(self.width, self.height);
        match &self.motion {
            Some(motion) => Platform::moving(
                self.name.clone(),
                position,
                size,
                PlatformMotion {
                    direction: Vec2::new(motion.direction.0, motion.direction.1),
                    range: Vec2::new(motion.range.0, motion.range.1),
                    speed: motion.speed,
                    reversal: motion.reversal,
                },
            ),
            None => Platform::fixed(self.name.clone(), position, size),
        }
    }

    pub fn parsed_color(&self) -> Option<Color> {
        self.color
            .as_deref()
            .and_then(|hex| Srgba::hex(hex).ok())
            .map(Color::from)
    }
}

impl LadderDef {
    pub fn to_ladder(&self) -> Ladder {
        Ladder::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.width.unwrap_or(DEFAULT_LADDER_WIDTH), self.height),
        )
    }
}

impl ArtifactDef {
    pub fn to_artifact(&self) -> Artifact {
        Artifact::new(self.name.clone(), Vec2::new(self.x, self.y))
    }
}

impl LevelDef {
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts.iter().map(ArtifactDef::to_artifact).collect()
    }

    pub fn explicit_spawn(&self) -> Option<Vec2> {
        self.spawn.map(|(x, y)| Vec2::new(x, y))
    }

    /// Build the simulation layout. A level without any spawn source puts
    /// players at the world origin; validation reports that case.
    pub fn layout(&self, standing: Vec2) -> LevelLayout {
        let platforms: Vec<Platform> = self.platforms.iter().map(PlatformDef::to_platform).collect();
        let spawn = resolve_spawn(self.explicit_spawn(), &platforms, standing).unwrap_or(Vec2::ZERO);

        let mut layout = LevelLayout::new(Vec2::new(self.world_size.0, self.world_size.1), spawn);
        layout.platforms = platforms;
        layout.ladders = self.ladders.iter().map(LadderDef::to_ladder).collect();
        layout
    }
}
