//! Validation for level geometry, names and simulation settings.

use bevy::prelude::*;
use std::collections::HashSet;
use std::fmt;

use super::data::{LevelDef, SimulationSettings};
use crate::level::{CHECKPOINT_PREFIX, PlatformRole, resolve_spawn};
use crate::simulation::MAX_PLAYERS;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' has invalid '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Push an error unless the condition holds.
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

/// Validate a level. Returns a list of errors, empty if the level is usable.
pub fn validate_level(level: &LevelDef, standing: Vec2) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let id = &level.id;

    check!(
        errors,
        positive(level.world_size.0) && positive(level.world_size.1),
        "Level",
        id,
        "world_size",
        "must be positive, got {:?}",
        level.world_size
    );

    if let Some(spawn) = level.spawn {
        check!(
            errors,
            spawn.0.is_finite() && spawn.1.is_finite(),
            "Level",
            id,
            "spawn",
            "must be finite, got {:?}",
            spawn
        );
    }

    let platforms: Vec<_> = level.platforms.iter().map(|p| p.to_platform()).collect();
    check!(
        errors,
        resolve_spawn(level.explicit_spawn(), &platforms, standing).is_some(),
        "Level",
        id,
        "spawn",
        "missing, and no 'starting-platform' to derive it from"
    );

    // Validate platforms
    let mut unique_roles = HashSet::new();
    for platform in &level.platforms {
        let name = &platform.name;
        check!(
            errors,
            platform.x.is_finite() && platform.y.is_finite(),
            "Platform",
            name,
            "position",
            "must be finite, got ({}, {})",
            platform.x,
            platform.y
        );
        check!(
            errors,
            positive(platform.width) && positive(platform.height),
            "Platform",
            name,
            "size",
            "must be positive, got {}x{}",
            platform.width,
            platform.height
        );

        if let Some(color) = &platform.color {
            check!(
                errors,
                Srgba::hex(color).is_ok(),
                "Platform",
                name,
                "color",
                "'{}' is not a hex color",
                color
            );
        }

        if let Some(motion) = &platform.motion {
            check!(
                errors,
                non_negative(motion.speed),
                "Platform",
                name,
                "motion.speed",
                "must be >= 0, got {}",
                motion.speed
            );
            check!(
                errors,
                motion.direction.0.is_finite()
                    && motion.direction.1.is_finite()
                    && motion.range.0.is_finite()
                    && motion.range.1.is_finite(),
                "Platform",
                name,
                "motion",
                "direction and range must be finite"
            );
        }

        let role = PlatformRole::from_name(name);
        check!(
            errors,
            !(name.starts_with(CHECKPOINT_PREFIX) && role == PlatformRole::Plain),
            "Platform",
            name,
            "name",
            "checkpoint names need a number suffix"
        );
        if role != PlatformRole::Plain && role != PlatformRole::DeathZone {
            check!(
                errors,
                unique_roles.insert(role),
                "Platform",
                name,
                "name",
                "duplicate special platform"
            );
        }
    }

    // Validate ladders
    for (i, ladder) in level.ladders.iter().enumerate() {
        let width = ladder.width.unwrap_or(1.0);
        check!(
            errors,
            ladder.x.is_finite() && ladder.y.is_finite(),
            "Ladder",
            i,
            "position",
            "must be finite"
        );
        check!(
            errors,
            positive(ladder.height) && positive(width),
            "Ladder",
            i,
            "size",
            "must be positive, got height {}",
            ladder.height
        );
    }

    // Validate artifacts
    let mut artifact_names = HashSet::new();
    for artifact in &level.artifacts {
        let name = &artifact.name;
        check!(
            errors,
            artifact.x.is_finite() && artifact.y.is_finite(),
            "Artifact",
            name,
            "position",
            "must be finite, got ({}, {})",
            artifact.x,
            artifact.y
        );
        check!(
            errors,
            !name.is_empty() && artifact_names.insert(name.as_str()),
            "Artifact",
            name,
            "name",
            "must be non-empty and unique"
        );
    }

    errors
}

/// Validate simulation settings.
pub fn validate_settings(settings: &SimulationSettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let id = "simulation";

    check!(
        errors,
        positive(settings.fixed_dt),
        "Settings",
        id,
        "fixed_dt",
        "must be positive, got {}",
        settings.fixed_dt
    );
    check!(
        errors,
        settings.max_steps_per_frame >= 1,
        "Settings",
        id,
        "max_steps_per_frame",
        "must be at least 1"
    );
    check!(
        errors,
        positive(settings.max_frame_delta) && settings.max_frame_delta >= settings.fixed_dt,
        "Settings",
        id,
        "max_frame_delta",
        "must be at least fixed_dt, got {}",
        settings.max_frame_delta
    );
    check!(
        errors,
        positive(settings.window.0) && positive(settings.window.1),
        "Settings",
        id,
        "window",
        "must be positive, got {:?}",
        settings.window
    );
    check!(
        errors,
        (1..=MAX_PLAYERS).contains(&settings.player_count),
        "Settings",
        id,
        "player_count",
        "must be 1..={}, got {}",
        MAX_PLAYERS,
        settings.player_count
    );

    // Collision and camera
    let collision = &settings.collision;
    check!(
        errors,
        non_negative(collision.ground_skin)
            && non_negative(collision.ceiling_tolerance)
            && non_negative(collision.overlap_epsilon),
        "Settings",
        id,
        "collision",
        "tolerances must be >= 0"
    );

    let camera = &settings.camera;
    check!(
        errors,
        positive(camera.min_zoom) && camera.min_zoom <= camera.max_zoom,
        "Settings",
        id,
        "camera.zoom",
        "need 0 < min_zoom <= max_zoom, got {}..{}",
        camera.min_zoom,
        camera.max_zoom
    );
    check!(
        errors,
        non_negative(camera.margin) && non_negative(camera.zoom_rate),
        "Settings",
        id,
        "camera",
        "margin and zoom_rate must be >= 0"
    );

    // Movement
    let m = &settings.movement;
    check!(
        errors,
        positive(m.mass),
        "Settings",
        id,
        "movement.mass",
        "must be positive, got {}",
        m.mass
    );
    check!(
        errors,
        positive(m.speed),
        "Settings",
        id,
        "movement.speed",
        "must be positive, got {}",
        m.speed
    );
    check!(
        errors,
        positive(m.max_fall_speed),
        "Settings",
        id,
        "movement.max_fall_speed",
        "must be positive, got {}",
        m.max_fall_speed
    );
    check!(
        errors,
        non_negative(m.acceleration)
            && non_negative(m.deceleration)
            && non_negative(m.gravity)
            && non_negative(m.jump_strength)
            && non_negative(m.climb_speed),
        "Settings",
        id,
        "movement",
        "rates must be >= 0"
    );
    check!(
        errors,
        positive(m.standing_width)
            && positive(m.standing_height)
            && positive(m.slide_width)
            && positive(m.slide_height),
        "Settings",
        id,
        "movement.size",
        "hitbox sizes must be positive"
    );
    check!(
        errors,
        non_negative(m.slide_distance) && positive(m.slide_speed_multiplier),
        "Settings",
        id,
        "movement.slide",
        "slide distance and multiplier must be usable"
    );
    check!(
        errors,
        non_negative(m.head_clearance),
        "Settings",
        id,
        "movement.head_clearance",
        "must be >= 0, got {}",
        m.head_clearance
    );

    errors
}
