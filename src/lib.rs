//! Parkour Dash: a deterministic 2D platformer kinematic core with a thin
//! Bevy front end.
//!
//! World space is y-down with rectangles anchored at their top-left corner.
//! The simulation core (`physics`, `platforms`, `movement`, `camera`,
//! `simulation`) has no ECS dependencies beyond Bevy's math and logging;
//! `app` and `debug` are the only modules that touch the Bevy world.

pub mod app;
pub mod camera;
pub mod content;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod level;
pub mod movement;
pub mod physics;
pub mod platforms;
pub mod simulation;
