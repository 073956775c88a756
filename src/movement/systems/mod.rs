//! Movement domain: system modules for locomotion updates.

pub(crate) mod contacts;
pub(crate) mod movement;

pub use contacts::SlideExit;
pub use movement::ControlOutcome;

pub(crate) use contacts::{apply_resolution, detect_head_bump, detect_ladder, resolve_slide_exit};
pub(crate) use movement::{
    apply_horizontal_movement, apply_jump, apply_ladder_climb, apply_slide_start,
    apply_slide_velocity, update_facing,
};
