//! Physics domain: kinematic bodies and axis-separated collision resolution.
//!
//! World space is y-down: a body's `position` is the top-left corner of its
//! hitbox and positive `velocity.y` means falling.

mod body;
mod collision;


pub use body::{KinematicBody, overlaps, rect_at};
pub use collision::{CollisionConfig, Resolution, any_overlap, resolve, separate_horizontally};
