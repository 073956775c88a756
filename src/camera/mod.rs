//! Camera domain: framing tracked players and mapping world rects to screen.

mod tracker;


pub use tracker::{CameraConfig, CameraMode, CameraTracker, HasWorldRect};
