//! Debug domain: overlay toggles and run counters.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Outline every player and platform hitbox
    pub show_hitboxes: bool,
    /// Outline head-bump zones and ladders
    pub show_zones: bool,
    /// Deaths and fall-outs since startup
    pub deaths: u32,
    pub checkpoints: u32,
}

