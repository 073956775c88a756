//! Debug/Creative Mode for inspecting the simulation while it runs.
//!
//! Features:
//! - F1: hitbox overlay for players, platforms and the camera viewport
//! - F2: freeze the camera where it is, or resume tracking
//! - F3: head-bump zones and ladder volumes
//! - F4: manual overview of the whole world

mod state;
mod systems;

use bevy::prelude::*;

pub use state::DebugState;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (systems::handle_debug_hotkeys, systems::count_level_messages),
            )
            .add_systems(
                Update,
                systems::draw_hitboxes.run_if(|state: Res<DebugState>| state.show_hitboxes),
            )
            .add_systems(
                Update,
                systems::draw_zones.run_if(|state: Res<DebugState>| state.show_zones),
            );
    }
}
