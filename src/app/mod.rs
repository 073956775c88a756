//! App domain: Bevy glue around the simulation core.
//!
//! Content is loaded while the plugin builds. Each rendered frame then reads
//! the keyboard through the resolved binding tables, drives `Engine::tick`,
//! runs level scripting and copies the results onto sprites and the camera.

mod resources;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use std::path::PathBuf;

use crate::content::{BindingsDef, GameContent, SimulationSettings, load_all_content};

pub use resources::{Bindings, LevelMessage, LevelPalette, PlayerInputs, Simulation, builtin_level};
pub use systems::{
    ArtifactSprite, LadderSprite, PlatformSprite, PlayerSprite, TrackingCamera, world_to_bevy,
};

pub const DEFAULT_LEVEL: &str = "demo_level.ron";

pub struct SimulationPlugin {
    pub assets_dir: PathBuf,
    /// File name under the assets' levels directory.
    pub level: String,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            level: DEFAULT_LEVEL.to_string(),
        }
    }
}

impl SimulationPlugin {
    fn load_content(&self) -> GameContent {
        match load_all_content(&self.assets_dir, &self.level) {
            Ok(content) => content,
            Err(errors) => {
                for error in &errors {
                    error!("{}", error);
                }
                warn!(
                    "Content failed to load ({} errors), using built-in level and defaults",
                    errors.len()
                );
                GameContent {
                    settings: SimulationSettings::default(),
                    level: builtin_level(),
                    bindings: BindingsDef::builtin().resolve().unwrap_or_default(),
                }
            }
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let content = self.load_content();
        let simulation = match Simulation::from_content(&content) {
            Ok(simulation) => simulation,
            Err(e) => {
                error!("Could not start level '{}': {}", content.level.id, e);
                return;
            }
        };

        if content.bindings.len() < simulation.engine.players().len() {
            warn!(
                "{} players but only {} binding tables; the rest receive no input",
                simulation.engine.players().len(),
                content.bindings.len()
            );
        }

        app.insert_resource(LevelPalette::from_level(&content.level))
            .insert_resource(Bindings(content.bindings))
            .insert_resource(simulation)
            .init_resource::<PlayerInputs>()
            .add_message::<LevelMessage>()
            .add_systems(
                Startup,
                (systems::setup_camera, systems::spawn_level_sprites),
            )
            .add_systems(
                Update,
                (
                    systems::read_input,
                    systems::step_simulation,
                    systems::run_level_script,
                    systems::handle_restart,
                    systems::sync_player_sprites,
                    systems::sync_platform_sprites,
                    systems::sync_artifact_sprites,
                    systems::sync_camera,
                )
                    .chain(),
            );
    }
}
