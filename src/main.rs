use bevy::prelude::*;

use parkour_dash::app::{DEFAULT_LEVEL, SimulationPlugin};

fn main() {
    // Optional level file name, resolved under assets/levels/.
    let level = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Parkour Dash".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(SimulationPlugin {
        level,
        ..default()
    });

    #[cfg(feature = "dev-tools")]
    app.add_plugins(parkour_dash::debug::DebugPlugin);

    app.run();
}
