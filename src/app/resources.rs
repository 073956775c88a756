//! App domain: resources shared by the frame systems.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::content::{GameContent, InputBindings, LevelDef, PlatformDef};
use crate::level::{FINISH_LINE, LevelEvent, LevelScript, PlatformRole, STARTING_PLATFORM};
use crate::movement::InputSnapshot;
use crate::simulation::{Engine, SimulationError};

/// The running level: engine state plus the script reacting to it.
#[derive(Resource, Debug)]
pub struct Simulation {
    pub engine: Engine,
    pub script: LevelScript,
}

impl Simulation {
    pub fn from_content(content: &GameContent) -> Result<Self, SimulationError> {
        let settings = &content.settings;
        let layout = content.level.layout(settings.standing_size());
        let mut engine = Engine::new(
            settings.context(),
            layout,
            &settings.movement,
            settings.player_count,
        )?;

        let script = LevelScript::new(&engine, content.level.tutorial)
            .with_artifacts(content.level.artifacts());
        script.begin(&mut engine);

        info!("Level '{}' started", content.level.id);
        Ok(Self { engine, script })
    }
}

/// This frame's input, indexed by player id.
#[derive(Resource, Debug, Default)]
pub struct PlayerInputs(pub Vec<InputSnapshot>);

/// Resolved key tables, indexed by player id.
#[derive(Resource, Debug, Default)]
pub struct Bindings(pub Vec<InputBindings>);

/// Fill colors for platforms, indexed like the engine's platforms.
#[derive(Resource, Debug, Default)]
pub struct LevelPalette(pub Vec<Color>);

impl LevelPalette {
    pub fn from_level(level: &LevelDef) -> Self {
        Self(level.platforms.iter().map(platform_color).collect())
    }
}

fn platform_color(def: &PlatformDef) -> Color {
    if let Some(color) = def.parsed_color() {
        return color;
    }
    match PlatformRole::from_name(&def.name) {
        PlatformRole::Start => Color::srgb(0.36, 0.55, 0.35),
        PlatformRole::Checkpoint(_) => Color::srgb(0.95, 0.77, 0.06),
        PlatformRole::DeathZone => Color::srgb(0.75, 0.22, 0.17),
        PlatformRole::FinishLine => Color::srgb(0.93, 0.94, 0.95),
        PlatformRole::Unlock(_) => Color::srgb(0.61, 0.35, 0.71),
        PlatformRole::Plain => Color::srgb(0.55, 0.35, 0.17),
    }
}

/// Level script output, forwarded to any system that cares.
#[derive(Debug, Clone)]
pub struct LevelMessage(pub LevelEvent);

impl Message for LevelMessage {}

/// Level used when the asset files cannot be loaded.
pub fn builtin_level() -> LevelDef {
    let slab = |name: &str, x: f32, y: f32, width: f32, height: f32| PlatformDef {
        name: name.to_string(),
        x,
        y,
        width,
        height,
        color: None,
        motion: None,
    };

    LevelDef {
        id: "builtin".to_string(),
        world_size: (2000.0, 800.0),
        spawn: None,
        tutorial: false,
        platforms: vec![
            slab(STARTING_PLATFORM, 0.0, 600.0, 500.0, 200.0),
            slab("ground", 500.0, 600.0, 1200.0, 200.0),
            slab("block", 800.0, 480.0, 200.0, 30.0),
            slab(FINISH_LINE, 1700.0, 600.0, 300.0, 200.0),
        ],
        ladders: Vec::new(),
        artifacts: Vec::new(),
    }
}
