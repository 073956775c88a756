//! App domain: tests for the Bevy glue.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::systems::{handle_restart, read_input, run_level_script};
use super::*;
use crate::content::{BindingsDef, GameContent, SimulationSettings, validate_level};
use crate::level::LevelEvent;
use crate::movement::Action;

fn builtin_content(player_count: usize) -> GameContent {
    GameContent {
        settings: SimulationSettings {
            player_count,
            ..default()
        },
        level: builtin_level(),
        bindings: BindingsDef::builtin().resolve().unwrap(),
    }
}

fn test_app(player_count: usize) -> App {
    let content = builtin_content(player_count);
    let mut app = App::new();
    app.insert_resource(Simulation::from_content(&content).unwrap())
        .insert_resource(Bindings(content.bindings))
        .init_resource::<PlayerInputs>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<Time>()
        .add_message::<LevelMessage>()
        .add_systems(Update, (read_input, run_level_script, handle_restart).chain());
    app
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

#[test]
fn test_world_to_bevy_flips_y_around_centre() {
    let rect = Rect::new(100.0, 200.0, 140.0, 264.0);
    assert_eq!(world_to_bevy(rect, 2.0), Vec3::new(120.0, -232.0, 2.0));
}

#[test]
fn test_builtin_level_is_valid() {
    let settings = SimulationSettings::default();
    assert!(validate_level(&builtin_level(), settings.standing_size()).is_empty());
}

#[test]
fn test_palette_prefers_level_colors() {
    let mut level = builtin_level();
    level.platforms[1].color = Some("#ff0000".to_string());

    let palette = LevelPalette::from_level(&level);

    assert_eq!(palette.0.len(), level.platforms.len());
    assert_eq!(palette.0[1], Color::from(Srgba::rgb_u8(255, 0, 0)));
    assert_ne!(palette.0[0], palette.0[3]);
}

#[test]
fn test_simulation_from_content() {
    let sim = Simulation::from_content(&builtin_content(3)).unwrap();

    assert_eq!(sim.engine.players().len(), 3);
    assert_eq!(sim.engine.spawn(), Vec2::new(234.0, 536.0));
    assert!(!sim.script.finished());
}

#[test]
fn test_simulation_rejects_bad_player_count() {
    assert!(Simulation::from_content(&builtin_content(0)).is_err());
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

#[test]
fn test_read_input_uses_bindings() {
    let mut app = test_app(2);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::ArrowLeft);

    app.update();

    let inputs = app.world().resource::<PlayerInputs>();
    assert_eq!(inputs.0.len(), 2);
    assert!(!inputs.0[0].pressed(Action::Left));
    assert!(inputs.0[1].pressed(Action::Left));
}

#[test]
fn test_level_script_writes_messages() {
    let mut app = test_app(1);
    app.world_mut()
        .resource_mut::<Simulation>()
        .engine
        .reload_player(0, Vec2::new(100.0, 1000.0));

    app.update();

    let messages = app.world().resource::<Messages<LevelMessage>>();
    let mut cursor = messages.get_cursor();
    let events: Vec<_> = cursor.read(messages).map(|m| m.0.clone()).collect();
    assert_eq!(events, vec![LevelEvent::PlayerFellOut { player: 0 }]);

    let sim = app.world().resource::<Simulation>();
    assert_eq!(sim.engine.players()[0].position(), Vec2::new(234.0, 536.0));
}

fn move_respawn_and_wander(app: &mut App) {
    let mut sim = app.world_mut().resource_mut::<Simulation>();
    sim.engine.set_respawn_point(0, Vec2::new(600.0, 536.0));
    sim.engine.reload_player(0, Vec2::new(900.0, 300.0));
}

#[test]
fn test_reload_key_returns_to_respawn_point() {
    let mut app = test_app(1);
    move_respawn_and_wander(&mut app);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyR);

    app.update();

    let player = &app.world().resource::<Simulation>().engine.players()[0];
    assert_eq!(player.position(), Vec2::new(600.0, 536.0));
    assert_eq!(player.respawn_point, Vec2::new(600.0, 536.0));
}

#[test]
fn test_shift_restart_key_resets_level() {
    let mut app = test_app(1);
    move_respawn_and_wander(&mut app);
    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.press(KeyCode::ShiftLeft);
    keyboard.press(KeyCode::KeyR);

    app.update();

    let player = &app.world().resource::<Simulation>().engine.players()[0];
    assert_eq!(player.position(), Vec2::new(234.0, 536.0));
    assert_eq!(player.respawn_point, Vec2::new(234.0, 536.0));
}
