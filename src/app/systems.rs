//! App domain: per-frame systems and the sprites they drive.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::app::{Bindings, LevelMessage, LevelPalette, PlayerInputs, Simulation};
use crate::camera::HasWorldRect;
use crate::movement::LocomotionState;

const PLATFORM_Z: f32 = 0.0;
const LADDER_Z: f32 = 1.0;
const ARTIFACT_Z: f32 = 1.5;
const PLAYER_Z: f32 = 2.0;

const PLAYER_COLORS: [Color; 4] = [
    Color::srgb(0.9, 0.9, 0.9),
    Color::srgb(0.95, 0.55, 0.55),
    Color::srgb(0.55, 0.75, 0.95),
    Color::srgb(0.6, 0.9, 0.6),
];

#[derive(Component, Debug)]
pub struct PlayerSprite(pub usize);

#[derive(Component, Debug)]
pub struct PlatformSprite(pub usize);

#[derive(Component, Debug)]
pub struct LadderSprite;

#[derive(Component, Debug)]
pub struct ArtifactSprite(pub usize);

#[derive(Component, Debug)]
pub struct TrackingCamera;

/// Centre of a y-down world rect in Bevy's y-up space.
pub fn world_to_bevy(rect: Rect, z: f32) -> Vec3 {
    let center = rect.center();
    Vec3::new(center.x, -center.y, z)
}

pub(crate) fn setup_camera(mut commands: Commands, sim: Res<Simulation>) {
    let viewport = sim.engine.camera().viewport();
    commands.spawn((
        Camera2d,
        TrackingCamera,
        Transform::from_translation(world_to_bevy(viewport, 0.0)),
    ));
}

pub(crate) fn spawn_level_sprites(
    mut commands: Commands,
    sim: Res<Simulation>,
    palette: Res<LevelPalette>,
) {
    for (i, platform) in sim.engine.platforms().iter().enumerate() {
        let color = palette
            .0
            .get(i)
            .copied()
            .unwrap_or(Color::srgb(0.55, 0.35, 0.17));
        commands.spawn((
            PlatformSprite(i),
            Sprite {
                color,
                custom_size: Some(platform.size),
                ..default()
            },
            Transform::from_translation(world_to_bevy(platform.world_rect(), PLATFORM_Z)),
        ));
    }

    for ladder in sim.engine.ladders() {
        commands.spawn((
            LadderSprite,
            Sprite {
                color: Color::srgba(0.8, 0.65, 0.3, 0.6),
                custom_size: Some(ladder.rect.size()),
                ..default()
            },
            Transform::from_translation(world_to_bevy(ladder.rect, LADDER_Z)),
        ));
    }

    for (i, artifact) in sim.script.artifacts().iter().enumerate() {
        commands.spawn((
            ArtifactSprite(i),
            Sprite {
                color: Color::srgb(1.0, 0.84, 0.0),
                custom_size: Some(artifact.rect.size()),
                ..default()
            },
            Transform::from_translation(world_to_bevy(artifact.world_rect(), ARTIFACT_Z)),
        ));
    }

    for player in sim.engine.players() {
        commands.spawn((
            PlayerSprite(player.id),
            Sprite {
                color: PLAYER_COLORS[player.id % PLAYER_COLORS.len()],
                custom_size: Some(player.body.size()),
                ..default()
            },
            Transform::from_translation(world_to_bevy(player.world_rect(), PLAYER_Z)),
        ));
    }

    debug!(
        "Spawned sprites for {} platforms, {} ladders, {} players",
        sim.engine.platforms().len(),
        sim.engine.ladders().len(),
        sim.engine.players().len()
    );
}

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<Bindings>,
    sim: Res<Simulation>,
    mut inputs: ResMut<PlayerInputs>,
) {
    inputs.0 = bindings
        .0
        .iter()
        .take(sim.engine.players().len())
        .map(|table| table.snapshot(|key| keyboard.pressed(key)))
        .collect();
}

pub(crate) fn step_simulation(
    time: Res<Time>,
    inputs: Res<PlayerInputs>,
    mut sim: ResMut<Simulation>,
) {
    let report = sim.engine.tick(time.delta_secs(), &inputs.0);
    if report.rolled_back > 0 {
        debug!(
            "{} of {} steps rolled back this frame",
            report.rolled_back, report.steps
        );
    }
}

pub(crate) fn run_level_script(
    time: Res<Time>,
    mut sim: ResMut<Simulation>,
    mut messages: MessageWriter<LevelMessage>,
) {
    let Simulation { engine, script } = &mut *sim;
    script.advance_timer(time.delta_secs());
    for event in script.evaluate(engine) {
        messages.write(LevelMessage(event));
    }
}

/// R reloads at the last checkpoint; Shift+R restarts the whole level.
pub(crate) fn handle_restart(keyboard: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    if !keyboard.just_pressed(KeyCode::KeyR) {
        return;
    }
    let Simulation { engine, script } = &mut *sim;
    if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        script.restart(engine);
    } else {
        script.reload(engine);
    }
}

pub(crate) fn sync_player_sprites(
    sim: Res<Simulation>,
    mut sprites: Query<(&PlayerSprite, &mut Sprite, &mut Transform)>,
) {
    for (&PlayerSprite(id), mut sprite, mut transform) in &mut sprites {
        let Some(player) = sim.engine.player(id) else {
            continue;
        };
        let base = PLAYER_COLORS[id % PLAYER_COLORS.len()];
        sprite.custom_size = Some(player.body.size());
        sprite.color = match player.state() {
            LocomotionState::Sliding => base.darker(0.15),
            LocomotionState::OnLadder => base.with_alpha(0.8),
            _ => base,
        };
        sprite.flip_x = player.facing.sign() < 0.0;
        transform.translation = world_to_bevy(player.world_rect(), PLAYER_Z);
    }
}

pub(crate) fn sync_platform_sprites(
    sim: Res<Simulation>,
    mut sprites: Query<(&PlatformSprite, &mut Transform)>,
) {
    for (&PlatformSprite(i), mut transform) in &mut sprites {
        if let Some(platform) = sim.engine.platforms().get(i) {
            transform.translation = world_to_bevy(platform.world_rect(), PLATFORM_Z);
        }
    }
}

pub(crate) fn sync_artifact_sprites(
    sim: Res<Simulation>,
    mut sprites: Query<(&ArtifactSprite, &mut Visibility)>,
) {
    for (&ArtifactSprite(i), mut visibility) in &mut sprites {
        let collected = sim.script.artifacts().get(i).is_none_or(|a| a.collected);
        *visibility = if collected {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
    }
}

/// Centre the camera on the tracker's viewport and scale by its zoom.
pub(crate) fn sync_camera(
    sim: Res<Simulation>,
    mut camera: Query<(&mut Transform, &mut Projection), With<TrackingCamera>>,
) {
    let tracker = sim.engine.camera();
    for (mut transform, mut projection) in &mut camera {
        transform.translation = world_to_bevy(tracker.viewport(), transform.translation.z);
        if let Projection::Orthographic(ortho) = projection.as_mut() {
            ortho.scale = 1.0 / tracker.zoom();
        }
    }
}
