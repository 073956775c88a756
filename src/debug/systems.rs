//! Debug domain: hotkeys and gizmo overlays.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::app::{LevelMessage, Simulation};
use crate::camera::{CameraMode, HasWorldRect};
use crate::debug::DebugState;
use crate::level::LevelEvent;

const HITBOX_COLOR: Color = Color::srgb(0.2, 1.0, 0.2);
const GROUNDED_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);
const PLATFORM_COLOR: Color = Color::srgb(1.0, 1.0, 0.2);
const VIEWPORT_COLOR: Color = Color::srgb(1.0, 0.3, 1.0);
const HEAD_ZONE_COLOR: Color = Color::srgb(1.0, 0.4, 0.2);
const HEAD_BLOCKED_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
const LADDER_COLOR: Color = Color::srgb(0.8, 0.6, 0.2);

/// Outline a y-down world rect in Bevy space.
fn outline(gizmos: &mut Gizmos, rect: Rect, color: Color) {
    let center = rect.center();
    gizmos.rect_2d(
        Isometry2d::from_translation(Vec2::new(center.x, -center.y)),
        rect.size(),
        color,
    );
}

fn toggle(flag: &mut bool, name: &str) {
    *flag = !*flag;
    info!("[DEBUG] {} {}", name, if *flag { "ON" } else { "OFF" });
}

/// Handle keyboard shortcuts for debug overlays and camera control
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    sim: Option<ResMut<Simulation>>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        toggle(&mut debug_state.show_hitboxes, "Hitboxes");
    }
    if keyboard.just_pressed(KeyCode::F3) {
        toggle(&mut debug_state.show_zones, "Zones");
    }

    let Some(mut sim) = sim else {
        return;
    };
    let engine = &mut sim.engine;

    // F2: freeze the camera in place, or hand it back to tracking
    if keyboard.just_pressed(KeyCode::F2) {
        let camera = engine.camera();
        match camera.mode() {
            CameraMode::Tracking => {
                let (origin, zoom) = (camera.viewport().min, camera.zoom());
                engine.set_camera_manual(origin, zoom);
                info!("[DEBUG] Camera frozen at {:?}, zoom {:.2}", origin, zoom);
            }
            CameraMode::Manual => {
                engine.set_camera_mode(CameraMode::Tracking);
                info!("[DEBUG] Camera tracking");
            }
        }
    }

    // F4: fit the whole world on screen
    if keyboard.just_pressed(KeyCode::F4) {
        let world = engine.world_bounds();
        let zoom = engine.camera().fit_zoom(world);
        engine.set_camera_manual(world.min, zoom);
        info!("[DEBUG] World overview, zoom {:.2}", zoom);
    }
}

pub(crate) fn count_level_messages(
    mut messages: MessageReader<LevelMessage>,
    mut debug_state: ResMut<DebugState>,
) {
    for LevelMessage(event) in messages.read() {
        match event {
            LevelEvent::PlayerDied { .. } | LevelEvent::PlayerFellOut { .. } => {
                debug_state.deaths += 1;
                debug!("[DEBUG] Deaths this session: {}", debug_state.deaths);
            }
            LevelEvent::CheckpointReached { .. } => debug_state.checkpoints += 1,
            _ => {}
        }
    }
}

pub(crate) fn draw_hitboxes(mut gizmos: Gizmos, sim: Option<Res<Simulation>>) {
    let Some(sim) = sim else {
        return;
    };

    for platform in sim.engine.platforms() {
        outline(&mut gizmos, platform.world_rect(), PLATFORM_COLOR);
    }
    for player in sim.engine.players() {
        let color = if player.on_ground {
            GROUNDED_COLOR
        } else {
            HITBOX_COLOR
        };
        outline(&mut gizmos, player.world_rect(), color);
    }
    outline(&mut gizmos, sim.engine.camera().viewport(), VIEWPORT_COLOR);
}

pub(crate) fn draw_zones(mut gizmos: Gizmos, sim: Option<Res<Simulation>>) {
    let Some(sim) = sim else {
        return;
    };

    for ladder in sim.engine.ladders() {
        outline(&mut gizmos, ladder.world_rect(), LADDER_COLOR);
    }
    for player in sim.engine.players() {
        let color = if player.under_platform {
            HEAD_BLOCKED_COLOR
        } else {
            HEAD_ZONE_COLOR
        };
        outline(&mut gizmos, player.head_zone(), color);
    }
}
