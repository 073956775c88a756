//! Level domain: tests for platform roles and level scripting.

use bevy::prelude::*;

use super::{
    Artifact, Capability, LevelEvent, LevelScript, PlatformRole, resolve_spawn, stand_on,
};
use crate::movement::MovementTuning;
use crate::platforms::Platform;
use crate::simulation::{Engine, LevelLayout, SimulationContext};

const STANDING: Vec2 = Vec2::new(32.0, 64.0);

fn pad(name: &str, x: f32) -> Platform {
    Platform::fixed(name, Vec2::new(x, 500.0), Vec2::new(100.0, 20.0))
}

fn course() -> Vec<Platform> {
    vec![
        pad("starting-platform", 0.0),
        pad("checkpoint1", 200.0),
        pad("checkpoint2", 400.0),
        pad("death-spikes", 600.0),
        pad("finish-line", 800.0),
        pad("introduce-jumping", 1000.0),
        pad("introduce-sliding", 1200.0),
    ]
}

fn engine(players: usize) -> Engine {
    let platforms = course();
    let spawn = resolve_spawn(None, &platforms, STANDING).unwrap();
    let mut layout = LevelLayout::new(Vec2::new(1400.0, 700.0), spawn);
    layout.platforms = platforms;

    let ctx = SimulationContext {
        fixed_dt: 1.0 / 64.0,
        ..default()
    };
    Engine::new(ctx, layout, &MovementTuning::default(), players).unwrap()
}

/// Drop player `id` onto the named platform and run one step so it lands.
fn place_on(engine: &mut Engine, id: usize, name: &str) {
    let platform_id = engine.platform_id(name).unwrap();
    let point = stand_on(engine.platform(platform_id).unwrap(), STANDING);
    engine.reload_player(id, point);
    engine.step(&[]).unwrap();
    assert_eq!(engine.players()[id].on_platform, Some(platform_id));
}

// -----------------------------------------------------------------------------
// Roles and spawn
// -----------------------------------------------------------------------------

#[test]
fn test_roles_from_names() {
    assert_eq!(PlatformRole::from_name("starting-platform"), PlatformRole::Start);
    assert_eq!(PlatformRole::from_name("checkpoint12"), PlatformRole::Checkpoint(12));
    assert_eq!(PlatformRole::from_name("checkpointX"), PlatformRole::Plain);
    assert_eq!(PlatformRole::from_name("death-form3"), PlatformRole::DeathZone);
    assert_eq!(PlatformRole::from_name("finish-line"), PlatformRole::FinishLine);
    assert_eq!(
        PlatformRole::from_name("introduce-sliding"),
        PlatformRole::Unlock(Capability::Slide)
    );
    assert_eq!(PlatformRole::from_name("floor"), PlatformRole::Plain);
}

#[test]
fn test_spawn_resolution() {
    let platforms = course();

    assert_eq!(resolve_spawn(None, &platforms, STANDING), Some(Vec2::new(34.0, 436.0)));
    assert_eq!(
        resolve_spawn(Some(Vec2::new(5.0, 5.0)), &platforms, STANDING),
        Some(Vec2::new(5.0, 5.0))
    );
    assert_eq!(resolve_spawn(None, &platforms[1..], STANDING), None);
}

// -----------------------------------------------------------------------------
// Checkpoints
// -----------------------------------------------------------------------------

#[test]
fn test_checkpoints_are_reached_in_order() {
    let mut engine = engine(2);
    let mut script = LevelScript::new(&engine, false);
    script.begin(&mut engine);
    assert_eq!(script.next_checkpoint(), Some(1));

    place_on(&mut engine, 0, "checkpoint2");
    assert!(script.evaluate(&mut engine).is_empty());

    place_on(&mut engine, 0, "checkpoint1");
    let events = script.evaluate(&mut engine);
    assert_eq!(
        events,
        vec![LevelEvent::CheckpointReached {
            player: 0,
            checkpoint: 1
        }]
    );
    let expected = Vec2::new(234.0, 436.0);
    for player in engine.players() {
        assert_eq!(player.respawn_point, expected);
    }
    assert_eq!(script.next_checkpoint(), Some(2));

    place_on(&mut engine, 1, "checkpoint2");
    let events = script.evaluate(&mut engine);
    assert!(events.contains(&LevelEvent::CheckpointReached {
        player: 1,
        checkpoint: 2
    }));
    assert_eq!(script.next_checkpoint(), None);
}

// -----------------------------------------------------------------------------
// Hazards and goals
// -----------------------------------------------------------------------------

#[test]
fn test_death_zone_reloads_at_respawn() {
    let mut engine = engine(1);
    let mut script = LevelScript::new(&engine, false);
    place_on(&mut engine, 0, "checkpoint1");
    script.evaluate(&mut engine);

    place_on(&mut engine, 0, "death-spikes");
    let events = script.evaluate(&mut engine);

    assert_eq!(events, vec![LevelEvent::PlayerDied { player: 0 }]);
    assert_eq!(engine.players()[0].position(), Vec2::new(234.0, 436.0));
    assert_eq!(engine.players()[0].on_platform, None);
}

#[test]
fn test_falling_out_reloads() {
    let mut engine = engine(1);
    let mut script = LevelScript::new(&engine, false);
    engine.reload_player(0, Vec2::new(100.0, 801.0));

    let events = script.evaluate(&mut engine);

    assert_eq!(events, vec![LevelEvent::PlayerFellOut { player: 0 }]);
    assert_eq!(engine.players()[0].position(), engine.spawn());
}

#[test]
fn test_finish_line_fires_once() {
    let mut engine = engine(1);
    let mut script = LevelScript::new(&engine, false);

    place_on(&mut engine, 0, "finish-line");
    assert_eq!(
        script.evaluate(&mut engine),
        vec![LevelEvent::LevelFinished { player: 0 }]
    );

    engine.step(&[]).unwrap();
    assert!(script.evaluate(&mut engine).is_empty());
    assert!(script.finished());
}

// -----------------------------------------------------------------------------
// Artifacts and the run timer
// -----------------------------------------------------------------------------

fn idol_over_checkpoint1() -> Vec<Artifact> {
    vec![Artifact::new("Golden Idol", Vec2::new(220.0, 440.0))]
}

#[test]
fn test_artifact_collected_once() {
    let mut engine = engine(2);
    let mut script = LevelScript::new(&engine, false).with_artifacts(idol_over_checkpoint1());

    place_on(&mut engine, 0, "checkpoint1");
    place_on(&mut engine, 1, "checkpoint1");
    let events = script.evaluate(&mut engine);

    let collected: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, LevelEvent::ArtifactCollected { .. }))
        .collect();
    assert_eq!(
        collected,
        vec![&LevelEvent::ArtifactCollected {
            player: 0,
            name: "Golden Idol".to_string()
        }]
    );
    assert_eq!(script.collected_count(), 1);

    engine.step(&[]).unwrap();
    assert!(script.evaluate(&mut engine).is_empty());
    assert_eq!(script.collected_count(), 1);
}

#[test]
fn test_artifact_out_of_reach_stays() {
    let mut engine = engine(1);
    let mut script = LevelScript::new(&engine, false).with_artifacts(idol_over_checkpoint1());

    place_on(&mut engine, 0, "checkpoint2");
    script.evaluate(&mut engine);

    assert_eq!(script.collected_count(), 0);
    assert!(!script.artifacts()[0].collected);
}

#[test]
fn test_timer_runs_until_finish() {
    let mut engine = engine(1);
    let mut script = LevelScript::new(&engine, false);

    script.advance_timer(0.5);
    script.advance_timer(0.25);
    script.advance_timer(-1.0);
    script.advance_timer(f32::NAN);
    assert_eq!(script.elapsed(), 0.75);

    place_on(&mut engine, 0, "finish-line");
    script.evaluate(&mut engine);
    script.advance_timer(10.0);

    assert!(script.finished());
    assert_eq!(script.elapsed(), 0.75);
}

#[test]
fn test_timer_display() {
    let engine = engine(1);
    let mut script = LevelScript::new(&engine, false);
    assert_eq!(script.elapsed_display(), "00:00:00");

    script.advance_timer(61.25);
    assert_eq!(script.elapsed_display(), "01:01:25");
}

// -----------------------------------------------------------------------------
// Tutorial gates, reload and restart
// -----------------------------------------------------------------------------

#[test]
fn test_tutorial_unlocks_capabilities_for_everyone() {
    let mut engine = engine(2);
    let mut script = LevelScript::new(&engine, true);
    script.begin(&mut engine);
    assert!(engine.players().iter().all(|p| !p.can_jump && !p.can_slide));

    place_on(&mut engine, 1, "introduce-jumping");
    let events = script.evaluate(&mut engine);

    assert_eq!(
        events,
        vec![LevelEvent::CapabilityUnlocked {
            capability: Capability::Jump
        }]
    );
    assert!(engine.players().iter().all(|p| p.can_jump && !p.can_slide));
    assert_eq!(script.capabilities(), (true, false));

    engine.step(&[]).unwrap();
    assert!(script.evaluate(&mut engine).is_empty());
}

#[test]
fn test_non_tutorial_starts_unlocked() {
    let mut engine = engine(1);
    let script = LevelScript::new(&engine, false);
    script.begin(&mut engine);

    assert!(engine.players()[0].can_jump);
    assert!(engine.players()[0].can_slide);
}

#[test]
fn test_restart_resets_progress() {
    let mut engine = engine(2);
    let mut script = LevelScript::new(&engine, true);
    script.begin(&mut engine);

    place_on(&mut engine, 0, "introduce-sliding");
    place_on(&mut engine, 1, "checkpoint1");
    script.evaluate(&mut engine);
    place_on(&mut engine, 0, "finish-line");
    script.evaluate(&mut engine);
    assert!(script.finished());

    script.restart(&mut engine);

    assert!(!script.finished());
    assert_eq!(script.next_checkpoint(), Some(1));
    assert_eq!(script.capabilities(), (false, false));
    for player in engine.players() {
        assert_eq!(player.position(), engine.spawn());
        assert_eq!(player.respawn_point, engine.spawn());
        assert!(!player.can_slide);
    }
}

#[test]
fn test_reload_keeps_checkpoint_progress() {
    let mut engine = engine(2);
    let mut script = LevelScript::new(&engine, false).with_artifacts(idol_over_checkpoint1());
    script.advance_timer(3.0);

    place_on(&mut engine, 0, "checkpoint1");
    script.evaluate(&mut engine);
    assert_eq!(script.collected_count(), 1);
    engine.reload_player(0, Vec2::new(900.0, 100.0));
    engine.reload_player(1, Vec2::new(1100.0, 100.0));

    script.reload(&mut engine);

    let checkpoint1 = Vec2::new(234.0, 436.0);
    for player in engine.players() {
        assert_eq!(player.position(), checkpoint1);
        assert_eq!(player.respawn_point, checkpoint1);
    }
    assert_eq!(script.next_checkpoint(), Some(2));
    assert_eq!(script.collected_count(), 0);
    assert_eq!(script.elapsed(), 3.0);
}

#[test]
fn test_reload_before_checkpoint_resets_timer() {
    let mut engine = engine(1);
    let mut script = LevelScript::new(&engine, false);
    script.advance_timer(3.0);
    place_on(&mut engine, 0, "finish-line");
    script.evaluate(&mut engine);

    script.reload(&mut engine);

    assert!(!script.finished());
    assert_eq!(script.elapsed(), 0.0);
    assert_eq!(engine.players()[0].position(), engine.spawn());
}

#[test]
fn test_restart_clears_artifacts_and_timer() {
    let mut engine = engine(1);
    let mut script = LevelScript::new(&engine, false).with_artifacts(idol_over_checkpoint1());
    script.advance_timer(5.0);
    place_on(&mut engine, 0, "checkpoint1");
    script.evaluate(&mut engine);

    script.restart(&mut engine);

    assert_eq!(script.collected_count(), 0);
    assert_eq!(script.elapsed(), 0.0);
    assert_eq!(script.next_checkpoint(), Some(1));
    assert_eq!(engine.players()[0].position(), Vec2::new(34.0, 436.0));
}
