//! Platforms domain: tests for the oscillator and ladder volumes.

use bevy::prelude::*;

use super::{DEFAULT_LADDER_WIDTH, Ladder, Platform, PlatformMotion, Reversal};

const DT: f32 = 1.0 / 64.0;

fn horizontal(range: f32, reversal: Reversal) -> Platform {
    Platform::moving(
        "mover",
        Vec2::ZERO,
        Vec2::new(100.0, 20.0),
        PlatformMotion {
            direction: Vec2::X,
            range: Vec2::new(range, 0.0),
            speed: 64.0,
            reversal,
        },
    )
}

// -----------------------------------------------------------------------------
// Construction
// -----------------------------------------------------------------------------

#[test]
fn test_fixed_platform_never_moves() {
    let mut platform = Platform::fixed("floor", Vec2::new(5.0, 6.0), Vec2::new(100.0, 20.0));
    for _ in 0..10 {
        platform.advance(DT);
    }

    assert!(!platform.is_moving);
    assert_eq!(platform.position, Vec2::new(5.0, 6.0));
    assert_eq!(platform.velocity, Vec2::ZERO);
    assert_eq!(platform.rect().max, Vec2::new(105.0, 26.0));
}

#[test]
fn test_direction_is_normalized() {
    let platform = Platform::moving(
        "diagonal",
        Vec2::ZERO,
        Vec2::splat(10.0),
        PlatformMotion {
            direction: Vec2::new(3.0, 4.0),
            range: Vec2::new(30.0, 40.0),
            speed: 10.0,
            reversal: Reversal::Distance,
        },
    );

    assert!(platform.is_moving);
    assert!((platform.direction - Vec2::new(0.6, 0.8)).length() < 1e-6);
}

#[test]
fn test_zero_range_is_static() {
    let mut platform = horizontal(0.0, Reversal::Distance);
    platform.advance(DT);

    assert!(!platform.is_moving);
    assert_eq!(platform.position, Vec2::ZERO);
    assert_eq!(platform.velocity, Vec2::ZERO);
}

#[test]
fn test_zero_direction_is_static() {
    let mut platform = Platform::moving(
        "stuck",
        Vec2::ZERO,
        Vec2::splat(10.0),
        PlatformMotion {
            direction: Vec2::ZERO,
            range: Vec2::new(50.0, 0.0),
            speed: 10.0,
            reversal: Reversal::Distance,
        },
    );
    platform.advance(DT);

    assert!(!platform.is_moving);
    assert!(platform.position.is_finite());
    assert_eq!(platform.position, Vec2::ZERO);
}

// -----------------------------------------------------------------------------
// Oscillation
// -----------------------------------------------------------------------------

#[test]
fn test_velocity_tracks_direction_and_speed() {
    let mut platform = horizontal(100.0, Reversal::Distance);
    platform.advance(DT);

    assert_eq!(platform.velocity, Vec2::new(64.0, 0.0));
    assert_eq!(platform.position, Vec2::new(1.0, 0.0));
}

#[test]
fn test_distance_reversal_stays_within_range() {
    let mut platform = horizontal(100.0, Reversal::Distance);
    let mut reversals = 0;
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;

    for _ in 0..1000 {
        let before = platform.direction;
        platform.advance(DT);
        if platform.direction != before {
            reversals += 1;
        }
        assert!(platform.distance_from_start() <= 100.0 + 1e-3);
        min_x = min_x.min(platform.position.x);
        max_x = max_x.max(platform.position.x);
    }

    assert!(reversals >= 3);
    assert_eq!(max_x, 100.0);
    assert_eq!(min_x, -100.0);
}

#[test]
fn test_bounded_reversal_turns_at_start() {
    let mut platform = horizontal(100.0, Reversal::Bounded);
    let mut min_x = f32::MAX;

    for _ in 0..1000 {
        platform.advance(DT);
        assert!(platform.distance_from_start() <= 100.0 + 1e-3);
        min_x = min_x.min(platform.position.x);
    }

    assert!(min_x >= 0.0);
}

#[test]
fn test_reset_restores_start_and_direction() {
    let mut platform = horizontal(10.0, Reversal::Distance);
    for _ in 0..15 {
        platform.advance(DT);
    }
    assert_eq!(platform.direction, -Vec2::X);

    platform.reset();
    assert_eq!(platform.position, Vec2::ZERO);
    assert_eq!(platform.direction, Vec2::X);
    assert_eq!(platform.velocity, Vec2::ZERO);
}

// -----------------------------------------------------------------------------
// Ladders
// -----------------------------------------------------------------------------

#[test]
fn test_ladder_default_width() {
    let ladder = Ladder::with_height(Vec2::new(10.0, 20.0), 200.0);

    assert_eq!(ladder.rect.min, Vec2::new(10.0, 20.0));
    assert_eq!(ladder.rect.max, Vec2::new(10.0 + DEFAULT_LADDER_WIDTH, 220.0));
}
