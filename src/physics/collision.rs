//! Physics domain: separating a moving body from platform rectangles.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::body::{overlaps, rect_at};
use crate::platforms::PlatformId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// A body resting this close above a platform top still counts as landed.
    pub ground_skin: f32,
    /// How far a rising body may already reach into a platform's underside
    /// and still be stopped by it.
    pub ceiling_tolerance: f32,
    /// Penetration tolerated by overlap checks on resolved state.
    pub overlap_epsilon: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            ground_skin: 2.0,
            ceiling_tolerance: 12.0,
            overlap_epsilon: 0.01,
        }
    }
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
    pub contact: Option<PlatformId>,
}

/// Resolve `body` against every platform in iteration order.
///
/// Each overlap is separated along the axis of least penetration, with ties
/// going to the vertical axis. The body rectangle is rebuilt after every
/// correction, so later platforms see the corrected position. `grounded`
/// starts false and is only set by a landing during this pass.
pub fn resolve<I>(body: Rect, velocity: Vec2, platforms: I, config: &CollisionConfig) -> Resolution
where
    I: IntoIterator<Item = (PlatformId, Rect)>,
{
    let size = body.size();
    let mut resolution = Resolution {
        position: body.min,
        velocity,
        grounded: false,
        contact: None,
    };

    for (id, platform) in platforms {
        let rect = rect_at(resolution.position, size);

        if overlaps(&rect, &platform) {
            let overlap_x = (rect.max.x - platform.min.x).min(platform.max.x - rect.min.x);
            let overlap_y = (rect.max.y - platform.min.y).min(platform.max.y - rect.min.y);

            if overlap_x < overlap_y {
                // Push out on the side the body came from.
                if rect.center().x < platform.center().x {
                    resolution.position.x = platform.min.x - size.x;
                } else {
                    resolution.position.x = platform.max.x;
                }
                resolution.velocity.x = 0.0;
            } else {
                let falling = resolution.velocity.y > 0.0
                    || (resolution.velocity.y == 0.0 && rect.center().y < platform.center().y);

                if falling {
                    land(&mut resolution, id, &platform, size);
                } else if platform.max.y - rect.min.y <= config.ceiling_tolerance {
                    // Head hit the underside on the way up.
                    resolution.position.y = platform.max.y;
                    resolution.velocity.y = 0.0;
                }
            }
        } else if resting_on(&rect, &platform, resolution.velocity, config.ground_skin) {
            land(&mut resolution, id, &platform, size);
        }
    }

    resolution
}

fn land(resolution: &mut Resolution, id: PlatformId, platform: &Rect, size: Vec2) {
    resolution.position.y = platform.min.y - size.y;
    resolution.velocity.y = 0.0;
    resolution.grounded = true;
    resolution.contact = Some(id);
}

fn resting_on(rect: &Rect, platform: &Rect, velocity: Vec2, skin: f32) -> bool {
    let gap = platform.min.y - rect.max.y;
    velocity.y >= 0.0
        && (0.0..=skin).contains(&gap)
        && rect.min.x < platform.max.x
        && rect.max.x > platform.min.x
}

/// Push `body` out of overlapping platforms along x only and return the new
/// left edge. Used after a hitbox grows sideways.
pub fn separate_horizontally<I>(body: Rect, platforms: I) -> f32
where
    I: IntoIterator<Item = Rect>,
{
    let size = body.size();
    let mut x = body.min.x;

    for platform in platforms {
        let rect = rect_at(Vec2::new(x, body.min.y), size);
        if !overlaps(&rect, &platform) {
            continue;
        }
        x = if rect.center().x < platform.center().x {
            platform.min.x - size.x
        } else {
            platform.max.x
        };
    }

    x
}

pub fn any_overlap<I>(zone: &Rect, platforms: I) -> bool
where
    I: IntoIterator<Item = Rect>,
{
    platforms.into_iter().any(|platform| overlaps(zone, &platform))
}
