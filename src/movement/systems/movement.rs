//! Movement domain: input-driven velocity changes, run before integration.

use bevy::prelude::*;

use crate::movement::{Action, Facing, InputSnapshot, Player, StuckSlidePolicy};

/// What the control phase changed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlOutcome {
    pub jumped: bool,
    pub started_slide: bool,
    pub cancelled_slide: bool,
}

pub(crate) fn update_facing(player: &mut Player, input: &InputSnapshot) -> bool {
    let axis = input.horizontal();
    if axis == 0.0 {
        return false;
    }
    player.facing = Facing::from_axis(axis);

    // Reversing out of a slide stands the player up, room permitting.
    if player.is_sliding && player.facing != player.slide_direction && !player.under_platform {
        player.stand_up();
        debug!("Player {} cancelled slide", player.id);
        return true;
    }
    false
}

pub(crate) fn apply_horizontal_movement(player: &mut Player, input: &InputSnapshot, dt: f32) {
    // The slide owns horizontal velocity.
    if player.is_sliding {
        return;
    }

    let tuning = &player.tuning;
    let supported = player.on_ground || player.on_ladder;
    let axis = input.horizontal();
    let velocity = &mut player.body.velocity;

    if axis != 0.0 {
        if supported || tuning.air_control {
            velocity.x += axis * tuning.acceleration * dt;
        }
    } else if supported {
        // Airborne horizontal velocity is never damped.
        let decel = tuning.deceleration * dt;
        if velocity.x > 0.0 {
            velocity.x = (velocity.x - decel).max(0.0);
        } else {
            velocity.x = (velocity.x + decel).min(0.0);
        }
    }

    velocity.x = velocity.x.clamp(-tuning.speed, tuning.speed);
}

pub(crate) fn apply_slide_start(player: &mut Player, input: &InputSnapshot) -> bool {
    let allowed = player.tuning.features.supports_sliding
        && player.can_slide
        && player.on_ground
        && !player.is_sliding
        && player.facing != Facing::Neutral;

    if !allowed || !input.pressed(Action::Slide) {
        return false;
    }

    player.start_slide();
    debug!(
        "Player {} started slide at x={:.1} facing {:?}",
        player.id, player.slide_start_x, player.slide_direction
    );
    true
}

pub(crate) fn apply_jump(player: &mut Player, input: &InputSnapshot) -> bool {
    // Up climbs instead while on a ladder.
    if !input.pressed(Action::Jump) || !player.can_jump || !player.on_ground || player.on_ladder {
        return false;
    }

    player.body.velocity.y = -player.tuning.jump_velocity();
    player.on_ground = false;
    player.on_platform = None;
    debug!("Player {} jumped, sliding={}", player.id, player.is_sliding);
    true
}

pub(crate) fn apply_ladder_climb(player: &mut Player, input: &InputSnapshot) {
    if player.on_ladder {
        player.body.velocity.y = input.climb() * player.tuning.climb_speed;
    }
}

/// Override (not accelerate) horizontal velocity while the slide is running.
pub(crate) fn apply_slide_velocity(player: &mut Player) {
    if !player.is_sliding {
        return;
    }

    let extended =
        player.slide_stuck && player.tuning.stuck_slide == StuckSlidePolicy::ExtendSlide;
    if player.slide_travelled() < player.tuning.slide_distance || extended {
        player.body.velocity.x = player.slide_direction.sign() * player.tuning.slide_speed();
    }
}
