//! Movement domain: the player locomotion state machine.
//!
//! A tick runs in two halves around integration and collision resolution:
//! [`apply_controls`] turns input into velocity, then [`react_to_contacts`]
//! folds the resolver's findings back into the locomotion state.

mod components;
mod resources;
mod systems;


pub use components::{Facing, LocomotionState, Player};
pub use resources::{Action, InputSnapshot, MovementFeatures, MovementTuning, StuckSlidePolicy};
pub use systems::{ControlOutcome, SlideExit};

use bevy::prelude::*;

use crate::physics::Resolution;
use crate::platforms::Ladder;

pub fn apply_controls(player: &mut Player, input: &InputSnapshot, dt: f32) -> ControlOutcome {
    let cancelled_slide = systems::update_facing(player, input);
    let started_slide = systems::apply_slide_start(player, input);
    systems::apply_horizontal_movement(player, input, dt);
    systems::apply_ladder_climb(player, input);
    let jumped = systems::apply_jump(player, input);
    systems::apply_slide_velocity(player);

    ControlOutcome {
        jumped,
        started_slide,
        cancelled_slide,
    }
}

pub fn react_to_contacts<I>(
    player: &mut Player,
    resolution: &Resolution,
    ladders: &[Ladder],
    platforms: I,
) -> SlideExit
where
    I: IntoIterator<Item = Rect>,
{
    systems::apply_resolution(player, resolution);
    systems::detect_ladder(player, ladders);
    systems::detect_head_bump(player, platforms);
    systems::resolve_slide_exit(player)
}
