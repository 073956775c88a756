//! Movement domain: reactions to collision results, run after resolution.

use bevy::prelude::*;

use crate::movement::{Player, StuckSlidePolicy};
use crate::physics::{Resolution, any_overlap, overlaps};
use crate::platforms::Ladder;

/// How the slide bookkeeping ended up after contacts were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideExit {
    NotSliding,
    Continue,
    StoodUp,
    Stuck,
    ReloadRequested,
}

pub(crate) fn apply_resolution(player: &mut Player, resolution: &Resolution) {
    let was_on_ground = player.on_ground;

    player.body.position = resolution.position;
    player.body.velocity = resolution.velocity;
    player.on_ground = resolution.grounded;
    player.on_platform = if resolution.grounded {
        resolution.contact
    } else {
        None
    };

    if player.on_ground && !was_on_ground {
        debug!("Player {} landed on {:?}", player.id, player.on_platform);
    } else if !player.on_ground && was_on_ground {
        debug!("Player {} left ground", player.id);
    }
}

pub(crate) fn detect_ladder(player: &mut Player, ladders: &[Ladder]) {
    let rect = player.rect();
    let on_ladder = player.tuning.features.supports_ladders
        && ladders.iter().any(|ladder| overlaps(&rect, &ladder.rect));

    if on_ladder != player.on_ladder {
        debug!("Player {} on_ladder={}", player.id, on_ladder);
    }
    player.on_ladder = on_ladder;
}

pub(crate) fn detect_head_bump<I>(player: &mut Player, platforms: I)
where
    I: IntoIterator<Item = Rect>,
{
    let zone = player.head_zone();
    player.under_platform = any_overlap(&zone, platforms);
}

/// Standing up only happens on the ground and with room overhead.
pub(crate) fn resolve_slide_exit(player: &mut Player) -> SlideExit {
    if !player.is_sliding {
        return SlideExit::NotSliding;
    }
    if player.slide_travelled() < player.tuning.slide_distance && !player.slide_stuck {
        return SlideExit::Continue;
    }
    if !player.on_ground {
        return SlideExit::Continue;
    }

    if !player.under_platform {
        player.stand_up();
        player.body.velocity.x = 0.0;
        debug!("Player {} finished slide at x={:.1}", player.id, player.body.position.x);
        return SlideExit::StoodUp;
    }

    match player.tuning.stuck_slide {
        StuckSlidePolicy::ExtendSlide => {
            player.slide_stuck = true;
            SlideExit::Stuck
        }
        StuckSlidePolicy::ClampInPlace => {
            player.slide_stuck = true;
            player.body.velocity.x = 0.0;
            SlideExit::Stuck
        }
        StuckSlidePolicy::ForceReload => SlideExit::ReloadRequested,
    }
}
