//! Movement domain: player state and locomotion bookkeeping.

use bevy::prelude::*;

use crate::movement::MovementTuning;
use crate::physics::{KinematicBody, rect_at};
use crate::platforms::PlatformId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Neutral,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Neutral => 0.0,
            Facing::Right => 1.0,
        }
    }

    pub fn from_axis(axis: f32) -> Self {
        if axis < 0.0 {
            Facing::Left
        } else if axis > 0.0 {
            Facing::Right
        } else {
            Facing::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionState {
    Grounded,
    Airborne,
    Sliding,
    OnLadder,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: usize,
    pub body: KinematicBody,
    pub tuning: MovementTuning,
    pub facing: Facing,
    pub on_ground: bool,
    /// Platform supporting the player this tick, set by collision resolution.
    pub on_platform: Option<PlatformId>,
    pub on_ladder: bool,
    pub under_platform: bool,
    pub is_sliding: bool,
    pub slide_direction: Facing,
    pub slide_start_x: f32,
    /// The slide ran its distance but there was no room to stand.
    pub slide_stuck: bool,
    pub can_jump: bool,
    pub can_slide: bool,
    /// Last safe position, used by reloads.
    pub respawn_point: Vec2,
}

impl Player {
    pub fn new(id: usize, spawn: Vec2, tuning: MovementTuning) -> Self {
        let size = Vec2::new(tuning.standing_width, tuning.standing_height);
        Self {
            id,
            body: KinematicBody::new(spawn, size),
            tuning,
            facing: Facing::Neutral,
            on_ground: false,
            on_platform: None,
            on_ladder: false,
            under_platform: false,
            is_sliding: false,
            slide_direction: Facing::Neutral,
            slide_start_x: spawn.x,
            slide_stuck: false,
            can_jump: true,
            can_slide: true,
            respawn_point: spawn,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn width(&self) -> f32 {
        self.body.width
    }

    pub fn height(&self) -> f32 {
        self.body.height
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn momentum(&self) -> Vec2 {
        self.body.velocity * self.tuning.mass
    }

    pub fn state(&self) -> LocomotionState {
        if self.on_ladder {
            LocomotionState::OnLadder
        } else if self.is_sliding {
            LocomotionState::Sliding
        } else if self.on_ground {
            LocomotionState::Grounded
        } else {
            LocomotionState::Airborne
        }
    }

    pub fn standing_size(&self) -> Vec2 {
        Vec2::new(self.tuning.standing_width, self.tuning.standing_height)
    }

    pub fn slide_size(&self) -> Vec2 {
        Vec2::new(self.tuning.slide_width, self.tuning.slide_height)
    }

    /// Space the player needs above the current hitbox to stand up, plus
    /// `head_clearance`. While standing this is a thin strip over the head.
    pub fn head_zone(&self) -> Rect {
        let top = self.body.bottom() - self.tuning.standing_height - self.tuning.head_clearance;
        let height = (self.body.position.y - top).max(self.tuning.head_clearance);
        rect_at(
            Vec2::new(self.body.position.x, self.body.position.y - height),
            Vec2::new(self.tuning.standing_width, height),
        )
    }

    pub fn slide_travelled(&self) -> f32 {
        (self.body.position.x - self.slide_start_x).abs()
    }

    pub(crate) fn start_slide(&mut self) {
        self.is_sliding = true;
        self.slide_direction = self.facing;
        self.slide_start_x = self.body.position.x;
        self.slide_stuck = false;
        let size = self.slide_size();
        self.body.resize_keep_feet(size);
    }

    pub(crate) fn stand_up(&mut self) {
        self.is_sliding = false;
        self.slide_direction = Facing::Neutral;
        self.slide_stuck = false;
        let size = self.standing_size();
        self.body.resize_keep_feet(size);
    }

    /// Put the player back at `position` with a clean locomotion state.
    pub fn reload(&mut self, position: Vec2) {
        self.body = KinematicBody::new(position, self.standing_size());
        self.on_ground = false;
        self.on_platform = None;
        self.on_ladder = false;
        self.under_platform = false;
        self.is_sliding = false;
        self.slide_direction = Facing::Neutral;
        self.slide_stuck = false;
        self.slide_start_x = position.x;
    }

    pub fn set_respawn_point(&mut self, position: Vec2) {
        self.respawn_point = position;
    }
}
