//! Movement domain: tuning, feature flags and the per-tick input snapshot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StuckSlidePolicy {
    /// Keep sliding at slide speed until there is room to stand.
    #[default]
    ExtendSlide,
    /// Stop in place, still low, until there is room to stand.
    ClampInPlace,
    /// Send the player back to their respawn point.
    ForceReload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementFeatures {
    pub supports_ladders: bool,
    pub supports_sliding: bool,
}

impl Default for MovementFeatures {
    fn default() -> Self {
        Self {
            supports_ladders: true,
            supports_sliding: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub mass: f32,
    /// Max horizontal speed outside of a slide.
    pub speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub gravity: f32,
    pub jump_strength: f32,
    pub max_fall_speed: f32,
    /// Left/right still accelerate while airborne.
    pub air_control: bool,
    pub standing_width: f32,
    pub standing_height: f32,
    pub slide_width: f32,
    pub slide_height: f32,
    pub slide_distance: f32,
    pub slide_speed_multiplier: f32,
    pub climb_speed: f32,
    /// Height of the head-bump zone above the standing hitbox.
    pub head_clearance: f32,
    pub features: MovementFeatures,
    pub stuck_slide: StuckSlidePolicy,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            mass: 1.0,
            speed: 200.0,
            acceleration: 5000.0,
            deceleration: 10000.0,
            gravity: 3000.0,
            jump_strength: 600.0,
            max_fall_speed: 1200.0,
            air_control: true,
            standing_width: 32.0,
            standing_height: 64.0,
            slide_width: 64.0,
            slide_height: 32.0,
            slide_distance: 250.0,
            slide_speed_multiplier: 1.75,
            climb_speed: 150.0,
            head_clearance: 4.0,
            features: MovementFeatures::default(),
            stuck_slide: StuckSlidePolicy::default(),
        }
    }
}

impl MovementTuning {
    pub fn slide_speed(&self) -> f32 {
        self.speed * self.slide_speed_multiplier
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump_strength / self.mass
    }

    /// Apex height of a standing jump: h = v² / (2g)
    pub fn jump_height(&self) -> f32 {
        let v = self.jump_velocity();
        v * v / (2.0 * self.gravity)
    }
}

/// Abstract actions the locomotion state machine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Slide,
}

impl Action {
    pub const COUNT: usize = 6;

    pub const ALL: [Action; Action::COUNT] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Jump,
        Action::Slide,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Pressed state of every action for one player on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pressed: [bool; Action::COUNT],
}

impl InputSnapshot {
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        self.pressed[action.index()] = pressed;
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.pressed[action.index()]
    }

    /// -1 for left, +1 for right, 0 for neither or both.
    pub fn horizontal(&self) -> f32 {
        match (self.pressed(Action::Left), self.pressed(Action::Right)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Climb axis in world space (y-down): -1 for up, +1 for down.
    pub fn climb(&self) -> f32 {
        match (self.pressed(Action::Up), self.pressed(Action::Down)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
