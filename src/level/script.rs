//! Level domain: reacting to where players stand.

use bevy::prelude::*;

use crate::level::Artifact;
use crate::physics::overlaps;
use crate::platforms::{Platform, PlatformId};
use crate::simulation::Engine;

pub const STARTING_PLATFORM: &str = "starting-platform";
pub const FINISH_LINE: &str = "finish-line";
pub const CHECKPOINT_PREFIX: &str = "checkpoint";
pub const DEATH_PREFIX: &str = "death";
pub const INTRODUCE_JUMPING: &str = "introduce-jumping";
pub const INTRODUCE_SLIDING: &str = "introduce-sliding";

/// How far below the world a player may fall before being reloaded.
pub const FALL_MARGIN: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Jump,
    Slide,
}

/// Meaning of a platform, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformRole {
    Start,
    Checkpoint(u32),
    DeathZone,
    FinishLine,
    Unlock(Capability),
    Plain,
}

impl PlatformRole {
    pub fn from_name(name: &str) -> Self {
        match name {
            STARTING_PLATFORM => Self::Start,
            FINISH_LINE => Self::FinishLine,
            INTRODUCE_JUMPING => Self::Unlock(Capability::Jump),
            INTRODUCE_SLIDING => Self::Unlock(Capability::Slide),
            _ => {
                if let Some(number) = name.strip_prefix(CHECKPOINT_PREFIX) {
                    number.parse().map_or(Self::Plain, Self::Checkpoint)
                } else if name.starts_with(DEATH_PREFIX) {
                    Self::DeathZone
                } else {
                    Self::Plain
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelEvent {
    CheckpointReached { player: usize, checkpoint: u32 },
    PlayerDied { player: usize },
    PlayerFellOut { player: usize },
    LevelFinished { player: usize },
    CapabilityUnlocked { capability: Capability },
    ArtifactCollected { player: usize, name: String },
}

/// Where a standing hitbox of `standing` size sits centred on top of `platform`.
pub fn stand_on(platform: &Platform, standing: Vec2) -> Vec2 {
    Vec2::new(
        platform.position.x + (platform.size.x - standing.x) / 2.0,
        platform.position.y - standing.y,
    )
}

/// Explicit spawn if given, else on top of the starting platform.
pub fn resolve_spawn(explicit: Option<Vec2>, platforms: &[Platform], standing: Vec2) -> Option<Vec2> {
    explicit.or_else(|| {
        platforms
            .iter()
            .find(|platform| platform.name == STARTING_PLATFORM)
            .map(|platform| stand_on(platform, standing))
    })
}

#[derive(Debug, Clone)]
pub struct LevelScript {
    roles: Vec<PlatformRole>,
    /// Checkpoint platforms in the order they must be reached.
    checkpoints: Vec<(u32, PlatformId)>,
    next_checkpoint: usize,
    tutorial: bool,
    can_jump: bool,
    can_slide: bool,
    finished: bool,
    artifacts: Vec<Artifact>,
    /// Seconds of frame time since the run started, frozen at the finish.
    elapsed: f32,
}

impl LevelScript {
    pub fn new(engine: &Engine, tutorial: bool) -> Self {
        let roles: Vec<PlatformRole> = engine
            .platforms()
            .iter()
            .map(|platform| PlatformRole::from_name(&platform.name))
            .collect();

        let mut checkpoints: Vec<(u32, PlatformId)> = roles
            .iter()
            .enumerate()
            .filter_map(|(i, role)| match role {
                PlatformRole::Checkpoint(n) => Some((*n, PlatformId(i))),
                _ => None,
            })
            .collect();
        checkpoints.sort();

        Self {
            roles,
            checkpoints,
            next_checkpoint: 0,
            tutorial,
            can_jump: !tutorial,
            can_slide: !tutorial,
            finished: false,
            artifacts: Vec::new(),
            elapsed: 0.0,
        }
    }

    pub fn with_artifacts(mut self, artifacts: Vec<Artifact>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Push the current capability gates onto every player.
    pub fn begin(&self, engine: &mut Engine) {
        for id in 0..engine.players().len() {
            engine.set_capabilities(id, self.can_jump, self.can_slide);
        }
        debug!(
            "Level script started: {} checkpoints, tutorial={}",
            self.checkpoints.len(),
            self.tutorial
        );
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn capabilities(&self) -> (bool, bool) {
        (self.can_jump, self.can_slide)
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn collected_count(&self) -> usize {
        self.artifacts.iter().filter(|a| a.collected).count()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Run time as `MM:SS:CC`.
    pub fn elapsed_display(&self) -> String {
        let centis = (self.elapsed.max(0.0) * 100.0) as u64;
        format!(
            "{:02}:{:02}:{:02}",
            centis / 6000,
            centis / 100 % 60,
            centis % 100
        )
    }

    /// Advance the run timer by one host frame. Stops once finished.
    pub fn advance_timer(&mut self, frame_dt: f32) {
        if !self.finished && frame_dt.is_finite() && frame_dt > 0.0 {
            self.elapsed += frame_dt;
        }
    }

    /// Number of the next checkpoint to reach, if any remain.
    pub fn next_checkpoint(&self) -> Option<u32> {
        self.checkpoints.get(self.next_checkpoint).map(|(n, _)| *n)
    }

    /// Inspect every player after a tick and apply zone effects.
    pub fn evaluate(&mut self, engine: &mut Engine) -> Vec<LevelEvent> {
        let mut events = Vec::new();
        let fall_limit = engine.world_bounds().max.y + FALL_MARGIN;

        for id in 0..engine.players().len() {
            let Some(player) = engine.player(id) else {
                continue;
            };
            let (respawn, standing, rect, contact) = (
                player.respawn_point,
                player.standing_size(),
                player.rect(),
                player.on_platform,
            );

            if rect.min.y > fall_limit {
                info!("Player {} fell out of the level", id);
                engine.reload_player(id, respawn);
                events.push(LevelEvent::PlayerFellOut { player: id });
                continue;
            }

            for artifact in &mut self.artifacts {
                if !artifact.collected && overlaps(&rect, &artifact.rect) {
                    artifact.collect();
                    info!("Player {} collected {}", id, artifact.name);
                    events.push(LevelEvent::ArtifactCollected {
                        player: id,
                        name: artifact.name.clone(),
                    });
                }
            }

            let Some(platform_id) = contact else {
                continue;
            };
            let role = self
                .roles
                .get(platform_id.0)
                .copied()
                .unwrap_or(PlatformRole::Plain);

            match role {
                PlatformRole::Checkpoint(number) => {
                    if self.checkpoints.get(self.next_checkpoint) != Some(&(number, platform_id)) {
                        continue;
                    }
                    let Some(platform) = engine.platform(platform_id) else {
                        continue;
                    };
                    let point = stand_on(platform, standing);
                    for other in 0..engine.players().len() {
                        engine.set_respawn_point(other, point);
                    }
                    self.next_checkpoint += 1;
                    info!("Player {} reached checkpoint {}", id, number);
                    events.push(LevelEvent::CheckpointReached {
                        player: id,
                        checkpoint: number,
                    });
                }
                PlatformRole::DeathZone => {
                    info!("Player {} died", id);
                    engine.reload_player(id, respawn);
                    events.push(LevelEvent::PlayerDied { player: id });
                }
                PlatformRole::FinishLine => {
                    if !self.finished {
                        self.finished = true;
                        info!(
                            "Player {} reached the finish line in {}",
                            id,
                            self.elapsed_display()
                        );
                        events.push(LevelEvent::LevelFinished { player: id });
                    }
                }
                PlatformRole::Unlock(capability) => {
                    if self.unlock(capability) {
                        self.begin(engine);
                        info!("Unlocked {:?}", capability);
                        events.push(LevelEvent::CapabilityUnlocked { capability });
                    }
                }
                PlatformRole::Start | PlatformRole::Plain => {}
            }
        }

        events
    }

    fn unlock(&mut self, capability: Capability) -> bool {
        let gate = match capability {
            Capability::Jump => &mut self.can_jump,
            Capability::Slide => &mut self.can_slide,
        };
        let changed = !*gate;
        *gate = true;
        changed
    }

    /// Reset platforms and artifacts and send every player back to their
    /// respawn point. Checkpoint progress and unlocks are kept; the timer
    /// only restarts if no checkpoint has been reached.
    pub fn reload(&mut self, engine: &mut Engine) {
        engine.reset_platforms();
        for id in 0..engine.players().len() {
            if let Some(respawn) = engine.player(id).map(|p| p.respawn_point) {
                engine.reload_player(id, respawn);
            }
        }
        self.reset_artifacts();
        self.finished = false;
        if self.next_checkpoint == 0 {
            self.elapsed = 0.0;
        }
        info!("Level reloaded at checkpoint progress {}", self.next_checkpoint);
    }

    fn reset_artifacts(&mut self) {
        for artifact in &mut self.artifacts {
            artifact.reset();
        }
    }

    /// Back to the level's initial state.
    pub fn restart(&mut self, engine: &mut Engine) {
        engine.reset_level();
        self.next_checkpoint = 0;
        self.finished = false;
        self.elapsed = 0.0;
        self.reset_artifacts();
        self.can_jump = !self.tutorial;
        self.can_slide = !self.tutorial;
        self.begin(engine);
        info!("Level restarted");
    }
}
