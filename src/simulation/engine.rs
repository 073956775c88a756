//! Simulation domain: the fixed-timestep engine.
//!
//! The host calls [`Engine::tick`] once per rendered frame with the elapsed
//! time. The engine drains its accumulator in fixed steps; each step either
//! completes or is rolled back to the previous valid state.

use bevy::prelude::*;
use thiserror::Error;

use crate::camera::{CameraMode, CameraTracker};
use crate::movement::{self, InputSnapshot, MovementTuning, Player, SlideExit};
use crate::physics::{resolve, separate_horizontally};
use crate::platforms::{Ladder, Platform, PlatformId};
use crate::simulation::{LevelLayout, SimulationContext};

pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("Invalid fixed timestep: {0}")]
    InvalidTimestep(f32),

    #[error("Player count must be between 1 and {max}, got {0}", max = MAX_PLAYERS)]
    PlayerCount(usize),

    #[error("Player {player} reached an invalid state: position={position}, velocity={velocity}, size={size}")]
    InvalidPlayer {
        player: usize,
        position: Vec2,
        velocity: Vec2,
        size: Vec2,
    },

    #[error("Platform '{name}' reached an invalid position {position}")]
    InvalidPlatform { name: String, position: Vec2 },
}

/// What one call to [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub steps: u32,
    pub rolled_back: u32,
    /// Seconds of simulation time discarded because the step cap was hit.
    pub dropped_backlog: f32,
    /// Leftover accumulator as a fraction of a step, for interpolation.
    pub alpha: f32,
}

struct Snapshot {
    players: Vec<Player>,
    platforms: Vec<Platform>,
    camera: CameraTracker,
}

#[derive(Debug, Clone)]
pub struct Engine {
    ctx: SimulationContext,
    players: Vec<Player>,
    platforms: Vec<Platform>,
    ladders: Vec<Ladder>,
    spawn: Vec2,
    world_bounds: Rect,
    camera: CameraTracker,
    accumulator: f32,
    ticks: u64,
}

impl Engine {
    pub fn new(
        ctx: SimulationContext,
        layout: LevelLayout,
        tuning: &MovementTuning,
        player_count: usize,
    ) -> Result<Self, SimulationError> {
        if !ctx.fixed_dt.is_finite() || ctx.fixed_dt <= 0.0 {
            return Err(SimulationError::InvalidTimestep(ctx.fixed_dt));
        }
        if player_count == 0 || player_count > MAX_PLAYERS {
            return Err(SimulationError::PlayerCount(player_count));
        }

        let players = (0..player_count)
            .map(|id| Player::new(id, layout.spawn, tuning.clone()))
            .collect();
        let camera = CameraTracker::new(ctx.camera, ctx.window, layout.world_bounds);

        info!(
            "Simulation ready: {} platforms, {} ladders, {} players, dt={:.4}",
            layout.platforms.len(),
            layout.ladders.len(),
            player_count,
            ctx.fixed_dt
        );

        Ok(Self {
            ctx,
            players,
            platforms: layout.platforms,
            ladders: layout.ladders,
            spawn: layout.spawn,
            world_bounds: layout.world_bounds,
            camera,
            accumulator: 0.0,
            ticks: 0,
        })
    }

    // ---------------------------------------------------------------------
    // Loop
    // ---------------------------------------------------------------------

    /// Advance by one rendered frame. `inputs` is indexed by player id;
    /// missing entries count as no input.
    pub fn tick(&mut self, frame_dt: f32, inputs: &[InputSnapshot]) -> TickReport {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.ctx.max_frame_delta)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut report = TickReport::default();
        let max_steps = self.ctx.max_steps_per_frame.max(1);

        while self.accumulator >= self.ctx.fixed_dt && report.steps < max_steps {
            self.accumulator -= self.ctx.fixed_dt;
            report.steps += 1;
            if let Err(err) = self.step(inputs) {
                warn!("Rolled back simulation step {}: {}", self.ticks, err);
                report.rolled_back += 1;
            }
        }

        if self.accumulator >= self.ctx.fixed_dt {
            report.dropped_backlog = self.accumulator;
            self.accumulator = 0.0;
            debug!(
                "Dropped {:.3}s of simulation backlog after {} steps",
                report.dropped_backlog, report.steps
            );
        }

        report.alpha = self.accumulator / self.ctx.fixed_dt;
        report
    }

    /// Run exactly one fixed step. On failure the state before the step is
    /// restored and the error returned.
    pub fn step(&mut self, inputs: &[InputSnapshot]) -> Result<(), SimulationError> {
        let snapshot = Snapshot {
            players: self.players.clone(),
            platforms: self.platforms.clone(),
            camera: self.camera.clone(),
        };

        match self.advance(inputs) {
            Ok(()) => {
                self.ticks += 1;
                Ok(())
            }
            Err(err) => {
                self.players = snapshot.players;
                self.platforms = snapshot.platforms;
                self.camera = snapshot.camera;
                Err(err)
            }
        }
    }

    fn advance(&mut self, inputs: &[InputSnapshot]) -> Result<(), SimulationError> {
        let dt = self.ctx.fixed_dt;
        let Self {
            ctx,
            players,
            platforms,
            ladders,
            camera,
            ..
        } = self;

        for platform in platforms.iter_mut() {
            platform.advance(dt);
            if !platform.position.is_finite() {
                return Err(SimulationError::InvalidPlatform {
                    name: platform.name.clone(),
                    position: platform.position,
                });
            }
        }

        for player in players.iter_mut() {
            let input = inputs.get(player.id).copied().unwrap_or_default();
            let outcome = movement::apply_controls(player, &input, dt);

            if outcome.started_slide {
                // The wider hitbox may now poke into a wall.
                player.body.position.x =
                    separate_horizontally(player.rect(), platforms.iter().map(Platform::rect));
            }

            // Ride before own motion so the carry is additive.
            if let Some(carrier) = player.on_platform.and_then(|id| platforms.get(id.0))
                && carrier.is_moving
            {
                player.body.position.x += carrier.velocity.x * dt;
            }

            let airborne = !player.on_ground && !player.on_ladder;
            player
                .body
                .integrate(dt, player.tuning.gravity, airborne, player.tuning.max_fall_speed);

            let resolution = resolve(
                player.rect(),
                player.velocity(),
                platforms
                    .iter()
                    .enumerate()
                    .map(|(i, platform)| (PlatformId(i), platform.rect())),
                &ctx.collision,
            );
            let exit = movement::react_to_contacts(
                player,
                &resolution,
                ladders,
                platforms.iter().map(Platform::rect),
            );

            if exit == SlideExit::ReloadRequested {
                let respawn = player.respawn_point;
                info!(
                    "Player {} stuck sliding under a platform, reloading at {}",
                    player.id, respawn
                );
                player.reload(respawn);
            }

            if !player.body.is_valid() {
                return Err(SimulationError::InvalidPlayer {
                    player: player.id,
                    position: player.body.position,
                    velocity: player.body.velocity,
                    size: player.body.size(),
                });
            }
        }

        camera.track(players.iter(), dt);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------------

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: usize) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id.0)
    }

    pub fn platform_id(&self, name: &str) -> Option<PlatformId> {
        self.platforms
            .iter()
            .position(|platform| platform.name == name)
            .map(PlatformId)
    }

    pub fn ladders(&self) -> &[Ladder] {
        &self.ladders
    }

    pub fn camera(&self) -> &CameraTracker {
        &self.camera
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn world_bounds(&self) -> Rect {
        self.world_bounds
    }

    /// Completed fixed steps since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    // ---------------------------------------------------------------------
    // Mutators for level scripting, valid between ticks only
    // ---------------------------------------------------------------------

    pub fn reload_player(&mut self, id: usize, position: Vec2) {
        if let Some(player) = self.players.get_mut(id) {
            info!("Reloading player {} at {}", id, position);
            player.reload(position);
        }
    }

    pub fn set_respawn_point(&mut self, id: usize, position: Vec2) {
        if let Some(player) = self.players.get_mut(id) {
            player.set_respawn_point(position);
        }
    }

    pub fn set_capabilities(&mut self, id: usize, can_jump: bool, can_slide: bool) {
        if let Some(player) = self.players.get_mut(id) {
            player.can_jump = can_jump;
            player.can_slide = can_slide;
        }
    }

    pub fn reset_platforms(&mut self) {
        for platform in &mut self.platforms {
            platform.reset();
        }
    }

    /// Every body back to its spawn state. Capabilities are left alone.
    pub fn reset_level(&mut self) {
        self.reset_platforms();
        let spawn = self.spawn;
        for player in &mut self.players {
            player.reload(spawn);
            player.set_respawn_point(spawn);
        }
        self.accumulator = 0.0;
        info!("Level reset, {} players at {}", self.players.len(), spawn);
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera.set_mode(mode);
    }

    pub fn set_camera_manual(&mut self, origin: Vec2, zoom: f32) {
        self.camera.set_manual(origin, zoom);
    }
}
