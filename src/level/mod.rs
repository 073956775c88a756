//! Level domain: checkpoints, hazards, collectibles, the run timer, the
//! finish line and tutorial gates.
//!
//! Platforms carry meaning only through their names. Level scripting runs
//! between ticks and touches players only through the engine's external
//! mutators: capability flags, reloads, respawn points and the camera mode.

mod artifact;
mod script;

#[cfg(test)]
mod tests;

pub use artifact::{ARTIFACT_SIZE, Artifact};
pub use script::{
    CHECKPOINT_PREFIX, Capability, DEATH_PREFIX, FALL_MARGIN, FINISH_LINE, INTRODUCE_JUMPING,
    INTRODUCE_SLIDING, LevelEvent, LevelScript, PlatformRole, STARTING_PLATFORM, resolve_spawn,
    stand_on,
};
