//! Platforms domain: solid platforms, their oscillation, and ladder volumes.

mod ladder;
mod platform;

#[cfg(test)]
mod tests;

pub use ladder::{DEFAULT_LADDER_WIDTH, Ladder};
pub use platform::{Platform, PlatformId, PlatformMotion, Reversal};
