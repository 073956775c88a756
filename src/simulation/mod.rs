//! Simulation domain: fixed-timestep stepping of platforms, players and camera.

mod context;
mod engine;


pub use context::{LevelLayout, SimulationContext};
pub use engine::{Engine, MAX_PLAYERS, SimulationError, TickReport};
