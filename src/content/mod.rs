//! Content domain: level, settings and key binding files.
//!
//! Everything is read once at startup from the assets directory. Load and
//! validation failures are collected so a broken file reports every problem
//! at once instead of the first one.

mod bindings;
mod data;
mod loader;
mod validation;


pub use bindings::{BindingsDef, InputBindings, key_from_name};
pub use data::{ArtifactDef, LadderDef, LevelDef, MotionDef, PlatformDef, SimulationSettings};
pub use loader::{
    BINDINGS_FILE, ContentLoadError, GameContent, LEVELS_DIR, SETTINGS_FILE, load_all_content,
    load_file, parse_json, parse_ron,
};
pub use validation::{ValidationError, validate_level, validate_settings};
