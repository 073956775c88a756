//! Loader for level, settings and binding files at startup.

use bevy::prelude::*;
use ron::Options;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::bindings::{BindingsDef, InputBindings};
use super::data::{LevelDef, SimulationSettings};
use super::validation::{ValidationError, validate_level, validate_settings};
use crate::movement::Action;

pub const SETTINGS_FILE: &str = "data/simulation.ron";
pub const BINDINGS_FILE: &str = "data/bindings.ron";
pub const LEVELS_DIR: &str = "levels";

#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {source}")]
    Ron {
        file: String,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("Failed to parse {file}: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported content format for {file}, expected .ron or .json")]
    UnsupportedFormat { file: String },

    #[error("Player {player} binds {action:?} to unknown key '{key}'")]
    UnknownKey {
        player: usize,
        action: Action,
        key: String,
    },

    #[error("Player {player} has no key bound for {action:?}")]
    MissingBinding { player: usize, action: Action },

    #[error("Invalid content in {file}: {error}")]
    Invalid { file: String, error: ValidationError },
}

/// Everything the app needs to start a level.
#[derive(Debug, Clone)]
pub struct GameContent {
    pub settings: SimulationSettings,
    pub level: LevelDef,
    pub bindings: Vec<InputBindings>,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn parse_ron<T: DeserializeOwned>(file: &str, contents: &str) -> Result<T, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|source| ContentLoadError::Ron {
            file: file.to_string(),
            source,
        })
}

pub fn parse_json<T: DeserializeOwned>(file: &str, contents: &str) -> Result<T, ContentLoadError> {
    serde_json::from_str(contents).map_err(|source| ContentLoadError::Json {
        file: file.to_string(),
        source,
    })
}

/// Load one file, choosing the format from its extension.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, ContentLoadError> {
    let file = path.display().to_string();
    let parse: fn(&str, &str) -> Result<T, ContentLoadError> =
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => parse_ron,
            Some("json") => parse_json,
            _ => return Err(ContentLoadError::UnsupportedFormat { file }),
        };

    let contents = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: file.clone(),
        source,
    })?;
    parse(&file, &contents)
}

fn invalid(file: &str, errors: Vec<ValidationError>) -> impl Iterator<Item = ContentLoadError> + '_ {
    errors.into_iter().map(move |error| ContentLoadError::Invalid {
        file: file.to_string(),
        error,
    })
}

/// Load settings, bindings and `level_file` (relative to the levels dir)
/// from `base_path`. Every failure is collected before returning.
pub fn load_all_content(
    base_path: &Path,
    level_file: &str,
) -> Result<GameContent, Vec<ContentLoadError>> {
    let mut errors = Vec::new();

    let settings = match load_file::<SimulationSettings>(&base_path.join(SETTINGS_FILE)) {
        Ok(settings) => {
            errors.extend(invalid(SETTINGS_FILE, validate_settings(&settings)));
            Some(settings)
        }
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let bindings = match load_file::<BindingsDef>(&base_path.join(BINDINGS_FILE)) {
        Ok(def) => match def.resolve() {
            Ok(bindings) => Some(bindings),
            Err(mut e) => {
                errors.append(&mut e);
                None
            }
        },
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let level_path = base_path.join(LEVELS_DIR).join(level_file);
    let level = match load_file::<LevelDef>(&level_path) {
        Ok(level) => Some(level),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    // Level checks depend on the player size from settings.
    if let (Some(settings), Some(level)) = (&settings, &level) {
        errors.extend(invalid(level_file, validate_level(level, settings.standing_size())));
    }

    match (settings, level, bindings) {
        (Some(settings), Some(level), Some(bindings)) if errors.is_empty() => {
            info!(
                "Loaded level '{}' ({} platforms, {} ladders) with {} binding tables",
                level.id,
                level.platforms.len(),
                level.ladders.len(),
                bindings.len()
            );
            Ok(GameContent {
                settings,
                level,
                bindings,
            })
        }
        _ => Err(errors),
    }
}
