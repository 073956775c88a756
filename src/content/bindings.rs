//! Keyboard bindings: key names in data, resolved once into fixed tables.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::content::ContentLoadError;
use crate::movement::{Action, InputSnapshot};

/// assets/data/bindings.ron: one action→key-name map per player.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct BindingsDef {
    pub players: Vec<BTreeMap<Action, String>>,
}

/// Resolved key table for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBindings {
    keys: [KeyCode; Action::COUNT],
}

impl InputBindings {
    pub fn key(&self, action: Action) -> KeyCode {
        self.keys[action.index()]
    }

    /// Sample the bound keys through `pressed`.
    pub fn snapshot(&self, pressed: impl Fn(KeyCode) -> bool) -> InputSnapshot {
        let mut input = InputSnapshot::default();
        for action in Action::ALL {
            input.set(action, pressed(self.key(action)));
        }
        input
    }
}

macro_rules! key_names {
    ($name:expr; $($key:ident),* $(,)?) => {
        match $name {
            $(stringify!($key) => Some(KeyCode::$key),)*
            _ => None,
        }
    };
}

/// Key name (the `KeyCode` variant name) to key code.
pub fn key_from_name(name: &str) -> Option<KeyCode> {
    key_names!(name;
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
        Numpad0, Numpad1, Numpad2, Numpad3, Numpad4, Numpad5, Numpad6, Numpad7, Numpad8,
        Numpad9, NumpadEnter, NumpadAdd, NumpadSubtract,
        ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
        Space, Enter, Tab, Backspace,
        ShiftLeft, ShiftRight, ControlLeft, ControlRight, AltLeft, AltRight,
        Comma, Period, Slash, Semicolon, Quote, BracketLeft, BracketRight,
    )
}

impl BindingsDef {
    /// Resolve every player's table. Reports every unknown or missing key.
    pub fn resolve(&self) -> Result<Vec<InputBindings>, Vec<ContentLoadError>> {
        let mut resolved = Vec::with_capacity(self.players.len());
        let mut errors = Vec::new();

        for (player, table) in self.players.iter().enumerate() {
            let mut keys = [KeyCode::Escape; Action::COUNT];
            let mut complete = true;

            for action in Action::ALL {
                let Some(name) = table.get(&action) else {
                    errors.push(ContentLoadError::MissingBinding { player, action });
                    complete = false;
                    continue;
                };
                match key_from_name(name) {
                    Some(key) => keys[action.index()] = key,
                    None => {
                        errors.push(ContentLoadError::UnknownKey {
                            player,
                            action,
                            key: name.clone(),
                        });
                        complete = false;
                    }
                }
            }

            if complete {
                resolved.push(InputBindings { keys });
            }
        }

        if errors.is_empty() {
            Ok(resolved)
        } else {
            Err(errors)
        }
    }

    /// WASD, arrows, IJKL and the numpad, in player order.
    pub fn builtin() -> Self {
        let layouts = [
            ["KeyA", "KeyD", "KeyW", "KeyS", "KeyW", "KeyS"],
            ["ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown", "ArrowUp", "ArrowDown"],
            ["KeyJ", "KeyL", "KeyI", "KeyK", "KeyI", "KeyK"],
            ["Numpad4", "Numpad6", "Numpad8", "Numpad5", "Numpad8", "Numpad5"],
        ];

        let players = layouts
            .iter()
            .map(|names| {
                Action::ALL
                    .iter()
                    .zip(names)
                    .map(|(action, name)| (*action, name.to_string()))
                    .collect()
            })
            .collect();
        Self { players }
    }
}
