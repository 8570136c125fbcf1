//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::CharacterKind;

/// Keyboard keys the simulation reacts to, named after DOM `KeyboardEvent.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Space,
    Enter,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    /// Attack.
    KeyX,
    /// Interact with overlapping special mechanics.
    KeyE,
}

impl KeyCode {
    /// Parse a DOM key code. Keys the simulation ignores map to `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        let key = match code {
            "Space" => KeyCode::Space,
            "Enter" => KeyCode::Enter,
            "Digit1" => KeyCode::Digit1,
            "Digit2" => KeyCode::Digit2,
            "Digit3" => KeyCode::Digit3,
            "Digit4" => KeyCode::Digit4,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "KeyX" => KeyCode::KeyX,
            "KeyE" => KeyCode::KeyE,
            _ => return None,
        };
        Some(key)
    }

    /// Confirm keys advance the intro and restart from terminal screens.
    pub fn is_confirm(self) -> bool {
        matches!(self, KeyCode::Space | KeyCode::Enter)
    }

    /// Digit value for `Digit1`..`Digit4`.
    pub fn digit(self) -> Option<u8> {
        match self {
            KeyCode::Digit1 => Some(1),
            KeyCode::Digit2 => Some(2),
            KeyCode::Digit3 => Some(3),
            KeyCode::Digit4 => Some(4),
            _ => None,
        }
    }
}

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// A key went down. Dispatch depends on the current screen.
    KeyDown { key: KeyCode },
    /// A key was released (stops held movement).
    KeyUp { key: KeyCode },
    /// Pick an archetype on the character-select screen.
    SelectCharacter { character: CharacterKind },
    /// Reset to the initial state.
    Restart,
}
