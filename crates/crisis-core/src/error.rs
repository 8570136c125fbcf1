//! Error types shared by the simulation crates.

use thiserror::Error;

use crate::enums::{CharacterKind, Screen};

/// Rejected operations. None of these mutate state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("unknown character archetype `{0}`")]
    UnknownCharacter(String),

    #[error("ability index {index} out of range (character has {count})")]
    InvalidAbilityIndex { index: usize, count: usize },

    #[error("ability `{name}` is cooling down ({remaining_ms:.0} ms left)")]
    AbilityOnCooldown { name: String, remaining_ms: f64 },

    #[error("special mechanic index {0} out of range")]
    InvalidMechanicIndex(usize),

    #[error("special mechanic {index} can only be used by the {required}")]
    MechanicRestricted {
        index: usize,
        required: CharacterKind,
    },

    #[error("special mechanic {0} is already activated")]
    MechanicAlreadyActive(usize),

    #[error("operation not available on the {0:?} screen")]
    WrongScreen(Screen),

    #[error("no active player")]
    NoActivePlayer,
}

/// Faults raised while advancing one frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("frame delta must be finite and non-negative, got {0}")]
    InvalidDelta(f64),

    #[error("{0} state became non-finite")]
    NonFinite(String),
}
