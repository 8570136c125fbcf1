//! Errors surfaced by the loop host.

use thiserror::Error;

use crisis_core::error::{CoreError, StepError};

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("game loop already running")]
    AlreadyRunning,

    #[error("invalid loop configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("command rejected: {0}")]
    Command(#[from] CoreError),

    #[error("simulation step failed: {0}")]
    Step(#[from] StepError),

    #[error("simulation step panicked: {0}")]
    Panicked(String),
}
