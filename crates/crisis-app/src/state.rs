//! State shared between the loop handle and the game loop thread.

use serde::{Deserialize, Serialize};

use crisis_core::commands::PlayerCommand;
use crisis_core::constants::TICK_RATE;
use crisis_sim::engine::SimConfig;

use crate::error::LoopError;

/// Messages sent from the handle to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Runtime knobs for the driving loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub sim: SimConfig,
    /// Frames per second the loop aims for.
    pub tick_rate_hz: u32,
    /// Multiplier on the measured frame delta fed to the engine.
    pub time_scale: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_rate_hz: TICK_RATE,
            time_scale: 1.0,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<(), LoopError> {
        if self.tick_rate_hz == 0 {
            return Err(LoopError::InvalidConfig("tick_rate_hz must be positive".into()));
        }
        if !self.time_scale.is_finite() || self.time_scale <= 0.0 {
            return Err(LoopError::InvalidConfig(format!(
                "time_scale must be a positive number, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }
}
