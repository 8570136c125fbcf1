//! WORLD CRISIS loop host.
//!
//! Runs the simulation engine on its own thread at a fixed refresh rate and
//! publishes value snapshots for a presentation layer to poll.

pub mod error;
pub mod game_loop;
pub mod logging;
pub mod state;

pub use crisis_core as core;
pub use error::LoopError;
pub use game_loop::GameLoop;
pub use state::LoopConfig;

#[cfg(test)]
mod tests;
