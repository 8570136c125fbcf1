//! Simulation engine for WORLD CRISIS.
//!
//! Owns the hecs ECS world of enemies, the player character, and the level
//! director; runs systems once per frame and produces `GameStateSnapshot`s
//! for the presentation layer.

pub mod character;
pub mod director;
pub mod engine;
pub mod level;
pub mod systems;
pub mod world_setup;

pub use crisis_core as core;
pub use engine::{SimConfig, SimulationEngine};
