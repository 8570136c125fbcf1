//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` when read-only).
//! They own no state; enemy state lives in components and player state in
//! the engine.

pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod enemy_ai;
pub mod physics;
pub mod snapshot;
pub mod wave_spawner;
