//! Enemy AI for WORLD CRISIS.
//!
//! Implements the enemy behavior state machines (aggressive, patrol,
//! defensive, boss), archetype augmentations, and per-level stat profiles.

pub mod boss;
pub mod fsm;
pub mod profiles;

pub use crisis_core as core;

#[cfg(test)]
mod tests;
