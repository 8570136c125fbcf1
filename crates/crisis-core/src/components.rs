//! ECS components for hecs enemy entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the AI crate and in systems, not components.
//! An enemy entity carries `(Enemy, Body, Health, EnemyBrain, SpawnOrder)`.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Static identity of an enemy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Damage dealt to the player on every tick of contact.
    pub attack_power: u32,
    /// Level the enemy was scaled for.
    pub level: u8,
}

/// Monotonic spawn sequence number. Systems iterate enemies in this order so
/// tie-breaks are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// Behavior parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiDescriptor {
    pub behavior: AiBehavior,
    pub detection_range: f64,
    pub attack_range: f64,
    pub movement_speed: f64,
}

/// Patrol bounds and current heading (+1 right, -1 left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRoute {
    pub start_x: f64,
    pub end_x: f64,
    pub direction: f64,
}

/// Mutable AI state of one enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub ai: AiDescriptor,
    pub attack_cooldown_ms: f64,
    /// Time of the last attack; `None` means the enemy has never attacked.
    pub last_attack_ms: Option<f64>,
    /// The "attacking" flag is up until this time.
    pub attacking_until_ms: Option<f64>,
    pub patrol: PatrolRoute,
    pub archetype: ArchetypeState,
}

/// Archetype-specific transient state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ArchetypeState {
    #[default]
    Plain,
    Charge(ChargeState),
    Aim(AimState),
    Boss(BossState),
}

/// Enforcer charge attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeState {
    /// Armed and waiting for the player to close in.
    pub ready: bool,
    pub last_charge_ms: Option<f64>,
    /// Burst velocity is held until this time, then decays.
    pub charging_until_ms: Option<f64>,
}

/// Sniper aim timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AimState {
    /// When the current aim started; `None` while not aiming.
    pub aiming_since_ms: Option<f64>,
}

/// "The Shadow" boss state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    pub phase: BossPhase,
    pub last_teleport_ms: Option<f64>,
    pub last_special_ms: Option<f64>,
    /// Illusory clones created on entering phase 2. Presentation only.
    pub clones: Vec<ShadowClone>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowClone {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}
