//! Events emitted by the simulation for presentation feedback.
//!
//! Events are accumulated during a tick and drained into the next snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    ScreenChanged {
        from: Screen,
        to: Screen,
    },
    LevelStarted {
        level: u8,
    },
    LevelComplete {
        level: u8,
    },
    WaveReleased {
        level: u8,
        wave: u32,
    },
    EnemySpawned {
        id: u64,
        kind: EnemyKind,
        x: f64,
    },
    /// An enemy swung at the player. Contact overlap is what deals damage.
    EnemyAttacked {
        id: u64,
        kind: EnemyKind,
        power: u32,
    },
    EnforcerCharged {
        id: u64,
        direction: f64,
    },
    SniperAiming {
        id: u64,
    },
    BossPhaseChanged {
        id: u64,
        phase: BossPhase,
    },
    BossTeleported {
        id: u64,
        x: f64,
        y: f64,
    },
    BossSpecial {
        id: u64,
        attack: BossSpecial,
        target_x: f64,
        target_y: f64,
    },
    EnemyDamaged {
        id: u64,
        amount: u32,
        remaining: u32,
    },
    EnemyDefeated {
        id: u64,
        kind: EnemyKind,
        score: u32,
    },
    PlayerAttacked {
        damage: u32,
        range: f64,
    },
    AbilityUsed {
        character: CharacterKind,
        index: usize,
        name: String,
    },
    MechanicActivated {
        index: usize,
        kind: MechanicKind,
        effect: String,
    },
    HazardDamage {
        damage: u32,
    },
    ContactDamage {
        id: u64,
        damage: u32,
    },
    LifeLost {
        lives_remaining: u32,
    },
    TimeExpired {
        level: u8,
    },
}
