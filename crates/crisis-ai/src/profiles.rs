//! Archetype-specific enemy profiles.
//!
//! Consolidates per-archetype, per-level stats for spawning and the FSM.

use crisis_core::components::{
    AiDescriptor, AimState, ArchetypeState, BossState, ChargeState, EnemyBrain, PatrolRoute,
};
use crisis_core::constants::PATROL_HALF_WIDTH;
use crisis_core::enums::{AiBehavior, EnemyKind};

/// Stat block for an enemy archetype at a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub width: f64,
    pub height: f64,
    pub max_health: u32,
    /// Contact damage per tick of overlap.
    pub attack_power: u32,
    pub ai: AiDescriptor,
    pub attack_cooldown_ms: f64,
}

/// Get the profile for `kind` scaled to `level`.
pub fn get_profile(kind: EnemyKind, level: u8) -> EnemyProfile {
    let l = u32::from(level);
    let lf = f64::from(level);

    match kind {
        EnemyKind::Grunt => EnemyProfile {
            width: 35.0,
            height: 50.0,
            max_health: 50 + 10 * l,
            attack_power: 10 + 2 * l,
            ai: AiDescriptor {
                behavior: AiBehavior::Aggressive,
                detection_range: 120.0,
                attack_range: 45.0,
                movement_speed: 1.0 + 0.2 * lf,
            },
            attack_cooldown_ms: (1200.0 - 100.0 * lf).max(800.0),
        },
        EnemyKind::Enforcer => EnemyProfile {
            width: 45.0,
            height: 60.0,
            max_health: 80 + 15 * l,
            attack_power: 15 + 3 * l,
            ai: AiDescriptor {
                behavior: AiBehavior::Aggressive,
                detection_range: 150.0,
                attack_range: 60.0,
                movement_speed: 0.8 + 0.15 * lf,
            },
            attack_cooldown_ms: (1000.0 - 80.0 * lf).max(600.0),
        },
        EnemyKind::Sniper => EnemyProfile {
            width: 30.0,
            height: 45.0,
            max_health: 40 + 8 * l,
            attack_power: 25 + 5 * l,
            ai: AiDescriptor {
                behavior: AiBehavior::Defensive,
                detection_range: 300.0,
                attack_range: 250.0,
                movement_speed: 0.5,
            },
            attack_cooldown_ms: (2500.0 - 200.0 * lf).max(1500.0),
        },
        // The boss only appears on the final level and does not scale.
        EnemyKind::Boss => EnemyProfile {
            width: 60.0,
            height: 80.0,
            max_health: 300,
            attack_power: 30,
            ai: AiDescriptor {
                behavior: AiBehavior::Boss,
                detection_range: 400.0,
                attack_range: 80.0,
                movement_speed: 1.5,
            },
            attack_cooldown_ms: 800.0,
        },
    }
}

/// Build the AI brain for an enemy spawned at `spawn_x`. `behavior`
/// overrides the archetype's default behavior (e.g. a patrolling grunt).
pub fn new_brain(
    kind: EnemyKind,
    profile: &EnemyProfile,
    spawn_x: f64,
    behavior: Option<AiBehavior>,
) -> EnemyBrain {
    let mut ai = profile.ai;
    if let Some(behavior) = behavior {
        ai.behavior = behavior;
    }
    EnemyBrain {
        ai,
        attack_cooldown_ms: profile.attack_cooldown_ms,
        last_attack_ms: None,
        attacking_until_ms: None,
        patrol: PatrolRoute {
            start_x: spawn_x - PATROL_HALF_WIDTH,
            end_x: spawn_x + PATROL_HALF_WIDTH,
            direction: 1.0,
        },
        archetype: initial_state(kind),
    }
}

/// Fresh archetype-specific AI state for a newly spawned enemy.
pub fn initial_state(kind: EnemyKind) -> ArchetypeState {
    match kind {
        EnemyKind::Grunt => ArchetypeState::Plain,
        EnemyKind::Enforcer => ArchetypeState::Charge(ChargeState::default()),
        EnemyKind::Sniper => ArchetypeState::Aim(AimState::default()),
        EnemyKind::Boss => ArchetypeState::Boss(BossState::default()),
    }
}
