//! "The Shadow": the final-level boss.
//!
//! Health-threshold phases, teleport, phase-dependent special attacks and
//! incoming damage mitigation layered over aggressive pursuit.

use glam::DVec2;
use rand::Rng;

use crisis_core::components::{BossState, EnemyBrain, ShadowClone};
use crisis_core::constants::*;
use crisis_core::enums::{BossPhase, BossSpecial};

use crate::fsm::{cooldown_elapsed, try_attack, EnemyAction, EnemyContext, EnemyUpdate};

pub(crate) fn evaluate(
    ctx: &EnemyContext,
    brain: &mut EnemyBrain,
    state: &mut BossState,
    rng: &mut impl Rng,
    update: &mut EnemyUpdate,
) {
    if let Some(phase) = advance_phase(ctx, brain, state) {
        update.actions.push(EnemyAction::PhaseChanged(phase));
    }

    let mut position = ctx.position;

    if ctx.target.visible
        && ctx.distance() > BOSS_TELEPORT_MIN_DISTANCE
        && cooldown_elapsed(state.last_teleport_ms, BOSS_TELEPORT_COOLDOWN_MS, ctx.now_ms)
    {
        let side = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
        let x = teleport_x(ctx.target.x, side);
        position = DVec2::new(x, ctx.target.y);
        state.last_teleport_ms = Some(ctx.now_ms);
        update.teleport_to = Some(position);
        update.actions.push(EnemyAction::Teleported {
            x: position.x,
            y: position.y,
        });
    }

    if ctx.target.visible
        && cooldown_elapsed(state.last_special_ms, BOSS_SPECIAL_COOLDOWN_MS, ctx.now_ms)
    {
        state.last_special_ms = Some(ctx.now_ms);
        update.actions.push(EnemyAction::Special {
            attack: BossSpecial::for_phase(state.phase),
            target_x: ctx.target.x,
            target_y: ctx.target.y,
        });
    }

    // Pursue from wherever the teleport left us.
    let moved = EnemyContext { position, ..*ctx };
    update.facing = moved.direction();
    if moved.perceives_within(brain.ai.detection_range) {
        update.velocity_x = moved.direction() * brain.ai.movement_speed;
        try_attack(&moved, brain, update);
    } else {
        update.velocity_x = ctx.velocity_x * FRICTION;
    }
}

/// At most one phase transition per tick.
fn advance_phase(ctx: &EnemyContext, brain: &mut EnemyBrain, state: &mut BossState) -> Option<BossPhase> {
    let fraction = ctx.health.fraction();
    match state.phase {
        BossPhase::One if fraction <= BOSS_PHASE2_THRESHOLD => {
            state.phase = BossPhase::Two;
            state.clones = [-BOSS_CLONE_OFFSET, BOSS_CLONE_OFFSET]
                .into_iter()
                .map(|offset| ShadowClone {
                    x: ctx.position.x + offset,
                    y: ctx.position.y,
                    active: true,
                })
                .collect();
            Some(BossPhase::Two)
        }
        BossPhase::Two if fraction <= BOSS_PHASE3_THRESHOLD => {
            state.phase = BossPhase::Three;
            brain.ai.movement_speed = BOSS_PHASE3_SPEED;
            brain.attack_cooldown_ms = BOSS_PHASE3_ATTACK_COOLDOWN_MS;
            Some(BossPhase::Three)
        }
        _ => None,
    }
}

/// Landing x beside the player, kept inside the arena.
pub fn teleport_x(player_x: f64, side: f64) -> f64 {
    (player_x + side * BOSS_TELEPORT_OFFSET).clamp(BOSS_ARENA_MIN_X, BOSS_ARENA_MAX_X)
}

/// Incoming damage after phase mitigation, floored.
pub fn mitigate(phase: BossPhase, raw: u32) -> u32 {
    let factor = match phase {
        BossPhase::One => return raw,
        BossPhase::Two => BOSS_PHASE2_DAMAGE_FACTOR,
        BossPhase::Three => BOSS_PHASE3_DAMAGE_FACTOR,
    };
    (f64::from(raw) * factor).floor() as u32
}
