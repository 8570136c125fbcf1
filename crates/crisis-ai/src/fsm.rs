//! Enemy behavior finite state machine.
//!
//! Pure functions over plain data: given one enemy's brain and a view of the
//! player, compute its new horizontal velocity and the actions it took this
//! tick. No ECS dependency and no wall clock; time arrives as `now_ms`.

use glam::DVec2;
use rand::Rng;

use crisis_core::components::{AimState, ArchetypeState, ChargeState, EnemyBrain};
use crisis_core::constants::*;
use crisis_core::enums::{AiBehavior, BossPhase, BossSpecial, EnemyKind};
use crisis_core::types::Health;

use crate::boss;

/// What an enemy can perceive of the player this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTarget {
    pub x: f64,
    pub y: f64,
    /// False while the player is hidden (stealth or invisibility).
    pub visible: bool,
}

/// Input to the enemy FSM for a single entity.
#[derive(Debug, Clone, Copy)]
pub struct EnemyContext {
    pub kind: EnemyKind,
    pub position: DVec2,
    pub velocity_x: f64,
    pub health: Health,
    pub target: PlayerTarget,
    pub now_ms: f64,
    /// System Override: enemies may not start attacks.
    pub attacks_suppressed: bool,
}

impl EnemyContext {
    pub fn distance(&self) -> f64 {
        (self.position.x - self.target.x).abs()
    }

    /// +1 when the player is to the right, -1 otherwise.
    pub fn direction(&self) -> f64 {
        if self.target.x >= self.position.x {
            1.0
        } else {
            -1.0
        }
    }

    /// Player is visible and within `range` horizontally.
    pub fn perceives_within(&self, range: f64) -> bool {
        self.target.visible && self.distance() <= range
    }
}

/// Something the enemy did this tick, surfaced as an event by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyAction {
    Attack,
    ChargeLaunched { direction: f64 },
    AimStarted,
    PhaseChanged(BossPhase),
    Teleported { x: f64, y: f64 },
    Special {
        attack: BossSpecial,
        target_x: f64,
        target_y: f64,
    },
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyUpdate {
    pub velocity_x: f64,
    /// New position when the enemy teleported.
    pub teleport_to: Option<DVec2>,
    /// Always toward the player.
    pub facing: f64,
    pub actions: Vec<EnemyAction>,
}

/// Evaluate one enemy for this tick, mutating its brain timers.
pub fn evaluate(ctx: &EnemyContext, brain: &mut EnemyBrain, rng: &mut impl Rng) -> EnemyUpdate {
    let mut update = EnemyUpdate {
        velocity_x: ctx.velocity_x,
        teleport_to: None,
        facing: ctx.direction(),
        actions: Vec::new(),
    };

    // Archetype state is taken out so behavior code can borrow the rest of
    // the brain mutably; it is always put back.
    let mut archetype = std::mem::take(&mut brain.archetype);
    match &mut archetype {
        ArchetypeState::Boss(state) => boss::evaluate(ctx, brain, state, rng, &mut update),
        ArchetypeState::Charge(charge) => evaluate_with_charge(ctx, brain, charge, &mut update),
        ArchetypeState::Aim(aim) => evaluate_with_aim(ctx, brain, aim, &mut update),
        ArchetypeState::Plain => {
            let may_attack = steer(ctx, brain, &mut update);
            if may_attack {
                try_attack(ctx, brain, &mut update);
            }
        }
    }
    brain.archetype = archetype;

    update
}

/// Apply the base behavior's movement. Returns whether the behavior allows
/// an attack this tick.
fn steer(ctx: &EnemyContext, brain: &mut EnemyBrain, update: &mut EnemyUpdate) -> bool {
    match brain.ai.behavior {
        AiBehavior::Aggressive | AiBehavior::Boss => {
            if ctx.perceives_within(brain.ai.detection_range) {
                update.velocity_x = ctx.direction() * brain.ai.movement_speed;
                true
            } else {
                update.velocity_x = ctx.velocity_x * FRICTION;
                false
            }
        }
        AiBehavior::Patrol => {
            let route = &mut brain.patrol;
            if ctx.position.x <= route.start_x {
                route.direction = 1.0;
            } else if ctx.position.x >= route.end_x {
                route.direction = -1.0;
            }
            update.velocity_x = brain.ai.movement_speed * route.direction;
            ctx.target.visible
        }
        AiBehavior::Defensive => {
            update.velocity_x = 0.0;
            ctx.target.visible
        }
    }
}

/// Whether the enemy's own attack cooldown has elapsed.
pub fn attack_ready(brain: &EnemyBrain, now_ms: f64) -> bool {
    cooldown_elapsed(brain.last_attack_ms, brain.attack_cooldown_ms, now_ms)
}

/// `None` means never used, which is always ready.
pub fn cooldown_elapsed(last_ms: Option<f64>, cooldown_ms: f64, now_ms: f64) -> bool {
    last_ms.map_or(true, |last| now_ms - last >= cooldown_ms)
}

/// Attack if the player is in range and the cooldown allows it.
pub(crate) fn try_attack(ctx: &EnemyContext, brain: &mut EnemyBrain, update: &mut EnemyUpdate) -> bool {
    if ctx.attacks_suppressed
        || !ctx.perceives_within(brain.ai.attack_range)
        || !attack_ready(brain, ctx.now_ms)
    {
        return false;
    }
    brain.last_attack_ms = Some(ctx.now_ms);
    brain.attacking_until_ms = Some(ctx.now_ms + ENEMY_ATTACK_FLASH_MS);
    update.actions.push(EnemyAction::Attack);
    true
}

fn evaluate_with_charge(
    ctx: &EnemyContext,
    brain: &mut EnemyBrain,
    charge: &mut ChargeState,
    update: &mut EnemyUpdate,
) {
    let may_attack = steer(ctx, brain, update);

    let mut charging = false;
    if let Some(until) = charge.charging_until_ms {
        if ctx.now_ms < until {
            charging = true;
            update.velocity_x = ctx.velocity_x;
        } else {
            update.velocity_x = ctx.velocity_x * CHARGE_DECAY;
            charge.charging_until_ms = None;
        }
    }

    if !charging {
        if !charge.ready
            && ctx.perceives_within(CHARGE_ARM_RANGE)
            && cooldown_elapsed(charge.last_charge_ms, CHARGE_COOLDOWN_MS, ctx.now_ms)
        {
            charge.ready = true;
        }
        if charge.ready && ctx.perceives_within(CHARGE_TRIGGER_RANGE) {
            let direction = ctx.direction();
            update.velocity_x = direction * CHARGE_SPEED;
            charge.ready = false;
            charge.last_charge_ms = Some(ctx.now_ms);
            charge.charging_until_ms = Some(ctx.now_ms + CHARGE_DURATION_MS);
            update.actions.push(EnemyAction::ChargeLaunched { direction });
        }
    }

    if may_attack {
        try_attack(ctx, brain, update);
    }
}

fn evaluate_with_aim(
    ctx: &EnemyContext,
    brain: &mut EnemyBrain,
    aim: &mut AimState,
    update: &mut EnemyUpdate,
) {
    let may_attack = steer(ctx, brain, update);

    if !ctx.perceives_within(brain.ai.detection_range) {
        aim.aiming_since_ms = None;
        return;
    }

    let since = match aim.aiming_since_ms {
        Some(since) => since,
        None => {
            aim.aiming_since_ms = Some(ctx.now_ms);
            update.actions.push(EnemyAction::AimStarted);
            ctx.now_ms
        }
    };

    if may_attack && ctx.now_ms - since >= SNIPER_AIM_MS && try_attack(ctx, brain, update) {
        aim.aiming_since_ms = None;
    }
}
