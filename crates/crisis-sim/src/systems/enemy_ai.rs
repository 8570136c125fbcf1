//! Enemy AI system: evaluates the behavior FSM for every enemy.
//!
//! Enemies are evaluated in spawn order against a single view of the player
//! captured at the start of the step, then their velocities, positions and
//! brains are updated in place.

use hecs::World;
use log::debug;
use rand_chacha::ChaCha8Rng;

use crisis_core::components::{Enemy, EnemyBrain, SpawnOrder};
use crisis_core::events::GameEvent;
use crisis_core::types::{Body, Health};

use crisis_ai::fsm::{evaluate, EnemyAction, EnemyContext, PlayerTarget};

use crate::world_setup::enemies_in_order;

/// Run the enemy FSM for every active enemy.
pub fn run(
    world: &mut World,
    target: PlayerTarget,
    now_ms: f64,
    attacks_suppressed: bool,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    for entity in enemies_in_order(world) {
        let Ok((enemy, body, health, brain, order)) = world
            .query_one_mut::<(&Enemy, &mut Body, &Health, &mut EnemyBrain, &SpawnOrder)>(entity)
        else {
            continue;
        };

        let ctx = EnemyContext {
            kind: enemy.kind,
            position: body.position,
            velocity_x: body.velocity.x,
            health: *health,
            target,
            now_ms,
            attacks_suppressed,
        };
        let update = evaluate(&ctx, brain, rng);

        body.velocity.x = update.velocity_x;
        if let Some(position) = update.teleport_to {
            body.position = position;
        }

        let id = order.0;
        for action in update.actions {
            events.push(match action {
                EnemyAction::Attack => GameEvent::EnemyAttacked {
                    id,
                    kind: enemy.kind,
                    power: enemy.attack_power,
                },
                EnemyAction::ChargeLaunched { direction } => {
                    GameEvent::EnforcerCharged { id, direction }
                }
                EnemyAction::AimStarted => GameEvent::SniperAiming { id },
                EnemyAction::PhaseChanged(phase) => {
                    debug!("boss {id} entered phase {}", phase.number());
                    GameEvent::BossPhaseChanged { id, phase }
                }
                EnemyAction::Teleported { x, y } => GameEvent::BossTeleported { id, x, y },
                EnemyAction::Special {
                    attack,
                    target_x,
                    target_y,
                } => GameEvent::BossSpecial {
                    id,
                    attack,
                    target_x,
                    target_y,
                },
            });
        }
    }
}
