//! Cleanup system: removes defeated enemies and awards score.

use hecs::{Entity, World};
use log::debug;

use crisis_core::components::{Enemy, SpawnOrder};
use crisis_core::constants::{SCORE_BOSS, SCORE_STANDARD_ENEMY};
use crisis_core::enums::EnemyKind;
use crisis_core::events::GameEvent;
use crisis_core::types::Health;

/// Despawn every enemy at zero health, in spawn order. Returns the score
/// earned. Uses a caller-owned buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<(SpawnOrder, Entity, EnemyKind)>,
    events: &mut Vec<GameEvent>,
) -> u32 {
    despawn_buffer.clear();
    despawn_buffer.extend(
        world
            .query::<(&Enemy, &Health, &SpawnOrder)>()
            .iter()
            .filter(|(_, (_, health, _))| !health.is_alive())
            .map(|(entity, (enemy, _, order))| (*order, entity, enemy.kind)),
    );
    despawn_buffer.sort_unstable_by_key(|(order, _, _)| *order);

    let mut earned = 0u32;
    for (order, entity, kind) in despawn_buffer.drain(..) {
        if world.despawn(entity).is_err() {
            continue;
        }

        let score = if kind.is_boss() {
            SCORE_BOSS
        } else {
            SCORE_STANDARD_ENEMY
        };
        earned = earned.saturating_add(score);
        debug!("enemy {} ({:?}) defeated, +{score}", order.0, kind);
        events.push(GameEvent::EnemyDefeated {
            id: order.0,
            kind,
            score,
        });
    }
    earned
}
