//! Player/enemy contact resolution.
//!
//! Every enemy overlapping the player deals its attack power on every tick of
//! overlap. There is no invulnerability window after a hit.

use hecs::World;

use crisis_core::components::{Enemy, SpawnOrder};
use crisis_core::events::GameEvent;
use crisis_core::types::{Aabb, Body};

/// Total contact damage this tick. Emits one event per touching enemy.
pub fn contact_damage(world: &World, player: &Aabb, events: &mut Vec<GameEvent>) -> u32 {
    let mut hits: Vec<(SpawnOrder, u32)> = world
        .query::<(&Enemy, &Body, &SpawnOrder)>()
        .iter()
        .filter(|(_, (_, body, _))| body.bounds().collides(player))
        .map(|(_, (enemy, _, order))| (*order, enemy.attack_power))
        .collect();
    hits.sort_unstable_by_key(|(order, _)| *order);

    hits.into_iter().fold(0u32, |total, (order, damage)| {
        events.push(GameEvent::ContactDamage {
            id: order.0,
            damage,
        });
        total.saturating_add(damage)
    })
}
