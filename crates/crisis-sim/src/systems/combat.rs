//! Player offence: melee attacks and ability strikes against enemies.
//!
//! Damage dealt to the boss is reduced according to its phase. Enemies whose
//! health reaches zero are left for the cleanup system to remove.

use hecs::World;

use crisis_core::components::{ArchetypeState, EnemyBrain, SpawnOrder};
use crisis_core::events::GameEvent;
use crisis_core::types::{Body, Health};

use crisis_ai::boss::mitigate;

/// Which enemies a strike reaches, by horizontal distance from the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reach {
    /// Melee: strictly closer than `range`.
    Melee(f64),
    /// Area strike: within `radius` inclusive.
    Radius(f64),
    /// Every active enemy.
    Everywhere,
}

impl Reach {
    fn contains(self, distance: f64) -> bool {
        match self {
            Reach::Melee(range) => distance < range,
            Reach::Radius(radius) => distance <= radius,
            Reach::Everywhere => true,
        }
    }
}

/// Damage every living enemy within `reach` of `player_x`. Returns how many
/// enemies were hit.
pub fn strike(
    world: &mut World,
    player_x: f64,
    reach: Reach,
    damage: u32,
    events: &mut Vec<GameEvent>,
) -> usize {
    let mut hits: Vec<(SpawnOrder, u32, u32)> = Vec::new();

    for (_entity, (body, health, brain, order)) in
        world.query_mut::<(&Body, &mut Health, &EnemyBrain, &SpawnOrder)>()
    {
        if !health.is_alive() || !reach.contains(body.horizontal_distance_to(player_x)) {
            continue;
        }
        let amount = incoming_damage(brain, damage);
        health.take_damage(i64::from(amount));
        hits.push((*order, amount, health.current()));
    }

    hits.sort_unstable_by_key(|(order, _, _)| *order);
    let count = hits.len();
    events.extend(hits.into_iter().map(|(order, amount, remaining)| {
        GameEvent::EnemyDamaged {
            id: order.0,
            amount,
            remaining,
        }
    }));
    count
}

fn incoming_damage(brain: &EnemyBrain, raw: u32) -> u32 {
    match &brain.archetype {
        ArchetypeState::Boss(state) => mitigate(state.phase, raw),
        _ => raw,
    }
}
