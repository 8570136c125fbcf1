//! Entity spawn factories for enemies.
//!
//! An enemy entity carries `(Enemy, Body, Health, EnemyBrain, SpawnOrder)`.

use hecs::{Entity, World};

use crisis_core::components::{Enemy, SpawnOrder};
use crisis_core::enums::{AiBehavior, EnemyKind};
use crisis_core::types::{Body, Health};

use crisis_ai::profiles::{get_profile, new_brain};

use crate::director::SpawnRequest;

/// Spawn a single enemy from a level spawn request. Unknown archetype ids
/// fall back to a grunt.
pub fn spawn_enemy(
    world: &mut World,
    request: &SpawnRequest,
    level: u8,
    next_order: &mut u64,
) -> (Entity, EnemyKind) {
    let kind = EnemyKind::from_id(request.enemy);
    let entity = spawn_enemy_of_kind(
        world,
        kind,
        level,
        request.x,
        request.y,
        request.behavior,
        next_order,
    );
    (entity, kind)
}

/// Spawn an enemy of a known archetype at `(x, y)`.
pub fn spawn_enemy_of_kind(
    world: &mut World,
    kind: EnemyKind,
    level: u8,
    x: f64,
    y: f64,
    behavior: Option<AiBehavior>,
    next_order: &mut u64,
) -> Entity {
    let profile = get_profile(kind, level);
    let order = SpawnOrder(*next_order);
    *next_order += 1;

    world.spawn((
        Enemy {
            kind,
            attack_power: profile.attack_power,
            level,
        },
        Body::new(x, y, profile.width, profile.height),
        Health::new(profile.max_health),
        new_brain(kind, &profile, x, behavior),
        order,
    ))
}

/// Active enemies in spawn order.
pub fn enemies_in_order(world: &World) -> Vec<Entity> {
    let mut ordered: Vec<(SpawnOrder, Entity)> = world
        .query::<&SpawnOrder>()
        .iter()
        .map(|(entity, order)| (*order, entity))
        .collect();
    ordered.sort_unstable_by_key(|(order, _)| *order);
    ordered.into_iter().map(|(_, entity)| entity).collect()
}
