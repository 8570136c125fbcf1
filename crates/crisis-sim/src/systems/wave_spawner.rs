//! Wave spawning system: materializes level spawn entries once due.

use hecs::World;
use log::debug;

use crisis_core::constants::SPAWN_SPACING;
use crisis_core::events::GameEvent;

use crate::director::LevelRuntime;
use crate::world_setup;

/// Spawn every entry the director releases this tick. Returns the number of
/// enemies spawned.
pub fn run(
    world: &mut World,
    director: &mut LevelRuntime,
    now_ms: f64,
    next_order: &mut u64,
    events: &mut Vec<GameEvent>,
) -> usize {
    let level = director.number();
    let release = director.release_due(now_ms, SPAWN_SPACING);

    for request in &release.spawns {
        let id = *next_order;
        let (_entity, kind) = world_setup::spawn_enemy(world, request, level, next_order);
        debug!("spawned {kind:?} #{id} at x={}", request.x);
        events.push(GameEvent::EnemySpawned {
            id,
            kind,
            x: request.x,
        });
    }
    for wave in release.waves {
        debug!("level {level} wave {wave} released");
        events.push(GameEvent::WaveReleased { level, wave });
    }

    release.spawns.len()
}
