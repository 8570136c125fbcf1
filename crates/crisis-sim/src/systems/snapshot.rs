//! Snapshot system: builds a complete `GameStateSnapshot` from live state.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use crisis_core::components::{ArchetypeState, Enemy, EnemyBrain, SpawnOrder};
use crisis_core::events::GameEvent;
use crisis_core::state::*;
use crisis_core::types::{Body, Health, SimTime};

use crate::character::Player;
use crate::director::LevelRuntime;
use crate::engine::{FieldEffects, Session};

/// Build a complete snapshot. `events` are moved into it.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    session: &Session,
    player: Option<&Player>,
    director: Option<&LevelRuntime>,
    field: &FieldEffects,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let now = time.elapsed_ms;
    GameStateSnapshot {
        time: *time,
        screen: session.screen,
        current_level: session.current_level,
        selected_character: session.selected_character,
        score: session.score,
        player_lives: session.player_lives,
        player: player.map(|p| build_player(p, field, now)),
        enemies: build_enemies(world, player.map(|p| p.body.position.x), now),
        level: director.map(|d| d.view(now)),
        events,
    }
}

fn build_player(player: &Player, field: &FieldEffects, now: f64) -> PlayerView {
    let body = &player.body;
    PlayerView {
        character: player.kind(),
        x: body.position.x,
        y: body.position.y,
        width: body.size.x,
        height: body.size.y,
        velocity_x: body.velocity.x,
        velocity_y: body.velocity.y,
        health: player.health.current(),
        max_health: player.health.max(),
        is_jumping: player.is_jumping(),
        is_attacking: player.is_attacking(),
        attack_damage: player.attack_damage(),
        attack_range: player.attack_range(),
        abilities: player
            .abilities()
            .iter()
            .map(|a| AbilityView {
                name: a.spec.name.to_owned(),
                description: a.spec.description.to_owned(),
                cooldown_ms: a.spec.cooldown_ms,
                last_used_ms: a.last_used_ms,
                ready: a.is_ready(now),
            })
            .collect(),
        hacking_active: player.is_hacking(),
        combat_training: player.in_combat_training(),
        hidden: player.is_hidden(),
        information_gathered: player.information_gathered(),
        systems_controlled: player.systems_controlled(),
        enemies_revealed: field.reveal_until_ms.is_some(),
        enemy_attacks_suppressed: field.suppress_until_ms.is_some(),
    }
}

fn build_enemies(world: &World, player_x: Option<f64>, now: f64) -> Vec<EnemyView> {
    let mut enemies: Vec<(SpawnOrder, EnemyView)> = world
        .query::<(&Enemy, &Body, &Health, &EnemyBrain, &SpawnOrder)>()
        .iter()
        .map(|(_, (enemy, body, health, brain, order))| {
            let facing = match player_x {
                Some(x) if x < body.position.x => -1.0,
                Some(_) => 1.0,
                None => -1.0,
            };
            let (aiming, charging, boss_phase, clones) = match &brain.archetype {
                ArchetypeState::Plain => (false, false, None, Vec::new()),
                ArchetypeState::Aim(aim) => (aim.aiming_since_ms.is_some(), false, None, Vec::new()),
                ArchetypeState::Charge(charge) => (
                    false,
                    charge.charging_until_ms.is_some_and(|until| now < until),
                    None,
                    Vec::new(),
                ),
                ArchetypeState::Boss(boss) => (
                    false,
                    false,
                    Some(boss.phase.number()),
                    boss.clones
                        .iter()
                        .map(|c| CloneView {
                            x: c.x,
                            y: c.y,
                            active: c.active,
                        })
                        .collect(),
                ),
            };
            let view = EnemyView {
                id: order.0,
                kind: enemy.kind,
                behavior: brain.ai.behavior,
                x: body.position.x,
                y: body.position.y,
                width: body.size.x,
                height: body.size.y,
                health: health.current(),
                max_health: health.max(),
                attack_power: enemy.attack_power,
                is_attacking: brain.attacking_until_ms.is_some_and(|until| now < until),
                facing,
                aiming,
                charging,
                boss_phase,
                clones,
            };
            (*order, view)
        })
        .collect();
    enemies.sort_unstable_by_key(|(order, _)| *order);
    enemies.into_iter().map(|(_, view)| view).collect()
}
