//! Level definitions: compiled-in configuration for the five levels.
//!
//! Each level carries its narrative text, enemy spawn table (grouped into
//! waves, with optional delays), environmental hazards, special mechanics and
//! an optional time limit.

use crisis_core::constants::*;
use crisis_core::enums::{AiBehavior, CharacterKind, HazardKind, MechanicKind};
use crisis_core::types::Aabb;

/// One entry in a level's spawn table.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawn {
    /// Enemy archetype id as authored in level data.
    pub enemy: &'static str,
    pub x: f64,
    pub y: f64,
    pub count: u32,
    pub wave: u32,
    /// Level time before this entry materializes.
    pub delay_ms: f64,
    /// Replaces the archetype's default behavior.
    pub behavior: Option<AiBehavior>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HazardSpec {
    pub kind: HazardKind,
    pub bounds: Aabb,
    /// Damage per tick of overlap while active.
    pub damage: u32,
    /// Square-wave period; `None` means always active.
    pub cycle_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MechanicSpec {
    pub kind: MechanicKind,
    pub bounds: Aabb,
    /// Only this archetype may activate the mechanic.
    pub character: Option<CharacterKind>,
    pub effect: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelConfig {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub objective: &'static str,
    pub background_theme: &'static str,
    pub spawns: Vec<EnemySpawn>,
    pub hazards: Vec<HazardSpec>,
    pub mechanics: Vec<MechanicSpec>,
    pub time_limit_secs: Option<u32>,
}

/// Build the configuration for `number` (1-based). `None` past the last level.
pub fn build_level(number: u8) -> Option<LevelConfig> {
    let (title, description, objective, background_theme) = narrative(number)?;
    Some(LevelConfig {
        number,
        title,
        description,
        objective,
        background_theme,
        spawns: build_spawns(number),
        hazards: build_hazards(number),
        mechanics: build_mechanics(number),
        time_limit_secs: time_limit_secs(number),
    })
}

/// Levels from `TIME_LIMIT_FIRST_LEVEL` on carry a shrinking time budget.
pub fn time_limit_secs(number: u8) -> Option<u32> {
    (number >= TIME_LIMIT_FIRST_LEVEL).then(|| {
        TIME_LIMIT_BASE_SECS.saturating_sub(TIME_LIMIT_PER_LEVEL_SECS * u32::from(number))
    })
}

fn narrative(number: u8) -> Option<(&'static str, &'static str, &'static str, &'static str)> {
    let entry = match number {
        1 => (
            "THE TRAIL BEGINS",
            "Intelligence suggests the kidnappers fled Moscow heading west. Your first task is to track their movements and identify their next destination.",
            "Eliminate the Syndicate's advance scouts and gather intelligence on their route.",
            "moscow_streets",
        ),
        2 => (
            "BORDER CROSSING",
            "The trail leads to the Belarus border. The Syndicate has established a smuggling operation here, moving Svetlana deeper into their territory.",
            "Infiltrate the border operation and discover the location of their main stronghold.",
            "belarus_border",
        ),
        3 => (
            "THE STRONGHOLD",
            "You've located their primary base of operations - an abandoned Soviet military facility. This is where they're holding Svetlana, but it's heavily fortified.",
            "Breach the facility's defenses and locate the prisoner.",
            "abandoned_facility",
        ),
        4 => (
            "THE INNER SANCTUM",
            "You're inside the facility, but Svetlana has been moved to the most secure section. The Syndicate's elite guards and automated defenses stand in your way.",
            "Navigate the facility's deadliest security measures and reach the high-security detention area.",
            "high_security_compound",
        ),
        5 => (
            "FINAL CONFRONTATION",
            "You've found Svetlana, but the Syndicate's leader - a figure known only as 'The Shadow' - stands between you and escape. This enhanced super-soldier won't go down easily.",
            "Defeat The Shadow and escape with Svetlana before the nuclear countdown reaches zero.",
            "shadow_lair",
        ),
        _ => return None,
    };
    Some(entry)
}

fn spawn(enemy: &'static str, x: f64, y: f64, count: u32, wave: u32, delay_ms: f64) -> EnemySpawn {
    EnemySpawn {
        enemy,
        x,
        y,
        count,
        wave,
        delay_ms,
        behavior: None,
    }
}

fn build_spawns(number: u8) -> Vec<EnemySpawn> {
    let ground = ENEMY_GROUND_Y;
    let perch = 350.0;
    match number {
        1 => vec![
            spawn("grunt", 800.0, ground, 3, 1, 0.0),
            spawn("grunt", 1000.0, ground, 2, 2, 5000.0),
        ],
        2 => vec![
            spawn("grunt", 700.0, ground, 2, 1, 0.0),
            spawn("enforcer", 900.0, ground, 1, 1, 3000.0),
            // Border patrol.
            EnemySpawn {
                behavior: Some(AiBehavior::Patrol),
                ..spawn("grunt", 1100.0, ground, 2, 2, 8000.0)
            },
        ],
        3 => vec![
            spawn("grunt", 600.0, ground, 2, 1, 0.0),
            spawn("enforcer", 800.0, ground, 1, 1, 2000.0),
            spawn("sniper", 1000.0, perch, 1, 2, 5000.0),
            spawn("grunt", 1200.0, ground, 2, 3, 10_000.0),
        ],
        4 => vec![
            spawn("enforcer", 600.0, ground, 1, 1, 0.0),
            spawn("sniper", 800.0, perch, 1, 1, 1000.0),
            spawn("grunt", 1000.0, ground, 3, 2, 4000.0),
            spawn("enforcer", 1200.0, ground, 2, 3, 8000.0),
        ],
        5 => vec![
            spawn("enforcer", 500.0, ground, 1, 1, 0.0),
            spawn("sniper", 700.0, perch, 1, 1, 2000.0),
            spawn("grunt", 900.0, ground, 2, 2, 5000.0),
            spawn("shadow_boss", 1100.0, perch, 1, 3, 15_000.0),
        ],
        _ => Vec::new(),
    }
}

fn hazard(
    kind: HazardKind,
    (x, y, w, h): (f64, f64, f64, f64),
    damage: u32,
    cycle_ms: Option<f64>,
) -> HazardSpec {
    HazardSpec {
        kind,
        bounds: Aabb::new(x, y, w, h),
        damage,
        cycle_ms,
    }
}

fn build_hazards(number: u8) -> Vec<HazardSpec> {
    use HazardKind::*;
    match number {
        2 => vec![hazard(Pit, (400.0, 500.0, 100.0, 100.0), 20, None)],
        3 => vec![
            hazard(Laser, (500.0, 300.0, 20.0, 200.0), 15, Some(3000.0)),
            hazard(Electric, (800.0, 480.0, 150.0, 20.0), 10, Some(2000.0)),
        ],
        4 => vec![
            hazard(Laser, (300.0, 200.0, 20.0, 300.0), 20, Some(2500.0)),
            hazard(Gas, (600.0, 400.0, 200.0, 100.0), 5, Some(4000.0)),
            hazard(Electric, (1000.0, 480.0, 100.0, 20.0), 15, Some(1500.0)),
        ],
        5 => vec![
            hazard(Laser, (200.0, 100.0, 20.0, 400.0), 25, Some(2000.0)),
            hazard(Laser, (600.0, 100.0, 20.0, 400.0), 25, Some(2000.0)),
            hazard(Gas, (800.0, 300.0, 300.0, 200.0), 8, Some(3000.0)),
        ],
        _ => Vec::new(),
    }
}

fn mechanic(
    kind: MechanicKind,
    (x, y, w, h): (f64, f64, f64, f64),
    character: CharacterKind,
    effect: &'static str,
) -> MechanicSpec {
    MechanicSpec {
        kind,
        bounds: Aabb::new(x, y, w, h),
        character: Some(character),
        effect,
    }
}

fn build_mechanics(number: u8) -> Vec<MechanicSpec> {
    use CharacterKind::*;
    use MechanicKind::*;
    match number {
        1 => vec![mechanic(
            InformationSource,
            (300.0, 450.0, 40.0, 50.0),
            Journalist,
            "Reveals enemy positions for 10 seconds",
        )],
        2 => vec![
            mechanic(
                HackingTerminal,
                (250.0, 400.0, 50.0, 60.0),
                Developer,
                "Disables security cameras and alarms",
            ),
            mechanic(
                StealthZone,
                (500.0, 400.0, 100.0, 100.0),
                Agent,
                "Provides temporary invisibility",
            ),
        ],
        3 => vec![
            mechanic(
                CyberNode,
                (200.0, 350.0, 40.0, 40.0),
                Hacker,
                "Takes control of facility security systems",
            ),
            mechanic(
                InformationSource,
                (400.0, 400.0, 40.0, 50.0),
                Journalist,
                "Reveals facility layout and enemy patrol routes",
            ),
        ],
        4 => vec![
            mechanic(
                HackingTerminal,
                (150.0, 350.0, 50.0, 60.0),
                Developer,
                "Overrides security protocols",
            ),
            mechanic(
                StealthZone,
                (700.0, 300.0, 120.0, 120.0),
                Agent,
                "Allows bypassing heavily guarded areas",
            ),
            mechanic(
                CyberNode,
                (1000.0, 300.0, 40.0, 40.0),
                Hacker,
                "Disrupts enemy communications",
            ),
        ],
        5 => vec![
            mechanic(
                HackingTerminal,
                (100.0, 300.0, 50.0, 60.0),
                Developer,
                "Accesses Shadow Syndicate mainframe",
            ),
            mechanic(
                InformationSource,
                (300.0, 350.0, 40.0, 50.0),
                Journalist,
                "Discovers Svetlana's exact location",
            ),
            mechanic(
                StealthZone,
                (500.0, 250.0, 150.0, 150.0),
                Agent,
                "Provides tactical advantage against The Shadow",
            ),
            mechanic(
                CyberNode,
                (800.0, 250.0, 40.0, 40.0),
                Hacker,
                "Weakens The Shadow's cybernetic enhancements",
            ),
        ],
        _ => Vec::new(),
    }
}
