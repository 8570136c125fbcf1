//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Top-level screen state machine.
///
/// `Intro -> CharacterSelect -> Playing -> {Victory | GameOver}`; the two
/// terminal screens return to `Intro` only through an explicit restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Intro,
    CharacterSelect,
    Playing,
    Victory,
    GameOver,
}

impl Screen {
    /// Whether this screen ends a run.
    pub fn is_terminal(self) -> bool {
        matches!(self, Screen::Victory | Screen::GameOver)
    }
}

/// Playable character archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterKind {
    Developer,
    Journalist,
    Agent,
    Hacker,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 4] = [
        CharacterKind::Developer,
        CharacterKind::Journalist,
        CharacterKind::Agent,
        CharacterKind::Hacker,
    ];

    /// Stable identifier used by the presentation layer.
    pub fn id(self) -> &'static str {
        match self {
            CharacterKind::Developer => "developer",
            CharacterKind::Journalist => "journalist",
            CharacterKind::Agent => "agent",
            CharacterKind::Hacker => "hacker",
        }
    }

    /// Archetype bound to a character-select digit (1-4).
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            1 => Some(CharacterKind::Developer),
            2 => Some(CharacterKind::Journalist),
            3 => Some(CharacterKind::Agent),
            4 => Some(CharacterKind::Hacker),
            _ => None,
        }
    }
}

impl FromStr for CharacterKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| CoreError::UnknownCharacter(s.to_owned()))
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    #[default]
    Grunt,
    Enforcer,
    Sniper,
    #[serde(rename = "shadow_boss")]
    Boss,
}

impl EnemyKind {
    /// Resolve a level-data identifier. Unrecognised ids degrade to the
    /// weakest archetype so bad level data never stalls the simulation.
    pub fn from_id(id: &str) -> Self {
        match id {
            "enforcer" => EnemyKind::Enforcer,
            "sniper" => EnemyKind::Sniper,
            "shadow_boss" | "boss" => EnemyKind::Boss,
            _ => EnemyKind::Grunt,
        }
    }

    pub fn is_boss(self) -> bool {
        self == EnemyKind::Boss
    }
}

/// Enemy behavior state machine kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiBehavior {
    #[default]
    Aggressive,
    Patrol,
    Defensive,
    Boss,
}

/// Boss health phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    One,
    Two,
    Three,
}

impl BossPhase {
    pub fn number(self) -> u8 {
        match self {
            BossPhase::One => 1,
            BossPhase::Two => 2,
            BossPhase::Three => 3,
        }
    }
}

/// Phase-dependent boss special attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossSpecial {
    /// Single-target strike (phase 1).
    ShadowStrike,
    /// Wide area wave (phase 2).
    ShadowWave,
    /// Multi-projectile storm (phase 3).
    ShadowStorm,
}

impl BossSpecial {
    pub fn for_phase(phase: BossPhase) -> Self {
        match phase {
            BossPhase::One => BossSpecial::ShadowStrike,
            BossPhase::Two => BossSpecial::ShadowWave,
            BossPhase::Three => BossSpecial::ShadowStorm,
        }
    }
}

/// Environmental hazard kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Pit,
    Laser,
    Electric,
    Gas,
}

/// Level-placed interactable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechanicKind {
    HackingTerminal,
    InformationSource,
    StealthZone,
    CyberNode,
}
