//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick.
//!
//! Every type here is an owned value; a snapshot can be retained and compared
//! across polls without observing later mutation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub screen: Screen,
    pub current_level: u8,
    pub selected_character: Option<CharacterKind>,
    pub score: u32,
    pub player_lives: u32,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub level: Option<LevelView>,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub character: CharacterKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub health: u32,
    pub max_health: u32,
    pub is_jumping: bool,
    pub is_attacking: bool,
    pub attack_damage: u32,
    pub attack_range: f64,
    pub abilities: Vec<AbilityView>,
    pub hacking_active: bool,
    pub combat_training: bool,
    /// Stealth or digital invisibility is up.
    pub hidden: bool,
    pub information_gathered: u32,
    pub systems_controlled: u32,
    pub enemies_revealed: bool,
    pub enemy_attacks_suppressed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityView {
    pub name: String,
    pub description: String,
    pub cooldown_ms: f64,
    pub last_used_ms: Option<f64>,
    pub ready: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyView {
    pub id: u64,
    pub kind: EnemyKind,
    pub behavior: AiBehavior,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub health: u32,
    pub max_health: u32,
    pub attack_power: u32,
    pub is_attacking: bool,
    /// +1 facing right, -1 facing left (always toward the player).
    pub facing: f64,
    pub aiming: bool,
    pub charging: bool,
    pub boss_phase: Option<u8>,
    pub clones: Vec<CloneView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloneView {
    pub x: f64,
    pub y: f64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelView {
    pub level_number: u8,
    pub title: String,
    pub description: String,
    pub objective: String,
    pub background_theme: String,
    pub current_wave: u32,
    pub total_waves: u32,
    pub all_waves_released: bool,
    pub time_remaining_secs: Option<u32>,
    pub hazards: Vec<HazardView>,
    pub mechanics: Vec<MechanicView>,
    pub completed_objectives: Vec<String>,
    pub progress: ProgressView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardView {
    pub kind: HazardKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub damage: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicView {
    pub kind: MechanicKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub character_specific: Option<CharacterKind>,
    pub activated: bool,
    pub effect: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressView {
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}
