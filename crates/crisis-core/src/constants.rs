//! Simulation constants and tuning parameters.
//!
//! Distances are in arena units (pixels of the 1200x600 play field, y grows
//! downward). Velocities are units per step. Times are milliseconds of
//! simulation time.

/// Nominal display refresh the host loop targets (Hz).
pub const TICK_RATE: u32 = 60;

/// Milliseconds per frame at the nominal refresh rate.
pub const FRAME_MS: f64 = 1000.0 / TICK_RATE as f64;

// --- Arena ---

/// Arena width. The player is clamped to `[0, ARENA_WIDTH - width]`.
pub const ARENA_WIDTH: f64 = 1200.0;

/// Arena height.
pub const ARENA_HEIGHT: f64 = 600.0;

// --- Physics ---

/// Ground line for the player's top edge.
pub const PLAYER_GROUND_Y: f64 = 400.0;

/// Ground line for enemies' top edge.
pub const ENEMY_GROUND_Y: f64 = 450.0;

/// Gravity applied to the player per step while jumping.
pub const PLAYER_GRAVITY: f64 = 0.8;

/// Gravity applied to enemies every step.
pub const ENEMY_GRAVITY: f64 = 0.5;

/// Horizontal velocity multiplier applied every step.
pub const FRICTION: f64 = 0.8;

// --- Player ---

/// Player spawn / respawn position.
pub const PLAYER_START_X: f64 = 100.0;
pub const PLAYER_START_Y: f64 = 400.0;

/// Player bounding box.
pub const PLAYER_WIDTH: f64 = 40.0;
pub const PLAYER_HEIGHT: f64 = 60.0;

/// Horizontal speed applied while an arrow key is held.
pub const PLAYER_MOVE_SPEED: f64 = 5.0;

/// Initial vertical velocity of a jump (negative is up).
pub const PLAYER_JUMP_VELOCITY: f64 = -15.0;

/// Lives at the start of a run.
pub const STARTING_LIVES: u32 = 4;

/// Attack cooldown shared by every archetype.
pub const PLAYER_ATTACK_COOLDOWN_MS: f64 = 500.0;

/// How long the "attacking" flag stays up after a successful attack.
pub const PLAYER_ATTACK_FLASH_MS: f64 = 200.0;

/// Attack range before archetype modifiers.
pub const BASE_ATTACK_RANGE: f64 = 60.0;

/// Attack damage before archetype modifiers.
pub const BASE_ATTACK_DAMAGE: u32 = 20;

// --- Archetype modifiers ---

pub const DEVELOPER_HACKING_RANGE: f64 = 120.0;
pub const DEVELOPER_HACKING_DURATION_MS: f64 = 3000.0;
pub const SYSTEM_OVERRIDE_DURATION_MS: f64 = 4000.0;
pub const REVEAL_DURATION_MS: f64 = 10_000.0;

pub const JOURNALIST_DAMAGE_PER_INFO: u32 = 5;

pub const AGENT_MAX_HEALTH: u32 = 120;
pub const AGENT_BASE_DAMAGE: u32 = 30;
pub const AGENT_TRAINING_MULTIPLIER: f64 = 1.5;
pub const AGENT_TRAINING_RANGE: f64 = 80.0;
pub const AGENT_TRAINING_DURATION_MS: f64 = 8000.0;
pub const AGENT_STEALTH_DURATION_MS: f64 = 5000.0;
pub const TACTICAL_STRIKE_RADIUS: f64 = 200.0;
pub const TACTICAL_STRIKE_DAMAGE: u32 = 40;

pub const HACKER_BASE_DAMAGE: u32 = 25;
pub const HACKER_DAMAGE_PER_SYSTEM: u32 = 3;
pub const HACKER_INVISIBILITY_DURATION_MS: f64 = 6000.0;
pub const CYBER_WARFARE_DAMAGE: u32 = 15;

// --- Enemies ---

/// How long an enemy's "attacking" flag stays up after an attack.
pub const ENEMY_ATTACK_FLASH_MS: f64 = 300.0;

/// Half-width of a patrol route around the spawn x.
pub const PATROL_HALF_WIDTH: f64 = 100.0;

/// Horizontal offset between enemies materialised from the same spawn entry.
pub const SPAWN_SPACING: f64 = 50.0;

// --- Enforcer charge ---

pub const CHARGE_ARM_RANGE: f64 = 200.0;
pub const CHARGE_TRIGGER_RANGE: f64 = 150.0;
pub const CHARGE_COOLDOWN_MS: f64 = 3000.0;
pub const CHARGE_SPEED: f64 = 8.0;
pub const CHARGE_DURATION_MS: f64 = 500.0;

/// Velocity multiplier applied when a charge burst ends.
pub const CHARGE_DECAY: f64 = 0.3;

// --- Sniper ---

/// Aim time required before a sniper can fire.
pub const SNIPER_AIM_MS: f64 = 1000.0;

// --- Boss ("The Shadow") ---

/// Health fraction at or below which phase 2 begins.
pub const BOSS_PHASE2_THRESHOLD: f64 = 0.66;

/// Health fraction at or below which phase 3 begins.
pub const BOSS_PHASE3_THRESHOLD: f64 = 0.33;

pub const BOSS_PHASE3_SPEED: f64 = 2.5;
pub const BOSS_PHASE3_ATTACK_COOLDOWN_MS: f64 = 500.0;

pub const BOSS_TELEPORT_COOLDOWN_MS: f64 = 3000.0;

/// The boss only teleports when farther than this from the player.
pub const BOSS_TELEPORT_MIN_DISTANCE: f64 = 100.0;

/// Distance to either side of the player the boss lands at.
pub const BOSS_TELEPORT_OFFSET: f64 = 100.0;

/// Horizontal bounds the boss may teleport into.
pub const BOSS_ARENA_MIN_X: f64 = 50.0;
pub const BOSS_ARENA_MAX_X: f64 = 1150.0;

pub const BOSS_SPECIAL_COOLDOWN_MS: f64 = 5000.0;

/// Offset of the illusory clones from the boss when phase 2 starts.
pub const BOSS_CLONE_OFFSET: f64 = 100.0;

/// Incoming damage multipliers (floored) for phases 2 and 3.
pub const BOSS_PHASE2_DAMAGE_FACTOR: f64 = 0.85;
pub const BOSS_PHASE3_DAMAGE_FACTOR: f64 = 0.7;

// --- Scoring ---

pub const SCORE_STANDARD_ENEMY: u32 = 25;
pub const SCORE_BOSS: u32 = 100;

// --- Levels ---

/// Number of levels in a run.
pub const LEVEL_COUNT: u8 = 5;

/// First level that carries a time limit.
pub const TIME_LIMIT_FIRST_LEVEL: u8 = 4;

/// Time limit is `TIME_LIMIT_BASE_SECS - TIME_LIMIT_PER_LEVEL_SECS * level`.
pub const TIME_LIMIT_BASE_SECS: u32 = 300;
pub const TIME_LIMIT_PER_LEVEL_SECS: u32 = 30;
