//! Player character model.
//!
//! A single `Player` type serves every archetype. Per-archetype behavior comes
//! from a static [`Archetype`] descriptor: base stats plus a table of three
//! abilities, each naming the hook it triggers. Timed toggles (hacking,
//! combat training, stealth) are expiry timestamps in simulation time and are
//! cleared by [`Player::expire_effects`] at the top of each tick.

use glam::DVec2;

use crisis_core::constants::*;
use crisis_core::enums::CharacterKind;
use crisis_core::error::CoreError;
use crisis_core::types::{Body, Health};

/// Side effect an ability triggers when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityHook {
    Hacking,
    SatelliteTracking,
    SystemOverride,
    SourceNetwork,
    PublicAccess,
    InformationAnalysis,
    Stealth,
    CombatTraining,
    TacticalStrike,
    SystemControl,
    DigitalInvisibility,
    CyberWarfare,
}

#[derive(Debug)]
pub struct AbilitySpec {
    pub name: &'static str,
    pub description: &'static str,
    pub cooldown_ms: f64,
    pub hook: AbilityHook,
}

/// Static descriptor for a playable archetype.
#[derive(Debug)]
pub struct Archetype {
    pub kind: CharacterKind,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub max_health: u32,
    pub attack_damage: u32,
    pub attack_range: f64,
    pub attack_cooldown_ms: f64,
    pub abilities: [AbilitySpec; 3],
}

static DEVELOPER: Archetype = Archetype {
    kind: CharacterKind::Developer,
    name: "Ammar Hassan",
    title: "Elite Software Engineer",
    description: "Master of digital infiltration and cyber tracking",
    max_health: 100,
    attack_damage: BASE_ATTACK_DAMAGE,
    attack_range: BASE_ATTACK_RANGE,
    attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
    abilities: [
        AbilitySpec {
            name: "Digital Infiltration",
            description: "Hack nearby electronic systems to disable enemy defenses",
            cooldown_ms: 8000.0,
            hook: AbilityHook::Hacking,
        },
        AbilitySpec {
            name: "Satellite Tracking",
            description: "Reveal all enemy positions on the map",
            cooldown_ms: 15_000.0,
            hook: AbilityHook::SatelliteTracking,
        },
        AbilitySpec {
            name: "System Override",
            description: "Temporarily disable all enemy attacks",
            cooldown_ms: 20_000.0,
            hook: AbilityHook::SystemOverride,
        },
    ],
};

static JOURNALIST: Archetype = Archetype {
    kind: CharacterKind::Journalist,
    name: "Nadia Volkov",
    title: "Investigative Journalist",
    description: "Expert in information gathering and source networks",
    max_health: 100,
    attack_damage: BASE_ATTACK_DAMAGE,
    attack_range: BASE_ATTACK_RANGE,
    attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
    abilities: [
        AbilitySpec {
            name: "Source Network",
            description: "Gather intelligence from contacts to reveal enemy weaknesses",
            cooldown_ms: 10_000.0,
            hook: AbilityHook::SourceNetwork,
        },
        AbilitySpec {
            name: "Public Access",
            description: "Use journalist credentials to bypass certain enemy defenses",
            cooldown_ms: 12_000.0,
            hook: AbilityHook::PublicAccess,
        },
        AbilitySpec {
            name: "Information Analysis",
            description: "Analyze gathered data to predict enemy movements",
            cooldown_ms: 18_000.0,
            hook: AbilityHook::InformationAnalysis,
        },
    ],
};

static AGENT: Archetype = Archetype {
    kind: CharacterKind::Agent,
    name: "Marcus Steel",
    title: "Former Special Forces",
    description: "Combat specialist with tactical expertise",
    max_health: AGENT_MAX_HEALTH,
    attack_damage: AGENT_BASE_DAMAGE,
    attack_range: BASE_ATTACK_RANGE,
    attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
    abilities: [
        AbilitySpec {
            name: "Stealth Mode",
            description: "Become temporarily invisible to enemies",
            cooldown_ms: 15_000.0,
            hook: AbilityHook::Stealth,
        },
        AbilitySpec {
            name: "Combat Training",
            description: "Increase attack damage and speed for a short time",
            cooldown_ms: 12_000.0,
            hook: AbilityHook::CombatTraining,
        },
        AbilitySpec {
            name: "Tactical Strike",
            description: "Perform a devastating area attack",
            cooldown_ms: 20_000.0,
            hook: AbilityHook::TacticalStrike,
        },
    ],
};

static HACKER: Archetype = Archetype {
    kind: CharacterKind::Hacker,
    name: "Zero",
    title: "Cyber Warfare Specialist",
    description: "Anonymous digital warrior with system control abilities",
    max_health: 100,
    attack_damage: HACKER_BASE_DAMAGE,
    attack_range: BASE_ATTACK_RANGE,
    attack_cooldown_ms: PLAYER_ATTACK_COOLDOWN_MS,
    abilities: [
        AbilitySpec {
            name: "System Control",
            description: "Take control of enemy electronic systems",
            cooldown_ms: 8000.0,
            hook: AbilityHook::SystemControl,
        },
        AbilitySpec {
            name: "Digital Invisibility",
            description: "Become undetectable by electronic surveillance",
            cooldown_ms: 18_000.0,
            hook: AbilityHook::DigitalInvisibility,
        },
        AbilitySpec {
            name: "Cyber Warfare",
            description: "Launch a devastating cyber attack on all enemies",
            cooldown_ms: 25_000.0,
            hook: AbilityHook::CyberWarfare,
        },
    ],
};

/// Descriptor for an archetype.
pub fn archetype(kind: CharacterKind) -> &'static Archetype {
    match kind {
        CharacterKind::Developer => &DEVELOPER,
        CharacterKind::Journalist => &JOURNALIST,
        CharacterKind::Agent => &AGENT,
        CharacterKind::Hacker => &HACKER,
    }
}

/// Effect of a successful ability use that reaches beyond the player.
/// The engine resolves it in the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityEffect {
    /// Only the player's own state changed.
    None,
    /// Enemy positions revealed to the presentation layer.
    Reveal { duration_ms: f64 },
    /// Enemies cannot start attacks.
    SuppressEnemyAttacks { duration_ms: f64 },
    /// Damage every enemy within `radius` of the player.
    AreaStrike { radius: f64, damage: u32 },
    /// Damage every active enemy.
    GlobalStrike { damage: u32 },
}

/// Runtime state of one ability slot.
#[derive(Debug, Clone, Copy)]
pub struct Ability {
    pub spec: &'static AbilitySpec,
    /// `None` until first use, so every ability starts ready.
    pub last_used_ms: Option<f64>,
}

impl Ability {
    pub fn is_ready(&self, now_ms: f64) -> bool {
        self.remaining_ms(now_ms) <= 0.0
    }

    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        self.last_used_ms
            .map_or(0.0, |last| self.spec.cooldown_ms - (now_ms - last))
    }
}

/// The player-controlled character.
#[derive(Debug, Clone)]
pub struct Player {
    archetype: &'static Archetype,
    pub body: Body,
    pub health: Health,
    abilities: Vec<Ability>,
    last_attack_ms: Option<f64>,
    attacking_until_ms: Option<f64>,
    hacking_until_ms: Option<f64>,
    training_until_ms: Option<f64>,
    hidden_until_ms: Option<f64>,
    information_gathered: u32,
    systems_controlled: u32,
}

impl Player {
    /// A fresh character at the level start position.
    pub fn new(kind: CharacterKind) -> Self {
        let archetype = archetype(kind);
        Self {
            archetype,
            body: Body::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            health: Health::new(archetype.max_health),
            abilities: archetype
                .abilities
                .iter()
                .map(|spec| Ability {
                    spec,
                    last_used_ms: None,
                })
                .collect(),
            last_attack_ms: None,
            attacking_until_ms: None,
            hacking_until_ms: None,
            training_until_ms: None,
            hidden_until_ms: None,
            information_gathered: 0,
            systems_controlled: 0,
        }
    }

    pub fn kind(&self) -> CharacterKind {
        self.archetype.kind
    }

    pub fn archetype(&self) -> &'static Archetype {
        self.archetype
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn is_jumping(&self) -> bool {
        self.body.airborne
    }

    /// Start a jump if standing on the ground.
    pub fn jump(&mut self) -> bool {
        if self.body.airborne {
            return false;
        }
        self.body.velocity.y = PLAYER_JUMP_VELOCITY;
        self.body.airborne = true;
        true
    }

    /// Attack if the cooldown has elapsed. Returns whether the attack happened.
    pub fn attack(&mut self, now_ms: f64) -> bool {
        let ready = self
            .last_attack_ms
            .map_or(true, |last| now_ms - last >= self.archetype.attack_cooldown_ms);
        if !ready {
            return false;
        }
        self.last_attack_ms = Some(now_ms);
        self.attacking_until_ms = Some(now_ms + PLAYER_ATTACK_FLASH_MS);
        true
    }

    /// Use the ability in slot `index`. A rejected use changes nothing.
    pub fn use_ability(&mut self, index: usize, now_ms: f64) -> Result<AbilityEffect, CoreError> {
        let count = self.abilities.len();
        let ability = self
            .abilities
            .get_mut(index)
            .ok_or(CoreError::InvalidAbilityIndex { index, count })?;
        if !ability.is_ready(now_ms) {
            return Err(CoreError::AbilityOnCooldown {
                name: ability.spec.name.to_owned(),
                remaining_ms: ability.remaining_ms(now_ms),
            });
        }
        ability.last_used_ms = Some(now_ms);
        let hook = ability.spec.hook;
        Ok(self.apply_hook(hook, now_ms))
    }

    fn apply_hook(&mut self, hook: AbilityHook, now_ms: f64) -> AbilityEffect {
        match hook {
            AbilityHook::Hacking => {
                self.hacking_until_ms = Some(now_ms + DEVELOPER_HACKING_DURATION_MS);
                AbilityEffect::None
            }
            AbilityHook::SatelliteTracking | AbilityHook::InformationAnalysis => {
                AbilityEffect::Reveal {
                    duration_ms: REVEAL_DURATION_MS,
                }
            }
            AbilityHook::SystemOverride => AbilityEffect::SuppressEnemyAttacks {
                duration_ms: SYSTEM_OVERRIDE_DURATION_MS,
            },
            AbilityHook::SourceNetwork => {
                self.information_gathered = self.information_gathered.saturating_add(1);
                AbilityEffect::None
            }
            AbilityHook::PublicAccess => AbilityEffect::None,
            AbilityHook::Stealth => {
                self.hidden_until_ms = Some(now_ms + AGENT_STEALTH_DURATION_MS);
                AbilityEffect::None
            }
            AbilityHook::CombatTraining => {
                self.training_until_ms = Some(now_ms + AGENT_TRAINING_DURATION_MS);
                AbilityEffect::None
            }
            AbilityHook::TacticalStrike => AbilityEffect::AreaStrike {
                radius: TACTICAL_STRIKE_RADIUS,
                damage: TACTICAL_STRIKE_DAMAGE,
            },
            AbilityHook::SystemControl => {
                self.systems_controlled = self.systems_controlled.saturating_add(1);
                AbilityEffect::None
            }
            AbilityHook::DigitalInvisibility => {
                self.hidden_until_ms = Some(now_ms + HACKER_INVISIBILITY_DURATION_MS);
                AbilityEffect::None
            }
            AbilityHook::CyberWarfare => AbilityEffect::GlobalStrike {
                damage: CYBER_WARFARE_DAMAGE,
            },
        }
    }

    /// Clear every timed toggle whose expiry is at or before `now_ms`.
    pub fn expire_effects(&mut self, now_ms: f64) {
        for timer in [
            &mut self.attacking_until_ms,
            &mut self.hacking_until_ms,
            &mut self.training_until_ms,
            &mut self.hidden_until_ms,
        ] {
            if timer.is_some_and(|until| now_ms >= until) {
                *timer = None;
            }
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking_until_ms.is_some()
    }

    pub fn is_hacking(&self) -> bool {
        self.hacking_until_ms.is_some()
    }

    pub fn in_combat_training(&self) -> bool {
        self.training_until_ms.is_some()
    }

    /// Stealth or digital invisibility.
    pub fn is_hidden(&self) -> bool {
        self.hidden_until_ms.is_some()
    }

    pub fn information_gathered(&self) -> u32 {
        self.information_gathered
    }

    pub fn systems_controlled(&self) -> u32 {
        self.systems_controlled
    }

    /// Current melee damage including archetype modifiers.
    pub fn attack_damage(&self) -> u32 {
        let base = self.archetype.attack_damage;
        match self.archetype.kind {
            CharacterKind::Developer => base,
            CharacterKind::Journalist => {
                base.saturating_add(JOURNALIST_DAMAGE_PER_INFO.saturating_mul(self.information_gathered))
            }
            CharacterKind::Agent if self.in_combat_training() => {
                (f64::from(base) * AGENT_TRAINING_MULTIPLIER).floor() as u32
            }
            CharacterKind::Agent => base,
            CharacterKind::Hacker => {
                base.saturating_add(HACKER_DAMAGE_PER_SYSTEM.saturating_mul(self.systems_controlled))
            }
        }
    }

    /// Current melee reach including archetype modifiers.
    pub fn attack_range(&self) -> f64 {
        match self.archetype.kind {
            CharacterKind::Developer if self.is_hacking() => DEVELOPER_HACKING_RANGE,
            CharacterKind::Agent if self.in_combat_training() => AGENT_TRAINING_RANGE,
            _ => self.archetype.attack_range,
        }
    }

    /// Refill health and return to the start position after losing a life.
    pub fn respawn(&mut self) {
        self.health.restore();
        self.return_to_start();
    }

    /// Back to the level start position, at rest. Health is kept.
    pub fn return_to_start(&mut self) {
        self.body.position = DVec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.body.velocity = DVec2::ZERO;
        self.body.airborne = false;
    }
}
