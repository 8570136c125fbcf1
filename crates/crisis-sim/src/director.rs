//! Level director: runtime state of the level being played.
//!
//! Releases spawn entries once their delay has elapsed, cycles hazards,
//! gates special mechanics, tracks waves and objectives, and decides when the
//! level is complete. All timing is relative to the level start in
//! simulation milliseconds.

use std::collections::BTreeSet;

use crisis_core::enums::{AiBehavior, CharacterKind, MechanicKind};
use crisis_core::error::CoreError;
use crisis_core::state::{HazardView, LevelView, MechanicView, ProgressView};
use crisis_core::types::Aabb;

use crate::level::{HazardSpec, LevelConfig};

/// An enemy the director wants materialized this tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub enemy: &'static str,
    pub x: f64,
    pub y: f64,
    pub behavior: Option<AiBehavior>,
}

/// Everything released by one call to [`LevelRuntime::release_due`].
#[derive(Debug, Default)]
pub struct Release {
    pub spawns: Vec<SpawnRequest>,
    /// Waves whose last entry fired this tick.
    pub waves: Vec<u32>,
}

/// Square-wave duty cycle: active for the first half of every period.
pub fn hazard_active(hazard: &HazardSpec, level_elapsed_ms: f64) -> bool {
    match hazard.cycle_ms {
        Some(period) if period > 0.0 => level_elapsed_ms.rem_euclid(period) < period / 2.0,
        _ => true,
    }
}

#[derive(Debug, Clone)]
pub struct LevelRuntime {
    config: LevelConfig,
    start_ms: f64,
    /// Reference point of the time limit; restarted when it runs out.
    time_limit_started_ms: f64,
    /// Remaining count per spawn entry; zeroed once the entry fires.
    remaining: Vec<u32>,
    released_waves: BTreeSet<u32>,
    activated: Vec<bool>,
    completed_objectives: Vec<String>,
    complete: bool,
}

impl LevelRuntime {
    pub fn new(config: LevelConfig, now_ms: f64) -> Self {
        let remaining = config.spawns.iter().map(|s| s.count).collect();
        let activated = vec![false; config.mechanics.len()];
        Self {
            config,
            start_ms: now_ms,
            time_limit_started_ms: now_ms,
            remaining,
            released_waves: BTreeSet::new(),
            activated,
            completed_objectives: Vec::new(),
            complete: false,
        }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn number(&self) -> u8 {
        self.config.number
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.start_ms
    }

    /// Materialize every spawn entry whose delay has elapsed. Each entry fires
    /// exactly once; its count is zeroed afterwards.
    pub fn release_due(&mut self, now_ms: f64, spacing: f64) -> Release {
        let elapsed = self.elapsed_ms(now_ms);
        let mut release = Release::default();

        for (entry, remaining) in self.config.spawns.iter().zip(self.remaining.iter_mut()) {
            if *remaining == 0 || elapsed < entry.delay_ms {
                continue;
            }
            release.spawns.extend((0..*remaining).map(|i| SpawnRequest {
                enemy: entry.enemy,
                x: entry.x + f64::from(i) * spacing,
                y: entry.y,
                behavior: entry.behavior,
            }));
            *remaining = 0;
        }

        for wave in self.wave_numbers() {
            if self.released_waves.contains(&wave) || !self.wave_spawned(wave) {
                continue;
            }
            self.released_waves.insert(wave);
            self.complete_objective(format!("wave-{wave}"));
            release.waves.push(wave);
        }

        release
    }

    fn wave_numbers(&self) -> BTreeSet<u32> {
        self.config.spawns.iter().map(|s| s.wave).collect()
    }

    fn wave_spawned(&self, wave: u32) -> bool {
        self.config
            .spawns
            .iter()
            .zip(&self.remaining)
            .filter(|(entry, _)| entry.wave == wave)
            .all(|(_, remaining)| *remaining == 0)
    }

    /// Highest wave released so far (0 before the first).
    pub fn current_wave(&self) -> u32 {
        self.released_waves.last().copied().unwrap_or(0)
    }

    pub fn total_waves(&self) -> u32 {
        self.wave_numbers().len() as u32
    }

    pub fn all_waves_released(&self) -> bool {
        self.remaining.iter().all(|r| *r == 0)
    }

    /// Complete once no enemies remain and every wave is out. Stays complete
    /// until a new level runtime replaces this one.
    pub fn check_complete(&mut self, active_enemies: usize) -> bool {
        if !self.complete && active_enemies == 0 && self.all_waves_released() {
            self.complete = true;
        }
        self.complete
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Summed damage of every active hazard overlapping `player`.
    pub fn hazard_damage(&self, player: &Aabb, now_ms: f64) -> u32 {
        let elapsed = self.elapsed_ms(now_ms);
        self.config
            .hazards
            .iter()
            .filter(|h| hazard_active(h, elapsed) && h.bounds.collides(player))
            .map(|h| h.damage)
            .fold(0u32, u32::saturating_add)
    }

    /// Indices of not-yet-activated mechanics overlapping `player`.
    pub fn overlapping_mechanics(&self, player: &Aabb) -> Vec<usize> {
        self.config
            .mechanics
            .iter()
            .enumerate()
            .filter(|(i, m)| !self.activated[*i] && m.bounds.collides(player))
            .map(|(i, _)| i)
            .collect()
    }

    /// Activate mechanic `index` for `character`. Activation happens at most
    /// once and is never undone.
    pub fn activate_mechanic(
        &mut self,
        index: usize,
        character: CharacterKind,
    ) -> Result<MechanicKind, CoreError> {
        let mechanic = self
            .config
            .mechanics
            .get(index)
            .ok_or(CoreError::InvalidMechanicIndex(index))?;
        if self.activated[index] {
            return Err(CoreError::MechanicAlreadyActive(index));
        }
        if let Some(required) = mechanic.character {
            if required != character {
                return Err(CoreError::MechanicRestricted { index, required });
            }
        }
        let kind = mechanic.kind;
        self.activated[index] = true;
        self.complete_objective(format!("mechanic-{index}"));
        Ok(kind)
    }

    pub fn is_mechanic_activated(&self, index: usize) -> bool {
        self.activated.get(index).copied().unwrap_or(false)
    }

    fn complete_objective(&mut self, objective: String) {
        if !self.completed_objectives.contains(&objective) {
            self.completed_objectives.push(objective);
        }
    }

    /// Whole seconds left on the time limit, if the level has one.
    pub fn time_remaining_secs(&self, now_ms: f64) -> Option<u32> {
        let limit = self.config.time_limit_secs?;
        let used = ((now_ms - self.time_limit_started_ms) / 1000.0).floor().max(0.0) as u32;
        Some(limit.saturating_sub(used))
    }

    pub fn time_expired(&self, now_ms: f64) -> bool {
        self.time_remaining_secs(now_ms) == Some(0)
    }

    pub fn restart_time_limit(&mut self, now_ms: f64) {
        self.time_limit_started_ms = now_ms;
    }

    pub fn progress(&self) -> ProgressView {
        let total = self.total_waves() + self.config.mechanics.len() as u32;
        let completed = self.completed_objectives.len() as u32;
        let percentage = if total == 0 {
            100
        } else {
            completed * 100 / total
        };
        ProgressView {
            completed,
            total,
            percentage,
        }
    }

    pub fn view(&self, now_ms: f64) -> LevelView {
        let elapsed = self.elapsed_ms(now_ms);
        let config = &self.config;
        LevelView {
            level_number: config.number,
            title: config.title.to_owned(),
            description: config.description.to_owned(),
            objective: config.objective.to_owned(),
            background_theme: config.background_theme.to_owned(),
            current_wave: self.current_wave(),
            total_waves: self.total_waves(),
            all_waves_released: self.all_waves_released(),
            time_remaining_secs: self.time_remaining_secs(now_ms),
            hazards: config
                .hazards
                .iter()
                .map(|h| HazardView {
                    kind: h.kind,
                    x: h.bounds.min.x,
                    y: h.bounds.min.y,
                    width: h.bounds.size.x,
                    height: h.bounds.size.y,
                    damage: h.damage,
                    active: hazard_active(h, elapsed),
                })
                .collect(),
            mechanics: config
                .mechanics
                .iter()
                .zip(&self.activated)
                .map(|(m, activated)| MechanicView {
                    kind: m.kind,
                    x: m.bounds.min.x,
                    y: m.bounds.min.y,
                    width: m.bounds.size.x,
                    height: m.bounds.size.y,
                    character_specific: m.character,
                    activated: *activated,
                    effect: m.effect.to_owned(),
                })
                .collect(),
            completed_objectives: self.completed_objectives.clone(),
            progress: self.progress(),
        }
    }
}
