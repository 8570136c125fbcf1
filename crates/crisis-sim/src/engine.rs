//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world of enemies, the player, the level
//! director and the screen state machine. It processes queued player
//! commands, runs all systems once per `update`, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crisis_core::commands::{KeyCode, PlayerCommand};
use crisis_core::components::SpawnOrder;
use crisis_core::constants::*;
use crisis_core::enums::{CharacterKind, EnemyKind, MechanicKind, Screen};
use crisis_core::error::{CoreError, StepError};
use crisis_core::events::GameEvent;
use crisis_core::state::GameStateSnapshot;
use crisis_core::types::{Body, SimTime};

use crisis_ai::fsm::PlayerTarget;

use crate::character::{AbilityEffect, Player};
use crate::director::LevelRuntime;
use crate::level::build_level;
use crate::systems;
use crate::systems::combat::Reach;
use crate::systems::physics::PLAYER_PHYSICS;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    /// Lives at the start of every run.
    pub starting_lives: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_lives: STARTING_LIVES,
        }
    }
}

/// Run-level bookkeeping exposed in every snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub screen: Screen,
    pub current_level: u8,
    pub selected_character: Option<CharacterKind>,
    pub score: u32,
    pub player_lives: u32,
}

impl Session {
    fn initial(config: &SimConfig) -> Self {
        Self {
            screen: Screen::Intro,
            current_level: 1,
            selected_character: None,
            score: 0,
            player_lives: config.starting_lives,
        }
    }
}

/// Ability effects that act on every enemy rather than on the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldEffects {
    pub reveal_until_ms: Option<f64>,
    pub suppress_until_ms: Option<f64>,
}

impl FieldEffects {
    fn expire(&mut self, now_ms: f64) {
        for timer in [&mut self.reveal_until_ms, &mut self.suppress_until_ms] {
            if timer.is_some_and(|until| now_ms >= until) {
                *timer = None;
            }
        }
    }
}

/// Held keys and one-shot intents gathered from commands, consumed by the
/// next step.
#[derive(Debug, Clone, Default)]
struct InputState {
    left: bool,
    right: bool,
    jump: bool,
    attack: bool,
    interact: bool,
    abilities: Vec<usize>,
}

impl InputState {
    fn clear_intents(&mut self) {
        self.jump = false;
        self.attack = false;
        self.interact = false;
        self.abilities.clear();
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    session: Session,
    player: Option<Player>,
    director: Option<LevelRuntime>,
    field: FieldEffects,
    input: InputState,
    rng: ChaCha8Rng,
    next_spawn_order: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<(SpawnOrder, Entity, EnemyKind)>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine on the intro screen.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            session: Session::initial(&config),
            player: None,
            director: None,
            field: FieldEffects::default(),
            input: InputState::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_spawn_order: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Queue a player command for processing at the next step.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue a key press by DOM key code. Unknown keys are ignored.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match KeyCode::from_code(code) {
            Some(key) => {
                self.queue_command(PlayerCommand::KeyDown { key });
                true
            }
            None => {
                debug!("ignoring key {code}");
                false
            }
        }
    }

    /// Queue a key release by DOM key code.
    pub fn release_key(&mut self, code: &str) -> bool {
        match KeyCode::from_code(code) {
            Some(key) => {
                self.queue_command(PlayerCommand::KeyUp { key });
                true
            }
            None => false,
        }
    }

    /// Select an archetype by id. Takes effect at the next step.
    pub fn select_character(&mut self, id: &str) -> Result<CharacterKind, CoreError> {
        let character: CharacterKind = id.parse()?;
        if self.session.screen != Screen::CharacterSelect {
            return Err(CoreError::WrongScreen(self.session.screen));
        }
        self.queue_command(PlayerCommand::SelectCharacter { character });
        Ok(character)
    }

    /// Advance the simulation by one step of `delta_ms` milliseconds.
    ///
    /// Physics integrates once per step; timers compare against the
    /// accumulated simulation clock.
    pub fn update(&mut self, delta_ms: f64) -> Result<(), StepError> {
        if !delta_ms.is_finite() || delta_ms < 0.0 {
            return Err(StepError::InvalidDelta(delta_ms));
        }
        self.time.advance(delta_ms);
        self.process_commands();

        if self.session.screen == Screen::Playing {
            self.run_systems()?;
        }
        self.input.clear_intents();
        Ok(())
    }

    /// Take a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.session,
            self.player.as_ref(),
            self.director.as_ref(),
            &self.field,
            events,
        )
    }

    /// Advance one step and return the resulting snapshot.
    pub fn tick(&mut self, delta_ms: f64) -> Result<GameStateSnapshot, StepError> {
        self.update(delta_ms)?;
        Ok(self.snapshot())
    }

    pub fn screen(&self) -> Screen {
        self.session.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn director(&self) -> Option<&LevelRuntime> {
        self.director.as_ref()
    }

    pub fn field_effects(&self) -> FieldEffects {
        self.field
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of active enemies.
    pub fn enemy_count(&self) -> usize {
        self.world.query::<&SpawnOrder>().iter().count()
    }

    /// Use the player's ability in slot `index` now. A rejected use changes
    /// nothing.
    pub fn use_ability(&mut self, index: usize) -> Result<AbilityEffect, CoreError> {
        if self.session.screen != Screen::Playing {
            return Err(CoreError::WrongScreen(self.session.screen));
        }
        let now = self.time.elapsed_ms;
        let player = self.player.as_mut().ok_or(CoreError::NoActivePlayer)?;
        let effect = player.use_ability(index, now)?;
        let character = player.kind();
        let player_x = player.body.position.x;
        let name = player.abilities()[index].spec.name;

        match effect {
            AbilityEffect::None => {}
            AbilityEffect::Reveal { duration_ms } => {
                self.field.reveal_until_ms = Some(now + duration_ms);
            }
            AbilityEffect::SuppressEnemyAttacks { duration_ms } => {
                self.field.suppress_until_ms = Some(now + duration_ms);
            }
            AbilityEffect::AreaStrike { radius, damage } => {
                systems::combat::strike(
                    &mut self.world,
                    player_x,
                    Reach::Radius(radius),
                    damage,
                    &mut self.events,
                );
            }
            AbilityEffect::GlobalStrike { damage } => {
                systems::combat::strike(
                    &mut self.world,
                    player_x,
                    Reach::Everywhere,
                    damage,
                    &mut self.events,
                );
            }
        }

        debug!("{character} used {name}");
        self.events.push(GameEvent::AbilityUsed {
            character,
            index,
            name: name.to_owned(),
        });
        Ok(effect)
    }

    /// Activate special mechanic `index` of the current level for the
    /// player's archetype.
    pub fn activate_mechanic(&mut self, index: usize) -> Result<MechanicKind, CoreError> {
        if self.session.screen != Screen::Playing {
            return Err(CoreError::WrongScreen(self.session.screen));
        }
        let character = self.player.as_ref().ok_or(CoreError::NoActivePlayer)?.kind();
        let director = self.director.as_mut().ok_or(CoreError::NoActivePlayer)?;
        let kind = director.activate_mechanic(index, character)?;
        let effect = director.config().mechanics[index].effect.to_owned();

        debug!("mechanic {index} ({kind:?}) activated: {effect}");
        self.events.push(GameEvent::MechanicActivated {
            index,
            kind,
            effect,
        });
        Ok(kind)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command according to the current screen.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { key } => self.handle_key_down(key),
            PlayerCommand::KeyUp { key } => match key {
                KeyCode::ArrowLeft => self.input.left = false,
                KeyCode::ArrowRight => self.input.right = false,
                _ => {}
            },
            PlayerCommand::SelectCharacter { character } => {
                if self.session.screen == Screen::CharacterSelect {
                    self.begin_run(character);
                } else {
                    warn!(
                        "character selection ignored on {:?} screen",
                        self.session.screen
                    );
                }
            }
            PlayerCommand::Restart => self.reset(),
        }
    }

    fn handle_key_down(&mut self, key: KeyCode) {
        match self.session.screen {
            Screen::Intro => {
                if key.is_confirm() {
                    self.set_screen(Screen::CharacterSelect);
                }
            }
            Screen::CharacterSelect => {
                if let Some(character) = key.digit().and_then(CharacterKind::from_digit) {
                    self.begin_run(character);
                }
            }
            Screen::Playing => match key {
                KeyCode::ArrowLeft => self.input.left = true,
                KeyCode::ArrowRight => self.input.right = true,
                KeyCode::ArrowUp | KeyCode::Space => self.input.jump = true,
                KeyCode::KeyX => self.input.attack = true,
                KeyCode::KeyE => self.input.interact = true,
                KeyCode::Digit1 | KeyCode::Digit2 | KeyCode::Digit3 | KeyCode::Digit4 => {
                    if let Some(digit) = key.digit() {
                        self.input.abilities.push(usize::from(digit) - 1);
                    }
                }
                KeyCode::Enter => {}
            },
            Screen::Victory | Screen::GameOver => {
                if key.is_confirm() {
                    self.reset();
                }
            }
        }
    }

    fn set_screen(&mut self, to: Screen) {
        let from = self.session.screen;
        if from == to {
            return;
        }
        info!("screen {from:?} -> {to:?}");
        self.session.screen = to;
        self.events.push(GameEvent::ScreenChanged { from, to });
    }

    /// Full reset to initial defaults. The simulation clock keeps running.
    fn reset(&mut self) {
        self.world.clear();
        let screen = self.session.screen;
        self.session = Session {
            screen,
            ..Session::initial(&self.config)
        };
        self.player = None;
        self.director = None;
        self.field = FieldEffects::default();
        self.input = InputState::default();
        self.set_screen(Screen::Intro);
    }

    /// Character chosen: fresh player, fresh run, level 1.
    fn begin_run(&mut self, character: CharacterKind) {
        info!("selected {character}");
        self.session.selected_character = Some(character);
        self.session.score = 0;
        self.session.player_lives = self.config.starting_lives;
        self.player = Some(Player::new(character));
        self.set_screen(Screen::Playing);
        self.start_level(1);
    }

    fn start_level(&mut self, number: u8) {
        let Some(config) = build_level(number) else {
            self.set_screen(Screen::Victory);
            return;
        };
        self.world.clear();
        self.field = FieldEffects::default();
        if let Some(player) = self.player.as_mut() {
            player.return_to_start();
        }
        info!("level {number}: {}", config.title);
        self.director = Some(LevelRuntime::new(config, self.time.elapsed_ms));
        self.session.current_level = number;
        self.events.push(GameEvent::LevelStarted { level: number });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) -> Result<(), StepError> {
        let now = self.time.elapsed_ms;
        let (Some(player), Some(director)) = (self.player.as_mut(), self.director.as_mut()) else {
            return Ok(());
        };

        // 1. Effect expiry
        player.expire_effects(now);
        self.field.expire(now);

        // 2. Player movement and physics
        match (self.input.left, self.input.right) {
            (true, false) => player.body.velocity.x = -PLAYER_MOVE_SPEED,
            (false, true) => player.body.velocity.x = PLAYER_MOVE_SPEED,
            _ => {}
        }
        if self.input.jump {
            player.jump();
        }
        systems::physics::advance(&mut player.body, &PLAYER_PHYSICS);
        systems::physics::clamp_to_arena(&mut player.body);
        if !player.body.is_finite() {
            return Err(StepError::NonFinite("player".to_owned()));
        }

        // 3. Wave spawning
        systems::wave_spawner::run(
            &mut self.world,
            director,
            now,
            &mut self.next_spawn_order,
            &mut self.events,
        );

        // 4. Enemy AI and physics
        let target = PlayerTarget {
            x: player.body.position.x,
            y: player.body.position.y,
            visible: !player.is_hidden(),
        };
        systems::enemy_ai::run(
            &mut self.world,
            target,
            now,
            self.field.suppress_until_ms.is_some(),
            &mut self.rng,
            &mut self.events,
        );
        systems::physics::run(&mut self.world);
        check_enemies_finite(&self.world)?;

        // 5. Contact and hazard damage
        let bounds = player.body.bounds();
        let contact = systems::collision::contact_damage(&self.world, &bounds, &mut self.events);
        let hazard = director.hazard_damage(&bounds, now);
        if hazard > 0 {
            self.events.push(GameEvent::HazardDamage { damage: hazard });
        }
        player.health.take_damage(i64::from(contact) + i64::from(hazard));

        // 6. Life loss and time limit
        if !player.health.is_alive() {
            self.lose_life();
        } else if director.time_expired(now) {
            warn!("level {} time limit expired", director.number());
            director.restart_time_limit(now);
            self.events.push(GameEvent::TimeExpired {
                level: director.number(),
            });
            self.lose_life();
        }
        if self.session.screen != Screen::Playing {
            return Ok(());
        }

        // 7. Player actions
        self.resolve_player_actions(now);

        // 8. Cleanup
        let earned =
            systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
        self.session.score = self.session.score.saturating_add(earned);

        // 9. Progression
        self.check_progression();
        Ok(())
    }

    fn resolve_player_actions(&mut self, now: f64) {
        if self.input.attack {
            if let Some(player) = self.player.as_mut() {
                if player.attack(now) {
                    let damage = player.attack_damage();
                    let range = player.attack_range();
                    systems::combat::strike(
                        &mut self.world,
                        player.body.position.x,
                        Reach::Melee(range),
                        damage,
                        &mut self.events,
                    );
                    self.events.push(GameEvent::PlayerAttacked { damage, range });
                }
            }
        }

        for index in std::mem::take(&mut self.input.abilities) {
            if let Err(err) = self.use_ability(index) {
                warn!("ability rejected: {err}");
            }
        }

        if self.input.interact {
            let overlapping = match (self.player.as_ref(), self.director.as_ref()) {
                (Some(player), Some(director)) => {
                    director.overlapping_mechanics(&player.body.bounds())
                }
                _ => Vec::new(),
            };
            for index in overlapping {
                if let Err(err) = self.activate_mechanic(index) {
                    warn!("interaction rejected: {err}");
                }
            }
        }
    }

    /// Decrement lives; respawn the player or end the run.
    fn lose_life(&mut self) {
        self.session.player_lives = self.session.player_lives.saturating_sub(1);
        let lives_remaining = self.session.player_lives;
        info!("life lost, {lives_remaining} remaining");
        self.events.push(GameEvent::LifeLost { lives_remaining });

        if lives_remaining == 0 {
            self.set_screen(Screen::GameOver);
        } else if let Some(player) = self.player.as_mut() {
            player.respawn();
        }
    }

    fn check_progression(&mut self) {
        let active = self.enemy_count();
        let Some(director) = self.director.as_mut() else {
            return;
        };
        if !director.check_complete(active) {
            return;
        }

        let level = director.number();
        info!("level {level} complete");
        self.events.push(GameEvent::LevelComplete { level });
        if level >= LEVEL_COUNT {
            self.set_screen(Screen::Victory);
        } else {
            self.start_level(level + 1);
        }
    }

    // --- Test support ---

    /// Mutable access to the player (for tests).
    #[cfg(test)]
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Mutable access to the ECS world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Jump straight into `number` with the current player (for tests).
    #[cfg(test)]
    pub fn start_level_for_test(&mut self, number: u8) {
        self.start_level(number);
    }

    /// Spawn an extra enemy at `x` on the ground (for tests). Returns its id.
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: EnemyKind, x: f64) -> u64 {
        let id = self.next_spawn_order;
        crate::world_setup::spawn_enemy_of_kind(
            &mut self.world,
            kind,
            self.session.current_level,
            x,
            ENEMY_GROUND_Y,
            None,
            &mut self.next_spawn_order,
        );
        id
    }
}

fn check_enemies_finite(world: &World) -> Result<(), StepError> {
    for (_entity, (body, order)) in world.query::<(&Body, &SpawnOrder)>().iter() {
        if !body.is_finite() {
            return Err(StepError::NonFinite(format!("enemy {}", order.0)));
        }
    }
    Ok(())
}
