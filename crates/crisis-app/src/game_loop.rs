//! Game loop thread: runs the simulation engine at a fixed refresh rate and
//! publishes snapshots.
//!
//! The engine is moved into the loop thread on `start` and handed back when
//! the thread exits, so a stopped loop keeps its state and can be started
//! again. Commands arrive via `mpsc` channel; snapshots are stored in shared
//! state for non-blocking polling.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crisis_core::commands::{KeyCode, PlayerCommand};
use crisis_core::enums::{CharacterKind, Screen};
use crisis_core::error::CoreError;
use crisis_core::state::GameStateSnapshot;
use crisis_sim::engine::SimulationEngine;

use crate::error::LoopError;
use crate::state::{LoopCommand, LoopConfig};

/// Events kept for a consumer that has not polled in a while.
const MAX_PENDING_EVENTS: usize = 1024;

/// Nominal duration of one frame at `tick_rate_hz`.
pub fn frame_duration(tick_rate_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate_hz.max(1)))
}

/// What the loop thread hands back when it exits.
struct LoopExit {
    engine: SimulationEngine,
    fault: Option<LoopError>,
}

/// Handle to the driving loop.
pub struct GameLoop {
    config: LoopConfig,
    /// Held here while the loop is stopped.
    engine: Option<SimulationEngine>,
    latest: Arc<Mutex<GameStateSnapshot>>,
    running: Arc<AtomicBool>,
    command_tx: Option<mpsc::Sender<LoopCommand>>,
    handle: Option<JoinHandle<LoopExit>>,
    last_fault: Option<LoopError>,
}

impl GameLoop {
    /// A stopped loop on the intro screen.
    pub fn new(config: LoopConfig) -> Self {
        let mut engine = SimulationEngine::new(config.sim.clone());
        let initial = engine.snapshot();
        Self {
            config,
            engine: Some(engine),
            latest: Arc::new(Mutex::new(initial)),
            running: Arc::new(AtomicBool::new(false)),
            command_tx: None,
            handle: None,
            last_fault: None,
        }
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Whether the loop thread is advancing the simulation. Goes false on
    /// `stop` and when a frame faults.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The fault that halted the most recent run, if any.
    pub fn last_fault(&self) -> Option<&LoopError> {
        self.last_fault.as_ref()
    }

    /// Spawn the loop thread.
    pub fn start(&mut self) -> Result<(), LoopError> {
        if self.is_running() {
            return Err(LoopError::AlreadyRunning);
        }
        self.config.validate()?;
        // A faulted thread has already exited; collect its engine.
        self.reap();
        self.last_fault = None;

        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => SimulationEngine::new(self.config.sim.clone()),
        };
        let (command_tx, command_rx) = mpsc::channel::<LoopCommand>();
        let latest = Arc::clone(&self.latest);
        let running = Arc::clone(&self.running);
        let config = self.config.clone();

        self.running.store(true, Ordering::SeqCst);
        let spawned = std::thread::Builder::new()
            .name("crisis-game-loop".into())
            .spawn(move || run_loop(engine, command_rx, &latest, &running, &config));

        match spawned {
            Ok(handle) => {
                info!("game loop started at {} Hz", self.config.tick_rate_hz);
                self.handle = Some(handle);
                self.command_tx = Some(command_tx);
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                Err(err.into())
            }
        }
    }

    /// Halt the loop and join its thread. Safe to call any number of times.
    pub fn stop(&mut self) {
        let was_running = self.running.swap(false, Ordering::SeqCst);
        if let Some(tx) = self.command_tx.take() {
            // The thread may already be gone after a fault.
            let _ = tx.send(LoopCommand::Shutdown);
        }
        self.reap();
        if was_running {
            info!("game loop stopped");
        }
    }

    fn reap(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        match handle.join() {
            Ok(exit) => {
                self.engine = Some(exit.engine);
                if exit.fault.is_some() {
                    self.last_fault = exit.fault;
                }
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("game loop thread died: {message}");
                self.last_fault = Some(LoopError::Panicked(message));
            }
        }
    }

    /// Forward a key press by DOM key code. Returns false for keys the
    /// simulation ignores or when the command could not be delivered.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match KeyCode::from_code(code) {
            Some(key) => self.send(PlayerCommand::KeyDown { key }),
            None => {
                debug!("ignoring key {code}");
                false
            }
        }
    }

    pub fn release_key(&mut self, code: &str) -> bool {
        match KeyCode::from_code(code) {
            Some(key) => self.send(PlayerCommand::KeyUp { key }),
            None => false,
        }
    }

    /// Select an archetype by id. Only valid on the character select screen.
    pub fn select_character(&mut self, id: &str) -> Result<CharacterKind, LoopError> {
        if let Some(engine) = self.engine.as_mut() {
            return Ok(engine.select_character(id)?);
        }
        let character: CharacterKind = id.parse()?;
        let screen = self.screen();
        if screen != Screen::CharacterSelect {
            return Err(CoreError::WrongScreen(screen).into());
        }
        self.send(PlayerCommand::SelectCharacter { character });
        Ok(character)
    }

    /// Reset the session to the intro screen.
    pub fn restart(&mut self) -> bool {
        self.send(PlayerCommand::Restart)
    }

    fn send(&mut self, command: PlayerCommand) -> bool {
        if let Some(engine) = self.engine.as_mut() {
            engine.queue_command(command);
            return true;
        }
        match &self.command_tx {
            Some(tx) => tx.send(LoopCommand::Player(command)).is_ok(),
            None => {
                warn!("game loop unavailable, dropping {command:?}");
                false
            }
        }
    }

    /// Copy of the latest published snapshot. Events are handed out once.
    pub fn get_game_state(&self) -> GameStateSnapshot {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = latest.clone();
        latest.events.clear();
        snapshot
    }

    fn screen(&self) -> Screen {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .screen
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The game loop. Runs until shutdown, channel disconnect, or a faulted
/// frame.
fn run_loop(
    mut engine: SimulationEngine,
    commands: mpsc::Receiver<LoopCommand>,
    latest: &Mutex<GameStateSnapshot>,
    running: &AtomicBool,
    config: &LoopConfig,
) -> LoopExit {
    let frame = frame_duration(config.tick_rate_hz);
    let mut next_frame = Instant::now();
    let mut last_frame = next_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match commands.try_recv() {
                Ok(LoopCommand::Player(command)) => engine.queue_command(command),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return LoopExit {
                        engine,
                        fault: None,
                    };
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if !running.load(Ordering::SeqCst) {
            return LoopExit {
                engine,
                fault: None,
            };
        }

        // 2. Advance by the measured frame time
        let now = Instant::now();
        let delta_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0 * config.time_scale;
        last_frame = now;

        match advance_frame(&mut engine, delta_ms) {
            Ok(snapshot) => publish(latest, snapshot),
            Err(fault) => {
                error!("game loop halted: {fault}");
                running.store(false, Ordering::SeqCst);
                return LoopExit {
                    engine,
                    fault: Some(fault),
                };
            }
        }

        // 3. Sleep until the next frame
        next_frame += frame;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else if now - next_frame > frame * 2 {
            // Too far behind; drop the backlog instead of spiralling.
            next_frame = now;
        }
    }
}

/// One update + snapshot cycle with faults caught at the frame boundary.
pub(crate) fn advance_frame(
    engine: &mut SimulationEngine,
    delta_ms: f64,
) -> Result<GameStateSnapshot, LoopError> {
    match panic::catch_unwind(AssertUnwindSafe(|| engine.tick(delta_ms))) {
        Ok(result) => Ok(result?),
        Err(payload) => Err(LoopError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Replace the published snapshot, carrying over events nobody has polled.
pub(crate) fn publish(latest: &Mutex<GameStateSnapshot>, mut snapshot: GameStateSnapshot) {
    let mut slot = latest.lock().unwrap_or_else(PoisonError::into_inner);
    let mut events = std::mem::take(&mut slot.events);
    events.append(&mut snapshot.events);
    if events.len() > MAX_PENDING_EVENTS {
        events.drain(..events.len() - MAX_PENDING_EVENTS);
    }
    snapshot.events = events;
    *slot = snapshot;
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
        .to_owned()
}
