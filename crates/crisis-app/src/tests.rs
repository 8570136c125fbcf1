//! Tests for the loop host: lifecycle, command forwarding, snapshot publishing.

use std::time::{Duration, Instant};

use rstest::rstest;

use crisis_core::enums::{CharacterKind, Screen};
use crisis_core::error::{CoreError, StepError};
use crisis_core::events::GameEvent;
use crisis_core::state::GameStateSnapshot;
use crisis_sim::engine::{SimConfig, SimulationEngine};

use crate::error::LoopError;
use crate::game_loop::{advance_frame, frame_duration, panic_message, publish, GameLoop};
use crate::logging;
use crate::state::LoopConfig;

/// Poll until `done` holds for the published snapshot.
fn wait_for(game: &GameLoop, done: impl Fn(&GameStateSnapshot) -> bool) -> GameStateSnapshot {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let snapshot = game.get_game_state();
        if done(&snapshot) {
            return snapshot;
        }
        assert!(Instant::now() < deadline, "timed out on {:?}", snapshot.screen);
        std::thread::sleep(Duration::from_millis(5));
    }
}

// ---- Configuration ----

#[test]
fn test_frame_duration() {
    assert_eq!(frame_duration(60).as_nanos(), 1_000_000_000u128 / 60);
    assert_eq!(frame_duration(30).as_nanos(), 1_000_000_000u128 / 30);
    assert_eq!(frame_duration(0), frame_duration(1));
}

#[test]
fn test_loop_config_partial_json() {
    let config: LoopConfig =
        serde_json::from_str(r#"{"tick_rate_hz": 30, "sim": {"seed": 7}}"#).unwrap();
    assert_eq!(config.tick_rate_hz, 30);
    assert_eq!(config.time_scale, 1.0);
    assert_eq!(config.sim.seed, 7);
    assert_eq!(config.sim.starting_lives, SimConfig::default().starting_lives);
}

#[rstest]
#[case(0, 1.0)]
#[case(60, 0.0)]
#[case(60, -1.0)]
#[case(60, f64::NAN)]
#[case(60, f64::INFINITY)]
fn test_invalid_config_refuses_to_start(#[case] tick_rate_hz: u32, #[case] time_scale: f64) {
    let mut game = GameLoop::new(LoopConfig {
        tick_rate_hz,
        time_scale,
        ..Default::default()
    });
    assert!(matches!(game.start(), Err(LoopError::InvalidConfig(_))));
    assert!(!game.is_running());
}

#[test]
fn test_logging_init_is_repeatable() {
    logging::init(false);
    logging::init(true);
}

// ---- Lifecycle ----

#[test]
fn test_stop_twice_without_start() {
    let mut game = GameLoop::new(LoopConfig::default());
    game.stop();
    game.stop();
    assert!(!game.is_running());
}

#[test]
fn test_stop_is_idempotent() {
    let mut game = GameLoop::new(LoopConfig::default());
    game.start().unwrap();
    assert!(game.is_running());

    game.stop();
    assert!(!game.is_running());
    game.stop();
    assert!(!game.is_running());
    assert!(game.last_fault().is_none());
}

#[test]
fn test_start_twice_is_rejected() {
    let mut game = GameLoop::new(LoopConfig::default());
    game.start().unwrap();
    assert!(matches!(game.start(), Err(LoopError::AlreadyRunning)));
    game.stop();
}

#[test]
fn test_loop_advances_time() {
    let mut game = GameLoop::new(LoopConfig::default());
    game.start().unwrap();
    let snapshot = wait_for(&game, |s| s.time.tick >= 3);
    assert!(snapshot.time.elapsed_ms > 0.0);
    game.stop();
}

#[test]
fn test_state_survives_stop_and_start() {
    let mut game = GameLoop::new(LoopConfig::default());
    game.start().unwrap();
    assert!(game.handle_key("Enter"));
    wait_for(&game, |s| s.screen == Screen::CharacterSelect);
    game.stop();

    game.start().unwrap();
    let snapshot = wait_for(&game, |s| s.time.tick > 0);
    assert_eq!(snapshot.screen, Screen::CharacterSelect);
    game.stop();
}

// ---- Commands ----

#[test]
fn test_full_run_through_loop() {
    let mut game = GameLoop::new(LoopConfig::default());
    game.start().unwrap();

    assert!(game.handle_key("Space"));
    wait_for(&game, |s| s.screen == Screen::CharacterSelect);

    assert_eq!(game.select_character("agent").unwrap(), CharacterKind::Agent);
    let snapshot = wait_for(&game, |s| s.screen == Screen::Playing);
    let player = snapshot.player.expect("player should exist");
    assert_eq!(player.health, 120);
    assert_eq!(snapshot.selected_character, Some(CharacterKind::Agent));

    assert!(game.restart());
    wait_for(&game, |s| s.screen == Screen::Intro);
    game.stop();
}

#[test]
fn test_unknown_key_is_not_forwarded() {
    let mut game = GameLoop::new(LoopConfig::default());
    assert!(!game.handle_key("KeyQ"));
    assert!(!game.release_key("F5"));
    assert!(game.release_key("ArrowLeft"));
}

#[test]
fn test_select_character_validation() {
    let mut game = GameLoop::new(LoopConfig::default());
    assert!(matches!(
        game.select_character("pilot"),
        Err(LoopError::Command(CoreError::UnknownCharacter(_)))
    ));
    assert!(matches!(
        game.select_character("hacker"),
        Err(LoopError::Command(CoreError::WrongScreen(Screen::Intro)))
    ));

    game.start().unwrap();
    assert!(matches!(
        game.select_character("hacker"),
        Err(LoopError::Command(CoreError::WrongScreen(Screen::Intro)))
    ));
    game.stop();
}

// ---- Snapshot publishing ----

#[test]
fn test_events_are_handed_out_once() {
    let mut game = GameLoop::new(LoopConfig::default());
    game.start().unwrap();
    game.handle_key("Enter");

    let snapshot = wait_for(&game, |s| s.screen == Screen::CharacterSelect);
    assert!(snapshot.events.contains(&GameEvent::ScreenChanged {
        from: Screen::Intro,
        to: Screen::CharacterSelect,
    }));
    game.stop();

    game.get_game_state();
    assert!(game.get_game_state().events.is_empty());
}

#[test]
fn test_publish_carries_unpolled_events() {
    let latest = std::sync::Mutex::new(GameStateSnapshot::default());
    publish(
        &latest,
        GameStateSnapshot {
            events: vec![GameEvent::LevelStarted { level: 1 }],
            ..Default::default()
        },
    );
    publish(
        &latest,
        GameStateSnapshot {
            events: vec![GameEvent::LifeLost { lives_remaining: 3 }],
            ..Default::default()
        },
    );

    let events = latest.lock().unwrap().events.clone();
    assert_eq!(
        events,
        vec![
            GameEvent::LevelStarted { level: 1 },
            GameEvent::LifeLost { lives_remaining: 3 },
        ]
    );
}

#[test]
fn test_publish_caps_pending_events() {
    let latest = std::sync::Mutex::new(GameStateSnapshot::default());
    for wave in 0..1100 {
        publish(
            &latest,
            GameStateSnapshot {
                events: vec![GameEvent::WaveReleased { level: 1, wave }],
                ..Default::default()
            },
        );
    }
    let events = latest.lock().unwrap().events.clone();
    assert_eq!(events.len(), 1024);
    assert_eq!(events.last(), Some(&GameEvent::WaveReleased { level: 1, wave: 1099 }));
}

// ---- Frame boundary ----

#[test]
fn test_advance_frame_reports_step_errors() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert!(matches!(
        advance_frame(&mut engine, -5.0),
        Err(LoopError::Step(StepError::InvalidDelta(_)))
    ));

    let snapshot = advance_frame(&mut engine, 16.0).unwrap();
    assert_eq!(snapshot.time.tick, 1);
}

#[test]
fn test_panic_message_payloads() {
    let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "boom");

    let payload =
        std::panic::catch_unwind(|| std::panic::panic_any(String::from("kaboom"))).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "kaboom");

    let payload = std::panic::catch_unwind(|| std::panic::panic_any(7u8)).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
}
