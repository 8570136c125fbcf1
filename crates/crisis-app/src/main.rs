//! Headless runner: plays a short scripted session and prints the final state.
//!
//! Usage: `crisis-app [character] [seconds] [--verbose]`

use std::error::Error;
use std::time::{Duration, Instant};

use log::info;

use crisis_app::core::enums::Screen;
use crisis_app::core::state::GameStateSnapshot;
use crisis_app::{logging, GameLoop, LoopConfig};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let mut positional = args.iter().filter(|a| !a.starts_with("--"));
    let character = positional.next().map_or("agent", String::as_str).to_owned();
    let seconds: u64 = match positional.next() {
        Some(raw) => raw.parse()?,
        None => 10,
    };

    logging::init(verbose);

    let mut game = GameLoop::new(LoopConfig::default());
    game.start()?;

    game.handle_key("Enter");
    wait_for_screen(&game, Screen::CharacterSelect)?;
    let selected = game.select_character(&character)?;
    wait_for_screen(&game, Screen::Playing)?;
    info!("playing as {selected}");

    // Walk right and swing on every poll.
    game.handle_key("ArrowRight");
    let deadline = Instant::now() + Duration::from_secs(seconds);
    let mut state = game.get_game_state();
    while Instant::now() < deadline && state.screen == Screen::Playing {
        game.handle_key("KeyX");
        std::thread::sleep(POLL_INTERVAL);
        state = game.get_game_state();
    }
    game.release_key("ArrowRight");
    game.stop();

    if let Some(fault) = game.last_fault() {
        return Err(fault.to_string().into());
    }
    println!("{}", serde_json::to_string_pretty(&summary(&state))?);
    Ok(())
}

fn wait_for_screen(game: &GameLoop, screen: Screen) -> Result<(), Box<dyn Error>> {
    let deadline = Instant::now() + Duration::from_secs(2);
    while game.get_game_state().screen != screen {
        if Instant::now() >= deadline {
            return Err(format!("timed out waiting for {screen:?}").into());
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    Ok(())
}

fn summary(state: &GameStateSnapshot) -> serde_json::Value {
    serde_json::json!({
        "screen": state.screen,
        "level": state.current_level,
        "score": state.score,
        "lives": state.player_lives,
        "health": state.player.as_ref().map(|p| p.health),
        "enemies": state.enemies.len(),
        "ticks": state.time.tick,
    })
}
