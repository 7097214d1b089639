//! Stack Drop headless runner
//!
//! Plays one session without a display: a scripted finger sweeps back and
//! forth across the screen until a block reaches the stack or the time limit
//! is hit, then prints the final state as JSON.
//!
//! Usage: `stack-drop [settings.json]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use stack_drop::render::CountingCanvas;
use stack_drop::sim::GameEvent;
use stack_drop::{Session, Settings};

/// Longest run before giving up (ms of game time)
const TIME_LIMIT_MS: f64 = 120_000.0;

fn main() {
    env_logger::init();
    log::info!("Stack Drop (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);

    let frame_ms = settings.frame_ms();
    let width = settings.viewport.width;
    let mut session = match Session::new(settings, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(1);
        }
    };
    match session.settings().to_json() {
        Ok(json) => log::debug!("Effective settings: {}", json),
        Err(e) => log::warn!("Cannot serialize settings: {}", e),
    }
    let mut canvas = CountingCanvas::default();

    let mut elapsed = 0.0;
    let mut caught = 0u32;
    while elapsed < TIME_LIMIT_MS && !session.is_blocked() {
        // Finger sweeps a third of the screen width every two seconds
        let phase = (elapsed / 2000.0 * std::f64::consts::TAU).sin() as f32;
        session.push_touch(width / 2.0 + phase * width / 6.0);

        for event in session.advance(frame_ms) {
            match event {
                GameEvent::OrbCollected { value, total } => {
                    caught += 1;
                    log::debug!("Caught {} (total {})", value, total);
                }
                GameEvent::Blocked => log::info!("Blocked after {:.1}s", elapsed / 1000.0),
                _ => {}
            }
        }
        session.draw(&mut canvas);
        elapsed += frame_ms;
    }

    println!(
        "seed {} | {:.1}s | value {} | tokens {} | orbs caught {} | draw calls {}",
        seed,
        elapsed / 1000.0,
        session.state().collector.value,
        session.state().tokens.len(),
        caught,
        canvas.calls
    );
    match serde_json::to_string_pretty(session.state()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot serialize final state: {}", e),
    }

    session.stop();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
