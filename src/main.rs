//! Tetrogger entry point
//!
//! Loads the configuration, runs the game against the headless frontend and
//! prints the final snapshot as JSON.
//!
//! Usage: `tetrogger [config.json] [frame_limit]`

use std::process::ExitCode;

use tetrogger::Config;
use tetrogger::platform::HeadlessPlatform;
use tetrogger::sim::{Driver, GameState};

/// Ten minutes of play at 60 Hz
const DEFAULT_FRAME_LIMIT: u64 = 60 * 60 * 10;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Tetrogger (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match Config::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Could not load config {}: {}, using defaults", path, e);
                Config::default()
            }
        },
        None => Config::default(),
    };
    let frame_limit = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(limit)) => limit,
        Some(Err(e)) => {
            log::warn!("Invalid frame limit: {}, using {}", e, DEFAULT_FRAME_LIMIT);
            DEFAULT_FRAME_LIMIT
        }
        None => DEFAULT_FRAME_LIMIT,
    };

    log::info!("Game initialized with seed: {}", config.seed);
    let mut platform = HeadlessPlatform::new(config.seed, frame_limit);
    let mut driver = Driver::new(GameState::new(config));

    if let Err(e) = driver.run(&mut platform) {
        log::error!("Simulation fault: {}", e);
        return ExitCode::FAILURE;
    }

    match serde_json::to_string_pretty(&driver.state.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Could not serialize final snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
