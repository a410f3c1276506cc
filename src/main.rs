//! Toro Snake entry point
//!
//! Runs a headless session: the autopilot steers, frames go to the log,
//! paced at the configured tick rate.
//! Usage: `toro-snake [settings.json]`

use toro_snake::Settings;
use toro_snake::platform::{Autopilot, LogSink, Paced, run_session};
use toro_snake::sim::RoundController;

/// Tick cap when settings leave `max_ticks` unset
const DEMO_TICKS: u64 = 400;

fn main() {
    env_logger::init();
    log::info!("Toro Snake (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let max_ticks = settings.max_ticks.unwrap_or(DEMO_TICKS);
    let ticks_per_second = settings.ticks_per_second;

    let mut round = match RoundController::new(settings) {
        Ok(round) => round,
        Err(e) => {
            log::error!("Cannot start round: {e}");
            std::process::exit(1);
        }
    };

    let mut sink = Paced::new(LogSink::default(), ticks_per_second);
    match run_session(&mut round, &mut Autopilot, &mut sink, Some(max_ticks)) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Failed to encode summary: {e}"),
        },
        Err(e) => {
            log::error!("Session aborted: {e}");
            std::process::exit(1);
        }
    }
}
