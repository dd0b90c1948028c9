//! Dodgy Dive headless entry point
//!
//! Loads settings, starts the frame thread with a logging renderer, and plays
//! a scripted input pattern for `demo_seconds`. Set `RUST_LOG=debug` (or
//! `trace` for per-frame summaries) to watch it.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use dodgy_dive::audio::LogAudio;
use dodgy_dive::persistence::ScoreKeeper;
use dodgy_dive::platform::InputFlags;
use dodgy_dive::renderer::LogRenderer;
use dodgy_dive::settings::SETTINGS_FILE;
use dodgy_dive::{FrameScheduler, Game, Settings};

/// Environment variable pointing at the settings/score directory
const DATA_DIR_ENV: &str = "DODGY_DIVE_DATA";

/// Scripted input: hold ascend for this long, then release for as long
const HOLD: Duration = Duration::from_millis(280);
const RELEASE: Duration = Duration::from_millis(320);

fn main() {
    env_logger::init();

    let data_dir = std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load(&data_dir.join(SETTINGS_FILE));
    log::info!("Dodgy Dive ({}) starting...", settings.variant.as_str());

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let game = Game::new(
        settings.session_config(seed),
        ScoreKeeper::new(settings.score_store(&data_dir)),
        Box::new(LogAudio::from_settings(&settings)),
    );

    let input = Arc::new(InputFlags::new());
    let target = Arc::new(Mutex::new(LogRenderer::new()));
    let mut scheduler =
        match FrameScheduler::spawn(game, Arc::clone(&target), Arc::clone(&input), settings.target_fps) {
            Ok(scheduler) => scheduler,
            Err(e) => {
                log::error!("Could not start: {}", e);
                std::process::exit(1);
            }
        };

    let run_for = settings.demo_duration();
    let started = Instant::now();
    while started.elapsed() < run_for && scheduler.is_running() {
        // A press starts a run if one is waiting, and ascends otherwise
        input.press();
        thread::sleep(HOLD);
        input.release();
        thread::sleep(RELEASE);
    }

    match scheduler.shutdown() {
        Some(game) => {
            let state = game.state();
            log::info!(
                "Stopped after {} ticks, best score {}",
                state.time_ticks,
                state.best
            );
        }
        None => log::warn!("Frame thread did not hand back the game"),
    }
    let frames = target.lock().unwrap_or_else(PoisonError::into_inner).frames();
    log::info!("Rendered {} frames", frames);
}
