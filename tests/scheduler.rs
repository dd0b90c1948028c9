//! Frame thread driven end to end through the public API

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use dodgy_dive::audio::LogAudio;
use dodgy_dive::persistence::{MemoryStore, ScoreKeeper};
use dodgy_dive::platform::InputFlags;
use dodgy_dive::renderer::{LogRenderer, Renderer};
use dodgy_dive::scheduler::{JOIN_ATTEMPTS, JOIN_POLL};
use dodgy_dive::sim::{GamePhase, GameState, SessionConfig};
use dodgy_dive::{Error, FrameScheduler, Game, Result};

fn game(config: SessionConfig) -> Game {
    Game::new(
        config,
        ScoreKeeper::new(Box::new(MemoryStore::new())),
        Box::new(LogAudio::new()),
    )
}

/// Fails every other frame
#[derive(Default)]
struct FlakyRenderer {
    calls: u64,
    drawn: u64,
}

impl Renderer for FlakyRenderer {
    fn render(&mut self, _state: &GameState) -> Result<()> {
        self.calls += 1;
        if self.calls % 2 == 0 {
            return Err(Error::Render("surface lost".to_string()));
        }
        self.drawn += 1;
        Ok(())
    }
}

/// Holds the frame thread inside `render` well past the join budget
struct StuckRenderer {
    hold: Duration,
}

impl Renderer for StuckRenderer {
    fn render(&mut self, _state: &GameState) -> Result<()> {
        thread::sleep(self.hold);
        Ok(())
    }
}

#[test]
fn frames_run_until_shutdown() {
    let input = Arc::new(InputFlags::new());
    let target = Arc::new(Mutex::new(LogRenderer::new()));
    let mut scheduler =
        FrameScheduler::spawn(game(SessionConfig::corridor(3)), Arc::clone(&target), Arc::clone(&input), 60)
            .unwrap();
    assert!(scheduler.is_running());

    input.request_activate();
    input.set_ascend(true);
    thread::sleep(Duration::from_millis(200));

    let game = scheduler.shutdown().expect("game handed back");
    assert!(!scheduler.is_running());
    assert!(game.state().time_ticks > 0);
    assert_ne!(game.state().phase, GamePhase::WaitingToStart);
    assert_eq!(target.lock().unwrap().frames(), game.state().time_ticks);

    // Already shut down
    assert!(scheduler.shutdown().is_none());
}

#[test]
fn render_errors_do_not_stop_the_loop() {
    let input = Arc::new(InputFlags::new());
    let target = Arc::new(Mutex::new(FlakyRenderer::default()));
    let mut scheduler =
        FrameScheduler::spawn(game(SessionConfig::diver(8)), Arc::clone(&target), input, 60).unwrap();
    thread::sleep(Duration::from_millis(200));
    assert!(scheduler.is_running());

    let game = scheduler.shutdown().unwrap();
    let renderer = target.lock().unwrap();
    assert!(renderer.calls >= 4);
    assert!(renderer.drawn < renderer.calls);
    assert_eq!(renderer.calls, game.state().time_ticks);
}

#[test]
fn drop_stops_the_thread() {
    let target = Arc::new(Mutex::new(LogRenderer::new()));
    {
        let _scheduler = FrameScheduler::spawn(
            game(SessionConfig::corridor(1)),
            Arc::clone(&target),
            Arc::new(InputFlags::new()),
            120,
        )
        .unwrap();
        thread::sleep(Duration::from_millis(50));
    }
    let frames = target.lock().unwrap().frames();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(target.lock().unwrap().frames(), frames);
}

#[test]
fn shutdown_gives_up_on_a_stuck_thread() {
    let budget = JOIN_POLL * JOIN_ATTEMPTS;
    let target = Arc::new(Mutex::new(StuckRenderer { hold: budget * 3 }));
    let mut scheduler = FrameScheduler::spawn(
        game(SessionConfig::corridor(2)),
        target,
        Arc::new(InputFlags::new()),
        30,
    )
    .unwrap();
    // Let the first frame get into render
    thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    assert!(scheduler.shutdown().is_none());
    let waited = started.elapsed();
    assert!(waited >= budget, "returned after {waited:?}");
    assert!(waited < budget * 2, "returned after {waited:?}");
}
