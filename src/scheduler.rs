//! Frame thread
//!
//! One dedicated thread owns the `Game` and runs update then render at a
//! fixed target rate. The render target is shared behind a mutex so the owner
//! can still reach it; the frame thread holds the lock for the whole
//! update+render so a frame is never drawn half-updated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;
use crate::game::Game;
use crate::platform::InputFlags;
use crate::renderer::Renderer;
use crate::{Error, Result};

/// Name of the frame thread
pub const THREAD_NAME: &str = "dodgy-dive-frame";

/// How often, and how many times, shutdown checks for the thread to finish
pub const JOIN_POLL: Duration = Duration::from_millis(10);
pub const JOIN_ATTEMPTS: u32 = 200;

pub struct FrameScheduler {
    running: Arc<AtomicBool>,
    join: Option<JoinHandle<Game>>,
}

impl FrameScheduler {
    /// Move `game` onto a new frame thread and start ticking
    pub fn spawn<R: Renderer + Send + 'static>(
        game: Game,
        target: Arc<Mutex<R>>,
        input: Arc<InputFlags>,
        target_fps: u32,
    ) -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let frame_budget = Duration::from_secs_f32(1.0 / target_fps.max(1) as f32);

        let join = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn({
                let running = Arc::clone(&running);
                move || frame_loop(game, &target, &input, &running, frame_budget, target_fps.max(1))
            })
            .map_err(Error::ThreadSpawn)?;

        log::info!("Frame thread started at {} fps", target_fps);
        Ok(Self {
            running,
            join: Some(join),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
            && self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Stop the frame thread and hand the game back
    ///
    /// Returns `None` if the thread panicked, or didn't finish in time (it is
    /// then left detached).
    pub fn shutdown(&mut self) -> Option<Game> {
        self.running.store(false, Ordering::Relaxed);
        let join = self.join.take()?;

        for _ in 0..JOIN_ATTEMPTS {
            if join.is_finished() {
                return match join.join() {
                    Ok(game) => {
                        log::info!("Frame thread stopped");
                        Some(game)
                    }
                    Err(_) => {
                        log::warn!("Frame thread panicked");
                        None
                    }
                };
            }
            thread::sleep(JOIN_POLL);
        }
        log::warn!(
            "Frame thread did not stop within {:?}, detaching",
            JOIN_POLL * JOIN_ATTEMPTS
        );
        None
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if self.join.is_some() {
            self.shutdown();
        }
    }
}

fn frame_loop<R: Renderer>(
    mut game: Game,
    target: &Mutex<R>,
    input: &InputFlags,
    running: &AtomicBool,
    frame_budget: Duration,
    report_every: u32,
) -> Game {
    let mut last = Instant::now();
    let mut frames = 0u32;
    let mut report_start = last;

    while running.load(Ordering::Relaxed) {
        let start = Instant::now();
        let dt = (start - last).as_secs_f32().min(MAX_FRAME_DT);
        last = start;

        {
            let mut renderer = target.lock().unwrap_or_else(PoisonError::into_inner);
            game.update(&input.snapshot(), dt);
            if let Err(e) = renderer.render(game.state()) {
                log::warn!("Skipping frame: {}", e);
            }
        }

        frames += 1;
        if frames == report_every {
            let secs = report_start.elapsed().as_secs_f32();
            if secs > 0.0 {
                log::debug!("{:.1} fps", frames as f32 / secs);
            }
            frames = 0;
            report_start = Instant::now();
        }

        if let Some(rest) = frame_budget.checked_sub(start.elapsed()) {
            thread::sleep(rest);
        }
    }
    game
}
