//! Session driver
//!
//! Owns the simulation state and its collaborators. Each update runs one
//! simulation tick, then reacts to the events it raised: sound cues, and
//! recording the final score when a session resets.

use crate::audio::{AudioSink, SoundEffect};
use crate::persistence::ScoreKeeper;
use crate::sim::{self, CrashCause, GameEvent, GameState, HazardKind, SessionConfig, TickInput};

pub struct Game {
    state: GameState,
    scores: ScoreKeeper,
    audio: Box<dyn AudioSink>,
}

impl Game {
    /// New session waiting to start, with the stored best loaded
    pub fn new(config: SessionConfig, scores: ScoreKeeper, audio: Box<dyn AudioSink>) -> Self {
        let mut state = GameState::new(config);
        state.best = scores.load();
        log::info!(
            "{} game ready (seed {}, best {})",
            config.variant.as_str(),
            config.seed,
            state.best
        );
        Self {
            state,
            scores,
            audio,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance one frame
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        sim::tick(&mut self.state, input, dt);
        for event in self.state.drain_events() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started => self.audio.play(SoundEffect::Music),
            GameEvent::Crashed { cause, score } => {
                let effect = match cause {
                    CrashCause::Hazard(HazardKind::Shark) => SoundEffect::Crunch,
                    _ => SoundEffect::Explosion,
                };
                self.audio.play(effect);
                self.audio.play(SoundEffect::MusicStop);
                log::info!("Crashed ({:?}) with score {}", cause, score);
            }
            GameEvent::SessionReset { final_score } => {
                let previous = self.state.best;
                self.state.best = self.scores.record(final_score, previous);
                if self.state.best > previous {
                    self.audio.play(SoundEffect::NewBest);
                }
            }
        }
    }
}
