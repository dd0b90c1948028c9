//! Best-score persistence
//!
//! Stores expose a fallible `load_best`/`save_best` pair. The game never
//! talks to a store directly; it goes through `ScoreKeeper`, which turns
//! every storage failure into a logged warning:
//! - unreadable or corrupt store loads as 0
//! - a failed save keeps the new best in memory for this process
//! - a failed reload after a run keeps the best already known

pub mod file;
pub mod memory;

pub use file::{BestScoreFile, LeaderboardFile};
pub use memory::MemoryStore;

use crate::Result;

/// Durable best-score storage
pub trait ScoreStore: Send {
    /// Previously saved best, `Ok(0)` when nothing was ever saved
    fn load_best(&self) -> Result<u64>;

    /// Persist a new best, replacing what was there
    fn save_best(&mut self, score: u64) -> Result<()>;

    /// Offer a finished run that did not beat the best
    ///
    /// Single-value stores ignore it; ranked stores may still place it.
    fn submit(&mut self, _score: u64) -> Result<()> {
        Ok(())
    }
}

/// Recovery policy around a `ScoreStore`
pub struct ScoreKeeper {
    store: Box<dyn ScoreStore>,
}

impl ScoreKeeper {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Best score, or 0 if the store can't be read
    pub fn load(&self) -> u64 {
        match self.store.load_best() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not load best score, starting from 0: {}", e);
                0
            }
        }
    }

    /// Record a finished run and return the best score to show next
    ///
    /// Writes first if `score` beats `best`, then reloads from the store.
    pub fn record(&mut self, score: u64, best: u64) -> u64 {
        let mut kept = 0;
        if score > best {
            match self.store.save_best(score) {
                Ok(()) => log::info!("New best score {} saved", score),
                Err(e) => {
                    log::warn!("Could not save best score {}: {}", score, e);
                    kept = score;
                }
            }
        } else if let Err(e) = self.store.submit(score) {
            log::warn!("Could not submit score {}: {}", score, e);
        }
        match self.store.load_best() {
            Ok(stored) => stored.max(kept),
            Err(e) => {
                log::warn!("Could not reload best score, keeping {}: {}", best, e);
                best.max(kept)
            }
        }
    }
}
