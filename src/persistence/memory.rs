//! In-memory store for headless runs and tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::ScoreStore;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct Inner {
    best: Mutex<Option<u64>>,
    failing: AtomicBool,
    saves: AtomicUsize,
}

/// Shared in-memory best score; clones see the same value
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        let store = Self::new();
        *store.lock() = Some(best);
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<u64>> {
        self.inner.best.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every load and save fail
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::Relaxed);
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.inner.saves.load(Ordering::Relaxed)
    }

    pub fn stored(&self) -> Option<u64> {
        *self.lock()
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> Result<u64> {
        if self.inner.failing.load(Ordering::Relaxed) {
            return Err(Error::StoreUnavailable);
        }
        Ok(self.lock().unwrap_or(0))
    }

    fn save_best(&mut self, score: u64) -> Result<()> {
        if self.inner.failing.load(Ordering::Relaxed) {
            return Err(Error::StoreUnavailable);
        }
        *self.lock() = Some(score);
        self.inner.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
