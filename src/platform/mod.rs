//! Platform input glue
//!
//! The input context (an event loop, a terminal, a test) and the frame thread
//! share one `InputFlags`. Writers set intents at any time; the frame thread
//! takes a snapshot at the start of each tick.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::sim::TickInput;

/// Input intents shared between threads
#[derive(Debug, Default)]
pub struct InputFlags {
    ascend: AtomicBool,
    activate: AtomicBool,
}

impl InputFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press (true) or release (false)
    pub fn set_ascend(&self, held: bool) {
        self.ascend.store(held, Ordering::Relaxed);
    }

    /// Ask to start a run; seen by exactly one snapshot
    pub fn request_activate(&self) {
        self.activate.store(true, Ordering::Relaxed);
    }

    /// Convenience for touch input: a press both activates and ascends
    pub fn press(&self) {
        self.request_activate();
        self.set_ascend(true);
    }

    pub fn release(&self) {
        self.set_ascend(false);
    }

    /// Current intents for one tick, consuming a pending activate
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            ascend: self.ascend.load(Ordering::Relaxed),
            activate: self.activate.swap(false, Ordering::Relaxed),
        }
    }
}
