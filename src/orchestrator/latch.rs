//! The "turn in progress" latch.
//!
//! The orchestrator engages the latch for the whole of a local submission,
//! bot turns included. A clone handed to the UI lets it grey out input while
//! the latch is held.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag guarding local submissions.
#[derive(Clone, Debug, Default)]
pub struct TurnLatch {
    engaged: Arc<AtomicBool>,
}

impl TurnLatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.engaged.load(Ordering::Acquire)
    }

    /// Engage the latch, or `None` if it is already held.
    #[must_use]
    pub fn try_engage(&self) -> Option<LatchGuard> {
        self.engaged
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LatchGuard {
                engaged: Arc::clone(&self.engaged),
            })
    }
}

/// Holds the latch until dropped.
#[derive(Debug)]
pub struct LatchGuard {
    engaged: Arc<AtomicBool>,
}

impl Drop for LatchGuard {
    fn drop(&mut self) {
        self.engaged.store(false, Ordering::Release);
    }
}
