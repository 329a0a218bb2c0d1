use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation signal for a running search.
///
/// Clones share the same flag, so a handle can be moved to another thread
/// and used to stop a search running on the pathfinder's thread. The search
/// checks the flag between node expansions.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    should_stop: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the current search to stop.
    pub fn stop(&self) {
        self.should_stop.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.should_stop.load(Ordering::Acquire)
    }

    pub(crate) fn reset(&self) {
        self.should_stop.store(false, Ordering::Release);
    }
}
