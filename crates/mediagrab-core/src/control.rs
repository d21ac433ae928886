//! Cooperative cancellation for poll loops.
//!
//! A `CancelHandle` is a shared flag: the poller checks it before each
//! re-poll and before delivering a snapshot, and stops without resolving
//! or failing once it is set. One handle per job; clones share the flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent; the poll loop notices at its next
    /// check point.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
