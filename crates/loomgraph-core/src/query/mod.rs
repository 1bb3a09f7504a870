//! Read-only query kernels: breadth-first traversal and bidirectional
//! shortest path.
//!
//! Neither kernel takes a lock beyond what [`crate::store::Store`] already
//! takes internally per neighbor lookup; they run concurrently with any
//! number of other readers and with the in-flight writer (§5).

pub mod path;
pub mod traversal;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperative cancellation flag (§5 "Cancellation & timeouts"). The
/// kernels check this between BFS levels; setting it does not interrupt
/// work already in flight within a level, only stops the next one from
/// starting.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a new, not-yet-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
