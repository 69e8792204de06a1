//! One-shot deferred notification
//!
//! The transport's "opened" lifecycle hook fires on its read-dispatch thread
//! and may be delivered more than once. Application callbacks must run at
//! most once, and never inline on that thread, or the read path stalls. This
//! primitive pairs an atomic compare-and-set with a single task submission
//! and is reusable anywhere a callback must fire exactly once off the I/O
//! path.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

/// Fires a callback at most once, on the tokio worker pool
#[derive(Debug, Default)]
pub struct OnceNotifier {
    fired: AtomicBool,
}

impl OnceNotifier {
    pub fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    /// Schedule `task` if no earlier call already did
    ///
    /// Only the caller that wins the false→true transition submits the task;
    /// every later call is a no-op. The task runs on the worker pool, never
    /// synchronously in the caller. Task errors are logged, not propagated.
    ///
    /// Returns whether this call scheduled the task.
    pub fn notify<F>(&self, task: F) -> bool
    where
        F: FnOnce() -> crate::Result<()> + Send + 'static,
    {
        if self
            .fired
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        tokio::spawn(async move {
            if let Err(e) = task() {
                warn!("deferred notification failed: {}", e);
            }
        });
        true
    }

    /// Whether the transition has already happened
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}
