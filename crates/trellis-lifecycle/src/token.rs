//! Per-mount cancellation tokens.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token tied to one mount of a route instance.
///
/// Cancelling does not interrupt the precondition itself; it only tells the
/// registry to discard the precondition's effects once it settles.
#[derive(Debug, Clone, Default)]
pub struct MountToken {
    cancelled: Arc<AtomicBool>,
}

impl MountToken {
    /// Create a live token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the mount as gone.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether the mount has been torn down.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether two tokens belong to the same mount.
    pub fn same_mount(&self, other: &MountToken) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}
