//! Mount/run/teardown state for a particle field.
//!
//! ```text
//! Uninitialized --mount--> Initialized --start--> Running --teardown--> TornDown
//! ```
//!
//! `teardown` is accepted from every phase and is idempotent. The driver's
//! scheduled ticks hold a [`LoopHandle`]; teardown flips it synchronously so a
//! tick already queued before teardown sees the loop as cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where a field is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Created, no surface yet.
    #[default]
    Uninitialized,
    /// Particles generated for a surface; loop not started.
    Initialized,
    /// Ticking once per frame.
    Running,
    /// Detached; every further tick is a no-op.
    TornDown,
}

impl Phase {
    /// Whether a surface has been attached and not yet detached.
    pub fn is_mounted(self) -> bool {
        matches!(self, Phase::Initialized | Phase::Running)
    }
}

/// Cancellation token shared between a field and its driver loop.
///
/// Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    active: Arc<AtomicBool>,
}

impl LoopHandle {
    pub(crate) fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn activate(&self) {
        self.active.store(true, Ordering::Release);
    }

    /// Cancel the loop. Returns true only for the call that actually cancelled it.
    pub(crate) fn cancel(&self) -> bool {
        self.active.swap(false, Ordering::AcqRel)
    }

    /// Whether the driver should keep scheduling ticks.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_starts_inactive() {
        assert!(!LoopHandle::new().is_active());
    }

    #[test]
    fn test_cancel_is_seen_by_clones() {
        let handle = LoopHandle::new();
        let scheduled = handle.clone();
        handle.activate();
        assert!(scheduled.is_active());

        assert!(handle.cancel());
        assert!(!scheduled.is_active());
        assert!(!handle.cancel());
    }

    #[test]
    fn test_phase_is_mounted() {
        assert!(!Phase::Uninitialized.is_mounted());
        assert!(Phase::Initialized.is_mounted());
        assert!(Phase::Running.is_mounted());
        assert!(!Phase::TornDown.is_mounted());
    }
}
