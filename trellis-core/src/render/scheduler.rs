//! Render Scheduling
//!
//! A root renderer does not decide when a requested pass runs; its scheduler
//! does. Two strategies cover the runtime's contract:
//!
//! - [`SyncScheduler`] runs every pass before the request returns. State is
//!   observed in the exact sequence of mutations; each one fully commits
//!   before the next can be observed.
//!
//! - [`DeferredScheduler`] coalesces every pass requested before the next
//!   flush into at most one. Slot writes still land synchronously; only the
//!   pass is deferred, so the flushed render reflects the last value written
//!   to each slot. Intermediate values are never separately rendered.
//!
//! A scheduler instance belongs to one root renderer. Sharing one between
//! roots would let their passes coalesce into each other.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::error::Result;

/// A deferred render pass, ready to run.
pub type RenderTask = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// Decides when a requested render pass actually runs.
pub trait Scheduler: Send + Sync {
    /// Accept a render pass. Depending on the strategy this runs it before
    /// returning or parks it for a later flush.
    fn schedule(&self, task: RenderTask) -> Result<()>;
}

/// Runs every scheduled pass immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyncScheduler;

impl SyncScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for SyncScheduler {
    fn schedule(&self, task: RenderTask) -> Result<()> {
        task()
    }
}

/// Coalesces scheduled passes until [`flush`](DeferredScheduler::flush).
///
/// The embedder decides what bounds a scheduling window: wire the waker to
/// an animation-frame or microtask primitive and call `flush` when it
/// fires. There is no cancellation; once a pass is parked, the next flush
/// runs it.
pub struct DeferredScheduler {
    pending: Mutex<Option<RenderTask>>,
    waker: Option<Box<dyn Fn() + Send + Sync>>,
}

impl DeferredScheduler {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            waker: None,
        }
    }

    /// Like [`new`](Self::new), with a callback invoked when the first pass
    /// of a window is parked. Use it to arm the host's deferral primitive.
    pub fn with_waker<F>(waker: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            pending: Mutex::new(None),
            waker: Some(Box::new(waker)),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Run the coalesced pass, if any. Closes the current scheduling
    /// window; the next scheduled pass arms the waker again.
    pub fn flush(&self) -> Result<()> {
        let task = self.pending.lock().take();
        match task {
            Some(task) => task(),
            None => Ok(()),
        }
    }
}

impl Default for DeferredScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for DeferredScheduler {
    fn schedule(&self, task: RenderTask) -> Result<()> {
        let first_in_window = {
            let mut pending = self.pending.lock();
            let first = pending.is_none();
            *pending = Some(task);
            first
        };
        if first_in_window {
            trace!("render pass parked until flush");
            if let Some(waker) = &self.waker {
                waker();
            }
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
