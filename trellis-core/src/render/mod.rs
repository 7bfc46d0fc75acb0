//! Root Renderer
//!
//! This module owns the render pipeline for one output root: it wires the
//! hook runtime's re-render trigger to the reconciler and keeps the pair of
//! committed virtual trees that reconciliation diffs against.
//!
//! # Data Flow
//!
//! 1. A pass starts: the hook cursors rewind.
//!
//! 2. The component function runs, calling its hooks in a fixed order and
//!    returning a new virtual tree.
//!
//! 3. The hook-call counts are checked; a misaligned pass aborts here,
//!    before any host mutation.
//!
//! 4. The reconciler diffs the new tree against the committed one and
//!    mutates the host root.
//!
//! 5. The new tree becomes the committed one.
//!
//! A state mutation re-enters this pipeline through the root's scheduler:
//! immediately with [`SyncScheduler`], or coalesced into the next flush with
//! [`DeferredScheduler`].

mod root;
mod scheduler;

pub use root::{render, RenderPhase, Renderer, RootId};
pub use scheduler::{DeferredScheduler, RenderTask, Scheduler, SyncScheduler};
