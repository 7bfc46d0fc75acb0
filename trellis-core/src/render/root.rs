//! Per-Root Renderer
//!
//! A [`Renderer`] owns everything one output root needs: the committed and
//! previous virtual trees, the hook runtime whose re-render trigger feeds
//! back into the pipeline, and the scheduler that decides when a requested
//! pass runs.
//!
//! # Lifecycle
//!
//! A pass moves the root through `Idle -> Rendering -> Committed -> Idle`.
//! `Rendering` spans the window between the cursor rewind and the end of
//! reconciliation; `Committed` is the instant the tree pointers swap. Only
//! one pass can be in flight: a re-render requested while `Rendering` sets
//! a pending flag, and the pass loops after commit instead of nesting.
//!
//! # Ownership
//!
//! The renderer exclusively owns both virtual trees and the hook session.
//! The host root itself stays owned by the host; the renderer only mutates
//! it through the reconciler. Independent roots share nothing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use super::scheduler::{RenderTask, Scheduler, SyncScheduler};
use crate::error::{RenderError, Result};
use crate::hooks::{HookRuntime, RerenderFn};
use crate::host::Host;
use crate::vdom::{patch, VChild, VNode};

/// Unique identifier for a root renderer.
///
/// Carried as a log field so passes of different roots can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(u64);

impl RootId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Where a root currently is in its render lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// No pass in flight.
    Idle,

    /// Between the cursor rewind and the end of reconciliation.
    Rendering,

    /// The instant the tree pointers swap.
    Committed,
}

type ComponentFn = dyn Fn(&HookRuntime) -> Result<VNode> + Send + Sync;

struct RootState {
    /// Tree committed by the last completed pass.
    current: Option<VChild>,
    /// Tree committed by the pass before that.
    before: Option<VChild>,
    phase: RenderPhase,
}

struct RootInner<H: Host> {
    id: RootId,
    host: H,
    root: H::Node,
    component: Box<ComponentFn>,
    hooks: HookRuntime,
    state: Mutex<RootState>,
    /// A re-render was requested while a pass was already in flight.
    pending: AtomicBool,
    scheduler: Arc<dyn Scheduler>,
}

/// Drives rendering for one output root.
///
/// Cloning yields another handle to the same root.
pub struct Renderer<H: Host> {
    inner: Arc<RootInner<H>>,
}

impl<H: Host> Clone for Renderer<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: Host> std::fmt::Debug for Renderer<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}

impl<H> Renderer<H>
where
    H: Host + 'static,
{
    /// Mount `component` onto `root` and run the first pass, re-rendering
    /// synchronously on every state change.
    pub fn mount<C>(host: H, root: H::Node, component: C) -> Result<Self>
    where
        C: Fn(&HookRuntime) -> Result<VNode> + Send + Sync + 'static,
    {
        Self::mount_with_scheduler(host, root, component, Arc::new(SyncScheduler::new()))
    }

    /// Mount with an explicit scheduling strategy.
    ///
    /// The first pass always runs before this returns, whatever the
    /// scheduler; only re-renders go through it.
    pub fn mount_with_scheduler<C>(
        host: H,
        root: H::Node,
        component: C,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self>
    where
        C: Fn(&HookRuntime) -> Result<VNode> + Send + Sync + 'static,
    {
        if !host.is_valid_root(&root) {
            return Err(RenderError::DetachedRoot(
                "host rejected the render root".into(),
            ));
        }

        let id = RootId::next();
        let inner = Arc::new_cyclic(|weak: &Weak<RootInner<H>>| {
            let weak = weak.clone();
            let rerender: RerenderFn = Arc::new(move || match weak.upgrade() {
                Some(inner) => RootInner::request_render(&inner),
                None => Ok(()),
            });
            RootInner {
                id,
                host,
                root,
                component: Box::new(component),
                hooks: HookRuntime::new(rerender),
                state: Mutex::new(RootState {
                    current: None,
                    before: None,
                    phase: RenderPhase::Idle,
                }),
                pending: AtomicBool::new(false),
                scheduler,
            }
        });

        debug!(root = id.raw(), "mounting root");
        RootInner::render_pass(&inner)?;
        Ok(Self { inner })
    }

    pub fn id(&self) -> RootId {
        self.inner.id
    }

    pub fn phase(&self) -> RenderPhase {
        self.inner.state.lock().phase
    }

    /// A clone of the committed virtual tree, for inspection.
    pub fn current_tree(&self) -> Option<VNode> {
        match &self.inner.state.lock().current {
            Some(VChild::Element(node)) => Some(node.clone()),
            _ => None,
        }
    }
}

impl<H> RootInner<H>
where
    H: Host + 'static,
{
    /// Entry point for the hook runtime's re-render trigger.
    fn request_render(inner: &Arc<Self>) -> Result<()> {
        {
            let state = inner.state.lock();
            if state.phase == RenderPhase::Rendering {
                // The pass on the stack picks this up after commit.
                inner.pending.store(true, Ordering::SeqCst);
                return Ok(());
            }
        }

        let weak = Arc::downgrade(inner);
        let task: RenderTask = Arc::new(move || match weak.upgrade() {
            Some(inner) => Self::render_pass(&inner),
            None => Ok(()),
        });
        inner.scheduler.schedule(task)
    }

    fn render_pass(inner: &Arc<Self>) -> Result<()> {
        loop {
            {
                let mut state = inner.state.lock();
                if state.phase == RenderPhase::Rendering {
                    inner.pending.store(true, Ordering::SeqCst);
                    return Ok(());
                }
                state.phase = RenderPhase::Rendering;
            }
            inner.pending.store(false, Ordering::SeqCst);

            let result = Self::run_pass(inner);
            inner.state.lock().phase = RenderPhase::Idle;
            result?;

            if !inner.pending.load(Ordering::SeqCst) {
                return Ok(());
            }
            debug!(root = inner.id.raw(), "re-render requested mid-pass");
        }
    }

    fn run_pass(inner: &Arc<Self>) -> Result<()> {
        debug!(root = inner.id.raw(), "render pass");
        inner.hooks.reset_context();
        let new_tree = (inner.component)(&inner.hooks)?;
        // Slot misalignment must surface before any host mutation.
        inner.hooks.finish_pass()?;

        let new_child = VChild::Element(new_tree);
        let mut state = inner.state.lock();
        patch(
            &inner.host,
            &inner.root,
            Some(&new_child),
            state.current.as_ref(),
            0,
        )?;
        state.before = state.current.take();
        state.current = Some(new_child);
        state.phase = RenderPhase::Committed;
        debug!(root = inner.id.raw(), "committed");
        Ok(())
    }
}

/// Mount `component` onto `root` with synchronous re-rendering.
///
/// Thin wrapper over [`Renderer::mount`] for callers that only need the
/// handle to keep the root alive.
pub fn render<H, C>(host: H, root: H::Node, component: C) -> Result<Renderer<H>>
where
    H: Host + 'static,
    C: Fn(&HookRuntime) -> Result<VNode> + Send + Sync + 'static,
{
    Renderer::mount(host, root, component)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
