//! Hook Runtime
//!
//! The runtime hands out state and memo slots in call order and owns the
//! session they live in.
//!
//! # How a Pass Works
//!
//! 1. [`HookRuntime::reset_context`] rewinds both cursors.
//!
//! 2. The component function runs, and every `use_state`/`use_memo` call
//!    claims the next slot: reusing what a previous pass stored there, or
//!    allocating on first contact.
//!
//! 3. [`HookRuntime::finish_pass`] compares the number of hook calls with
//!    the previous pass and rejects the pass if they disagree.
//!
//! # Locking
//!
//! The session lock is never held across user code: memo computations run
//! with the lock released, and the re-render trigger fires after a state
//! write has already been committed and unlocked.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::slots::{Dep, DepList, MemoSlot, RenderSession, SlotValue};
use crate::error::{RenderError, Result};

/// Callback invoked when a state slot changes and a re-render is needed.
pub type RerenderFn = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// Hands out hook slots for one runtime instance.
///
/// Each runtime owns its [`RenderSession`]; independent runtimes are fully
/// isolated from one another.
pub struct HookRuntime {
    session: Arc<RwLock<RenderSession>>,
    rerender: RerenderFn,
}

impl HookRuntime {
    /// Create a runtime with a fresh session.
    ///
    /// `rerender` is invoked whenever a state mutation actually changes a
    /// slot value.
    pub fn new(rerender: RerenderFn) -> Self {
        Self {
            session: Arc::new(RwLock::new(RenderSession::new())),
            rerender,
        }
    }

    /// Rewind the slot cursors. Must be invoked exactly once at the start
    /// of every render pass, before the component function runs.
    pub fn reset_context(&self) {
        self.session.write().reset();
    }

    /// Check this pass's hook-call counts against the previous pass.
    ///
    /// The root renderer calls this after the component function returns
    /// and before any host mutation, so a misaligned pass never commits.
    pub fn finish_pass(&self) -> Result<()> {
        self.session.write().finish_pass()
    }

    /// Claim the next state slot.
    ///
    /// Returns the slot's current value (the initial value on first
    /// contact) and a [`SetState`] handle bound to the slot.
    pub fn use_state<T>(&self, initial: T) -> Result<(T, SetState<T>)>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        let (value, slot) = {
            let mut session = self.session.write();
            let cursor = session.advance_state_cursor();
            let value = match session.state_slot(cursor) {
                Some(existing) => existing
                    .clone()
                    .downcast::<T>()
                    .map_err(|_| slot_type_violation("state", cursor))?,
                None => {
                    let fresh = Arc::new(initial);
                    let stored: SlotValue = fresh.clone();
                    session.put_state_slot(cursor, stored);
                    fresh
                }
            };
            ((*value).clone(), cursor)
        };

        Ok((
            value,
            SetState {
                session: Arc::clone(&self.session),
                slot,
                rerender: Arc::clone(&self.rerender),
                _value: PhantomData,
            },
        ))
    }

    /// Claim the next memo slot.
    ///
    /// `compute` runs when the slot is empty or when `deps` changed since
    /// the cached computation; otherwise the cached value comes back as the
    /// same `Arc`. An empty `deps` list means the first computation is kept
    /// forever.
    pub fn use_memo<T, F>(&self, compute: F, deps: &[Dep]) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        let (cursor, cached) = {
            let mut session = self.session.write();
            let cursor = session.advance_memo_cursor();
            let cached = match session.memo_slot(cursor) {
                None => None,
                Some(slot) => {
                    if !slot.value.is::<T>() {
                        return Err(slot_type_violation("memo", cursor));
                    }
                    if deps.is_empty() || !deps_changed(&slot.deps, deps) {
                        slot.value.clone().downcast::<T>().ok()
                    } else {
                        None
                    }
                }
            };
            (cursor, cached)
        };

        if let Some(value) = cached {
            return Ok(value);
        }

        // The computation runs with the session lock released.
        let value = Arc::new(compute());
        let stored: SlotValue = value.clone();
        trace!(slot = cursor, "memo recomputed");
        self.session.write().put_memo_slot(
            cursor,
            MemoSlot {
                value: stored,
                deps: deps.iter().cloned().collect::<DepList>(),
            },
        );
        Ok(value)
    }
}

impl fmt::Debug for HookRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.session.read();
        f.debug_struct("HookRuntime")
            .field("state_cursor", &session.state_cursor())
            .field("memo_cursor", &session.memo_cursor())
            .finish()
    }
}

/// Positional comparison against the previous pass's dep list.
///
/// The walk runs over the previously recorded deps: a dep list that grew
/// while its shared prefix stayed equal does not count as changed. The
/// empty-new-deps case never reaches this function.
fn deps_changed(previous: &[Dep], next: &[Dep]) -> bool {
    previous
        .iter()
        .enumerate()
        .any(|(i, prev)| next.get(i) != Some(prev))
}

fn slot_type_violation(kind: &str, cursor: usize) -> RenderError {
    RenderError::HookOrderViolation(format!(
        "{kind} slot {cursor} holds a value of a different type"
    ))
}

/// Writes to one state slot.
///
/// Cloneable and usable from outside a render pass; the slot index stays
/// valid for the lifetime of the runtime.
pub struct SetState<T> {
    session: Arc<RwLock<RenderSession>>,
    slot: usize,
    rerender: RerenderFn,
    _value: PhantomData<fn() -> T>,
}

impl<T> SetState<T>
where
    T: PartialEq + Send + Sync + 'static,
{
    /// Overwrite the slot and trigger a re-render.
    ///
    /// Writing a value equal to the current one is a no-op: the slot keeps
    /// its contents and no re-render is triggered. The slot write itself is
    /// synchronous even when the wired scheduler defers the actual pass, so
    /// a later read within the same scheduling window sees the new value.
    pub fn set(&self, next: T) -> Result<()> {
        {
            let mut session = self.session.write();
            let current = session.state_slot(self.slot).ok_or_else(|| {
                RenderError::HookOrderViolation(format!(
                    "state slot {} has never been populated",
                    self.slot
                ))
            })?;
            let current = current
                .clone()
                .downcast::<T>()
                .map_err(|_| slot_type_violation("state", self.slot))?;
            if *current == next {
                trace!(slot = self.slot, "set_state skipped, value unchanged");
                return Ok(());
            }
            session.put_state_slot(self.slot, Arc::new(next));
        }
        (self.rerender)()
    }
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            slot: self.slot,
            rerender: Arc::clone(&self.rerender),
            _value: PhantomData,
        }
    }
}

impl<T> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetState").field("slot", &self.slot).finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
