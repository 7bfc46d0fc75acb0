//! Hook Slot Storage
//!
//! A [`RenderSession`] is the explicit storage a hook runtime works against:
//! one ordered slot array for state, one for memos, and the cursors that
//! address them by call order. Cursors rewind to zero at the start of every
//! render pass; the arrays persist across passes.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{RenderError, Result};

/// Type-erased slot contents.
pub(crate) type SlotValue = Arc<dyn Any + Send + Sync>;

/// Memo dependency list. Almost always short, so it lives inline.
pub(crate) type DepList = SmallVec<[Dep; 4]>;

/// A cached memo computation with the dependencies it was computed under.
pub(crate) struct MemoSlot {
    pub value: SlotValue,
    pub deps: DepList,
}

/// A single memo dependency: a type-erased value compared shallowly.
///
/// Two deps are equal when they hold the same type and the values compare
/// equal. A type mismatch compares as not-equal rather than erroring, which
/// simply forces a recomputation.
pub struct Dep(Arc<dyn DynEq>);

trait DynEq: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynEq) -> bool;
}

impl<T> DynEq for T
where
    T: PartialEq + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynEq) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }
}

impl Dep {
    pub fn of<T>(value: T) -> Self
    where
        T: PartialEq + Send + Sync + 'static,
    {
        Self(Arc::new(value))
    }
}

impl Clone for Dep {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl PartialEq for Dep {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(other.0.as_ref())
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dep(..)")
    }
}

/// Per-runtime hook storage.
///
/// Owned by exactly one [`HookRuntime`](super::HookRuntime); never shared
/// across roots.
pub struct RenderSession {
    state_slots: Vec<SlotValue>,
    state_cursor: usize,
    memo_slots: Vec<MemoSlot>,
    memo_cursor: usize,
    /// Hook-call counts recorded by the first completed pass.
    recorded_counts: Option<(usize, usize)>,
}

impl RenderSession {
    pub fn new() -> Self {
        Self {
            state_slots: Vec::new(),
            state_cursor: 0,
            memo_slots: Vec::new(),
            memo_cursor: 0,
            recorded_counts: None,
        }
    }

    /// Rewind both cursors. Must run before every render pass, exactly once.
    pub fn reset(&mut self) {
        self.state_cursor = 0;
        self.memo_cursor = 0;
    }

    pub fn state_cursor(&self) -> usize {
        self.state_cursor
    }

    pub fn memo_cursor(&self) -> usize {
        self.memo_cursor
    }

    pub(crate) fn advance_state_cursor(&mut self) -> usize {
        let cursor = self.state_cursor;
        self.state_cursor += 1;
        cursor
    }

    pub(crate) fn advance_memo_cursor(&mut self) -> usize {
        let cursor = self.memo_cursor;
        self.memo_cursor += 1;
        cursor
    }

    pub(crate) fn state_slot(&self, index: usize) -> Option<&SlotValue> {
        self.state_slots.get(index)
    }

    pub(crate) fn put_state_slot(&mut self, index: usize, value: SlotValue) {
        if index < self.state_slots.len() {
            self.state_slots[index] = value;
        } else {
            debug_assert_eq!(index, self.state_slots.len());
            self.state_slots.push(value);
        }
    }

    pub(crate) fn memo_slot(&self, index: usize) -> Option<&MemoSlot> {
        self.memo_slots.get(index)
    }

    pub(crate) fn put_memo_slot(&mut self, index: usize, slot: MemoSlot) {
        if index < self.memo_slots.len() {
            self.memo_slots[index] = slot;
        } else {
            debug_assert_eq!(index, self.memo_slots.len());
            self.memo_slots.push(slot);
        }
    }

    /// Close out a render pass: check the hook-call counts against the
    /// previous pass and record them for the next one.
    pub fn finish_pass(&mut self) -> Result<()> {
        let counts = (self.state_cursor, self.memo_cursor);
        match self.recorded_counts {
            None => {
                self.recorded_counts = Some(counts);
                Ok(())
            }
            Some(expected) if expected == counts => Ok(()),
            Some(expected) => Err(RenderError::HookOrderViolation(format!(
                "hook calls changed between passes: {} state and {} memo, previously {} and {}",
                counts.0, counts.1, expected.0, expected.1
            ))),
        }
    }
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
