//! Hook Runtime
//!
//! This module implements the hook side of the component model: persistent
//! state and memo slots addressed by call order.
//!
//! # Concepts
//!
//! ## Slots
//!
//! A hook call does not name its storage; it is assigned the next slot in a
//! per-runtime [`RenderSession`], in the order the calls happen. That makes
//! the one hard rule of the model: a component must call its hooks in the
//! same order and count on every render pass. The runtime checks the count
//! at the end of each pass and the slot type on every reuse, and raises a
//! hook order violation when either disagrees.
//!
//! ## Re-render trigger
//!
//! The runtime is constructed with a callback. A state mutation that
//! actually changes a slot invokes it; the root renderer wires it to its
//! scheduler. Writing an equal value is a no-op and triggers nothing.
//!
//! # Isolation
//!
//! There is no global slot table. Every runtime owns its session outright,
//! so independent roots (and independent tests) can never corrupt each
//! other's state.

mod runtime;
mod slots;

pub use runtime::{HookRuntime, RerenderFn, SetState};
pub use slots::{Dep, RenderSession};
