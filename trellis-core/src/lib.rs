//! Trellis Core
//!
//! This crate provides the core runtime for the Trellis reactive rendering
//! framework. It implements:
//!
//! - A virtual node model and `jsx`-style factory
//! - A tree materializer and an in-place positional reconciler
//! - A hook runtime (`use_state`, `use_memo`) with call-order slot addressing
//! - A per-root renderer with pluggable render scheduling
//!
//! The runtime is host-agnostic: it mutates an output tree only through the
//! small set of node primitives in [`host::Host`], so the same core drives a
//! real DOM, a terminal buffer, or the bundled in-memory test host.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `vdom`: virtual node model, materialization, and reconciliation
//! - `hooks`: hook slot storage and the hook runtime
//! - `render`: root renderer and scheduling strategies
//! - `host`: the output-tree contract and the in-memory reference host
//! - `error`: the error taxonomy shared by every layer
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_core::host::MemoryHost;
//! use trellis_core::render::Renderer;
//! use trellis_core::vdom::jsx;
//!
//! let host = MemoryHost::new();
//! let root = host.create_root("div");
//!
//! let renderer = Renderer::mount(host, root.clone(), |hooks| {
//!     let (count, set_count) = hooks.use_state(0)?;
//!     Ok(jsx("div", None, [format!("count: {count}").into()]))
//! })?;
//!
//! // A set_state call re-runs the component and patches the host tree
//! // in place; untouched nodes keep their identity.
//! ```

pub mod error;
pub mod hooks;
pub mod host;
pub mod render;
pub mod vdom;
