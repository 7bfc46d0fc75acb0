//! Error Taxonomy
//!
//! Every failure in the runtime is one of a small number of conditions, and
//! all of them are fatal for the operation that raised them. Rendering is not
//! I/O: there is nothing to retry, so errors surface synchronously to the
//! caller of `mount`, `set`, or `flush` and are never swallowed.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, RenderError>;

/// The failure conditions of the rendering runtime.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The number, order, or type of hook calls differs between two render
    /// passes of the same runtime instance. Slot contents can no longer be
    /// trusted, so the pass aborts before any host mutation commits.
    #[error("hook order violation: {0}")]
    HookOrderViolation(String),

    /// A virtual node is structurally unusable (for example an element with
    /// an empty tag). Fatal for the subtree being processed.
    #[error("invalid vnode: {0}")]
    InvalidVNode(String),

    /// The handle passed as a render root was rejected by the host.
    #[error("detached root: {0}")]
    DetachedRoot(String),

    /// The committed virtual tree and the live host tree disagree. This can
    /// only happen when something outside the renderer mutates host nodes
    /// the renderer owns.
    #[error("host tree out of sync: {0}")]
    HostDesync(String),
}
