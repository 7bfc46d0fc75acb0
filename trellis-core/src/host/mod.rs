//! Host Tree Contract
//!
//! The runtime never owns the output tree; it mutates one through the small
//! set of node primitives below. A host is anything that can create element
//! and text nodes and splice them into a parent: a browser DOM binding, a
//! terminal buffer, or the in-memory tree in [`memory`] used by the test
//! suite.
//!
//! Handles are cheap cloneable references to host nodes. The runtime clones
//! and compares them but never inspects their contents; everything it knows
//! about the tree it learns from its own committed virtual trees.
//!
//! Host primitives are assumed infallible by the layers above. If a host
//! panics or misbehaves, that propagates unmodified; the reconciler makes no
//! attempt at partial-mutation rollback.

mod memory;

pub use memory::{MemoryHost, MemoryNode};

use crate::vdom::AttrValue;

/// The node primitives the runtime needs from an output tree.
pub trait Host: Send + Sync {
    /// A cheap cloneable reference to a node in the output tree.
    type Node: Clone + Send + Sync + 'static;

    fn create_element(&self, tag: &str) -> Self::Node;

    fn create_text(&self, text: &str) -> Self::Node;

    fn set_attribute(&self, node: &Self::Node, key: &str, value: &AttrValue);

    fn remove_attribute(&self, node: &Self::Node, key: &str);

    fn append_child(&self, parent: &Self::Node, child: &Self::Node);

    fn replace_child(&self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node);

    fn remove_child_at(&self, parent: &Self::Node, index: usize);

    fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;

    /// Whether `node` may serve as a render root. Hosts that distinguish
    /// attached from detached handles, or element from text nodes, reject
    /// unusable roots here.
    fn is_valid_root(&self, node: &Self::Node) -> bool {
        let _ = node;
        true
    }
}
