//! In-Memory Host
//!
//! A reference implementation of the [`Host`] contract backed by a plain
//! in-memory tree. It exists for the test suite and for embedders that have
//! no real output tree, and it keeps the two properties the runtime's
//! guarantees are stated in terms of:
//!
//! - Handles have identity: [`MemoryNode::ptr_eq`] answers whether two
//!   handles refer to the same live node, which is how the tests verify that
//!   reconciliation preserves untouched nodes.
//! - Trees serialize deterministically: [`MemoryNode::outer_html`] renders
//!   the markup form (`<div id="x">hello</div>`) with attributes in
//!   insertion order.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::Host;
use crate::vdom::AttrValue;

/// Factory for in-memory nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryHost;

impl MemoryHost {
    pub fn new() -> Self {
        Self
    }

    /// Create a detached element suitable as a render root.
    pub fn create_root(&self, tag: &str) -> MemoryNode {
        MemoryNode::element(tag)
    }
}

/// A handle to a node in an in-memory tree.
///
/// Clones share the underlying node, like host handles everywhere else.
#[derive(Clone)]
pub struct MemoryNode(Arc<RwLock<NodeData>>);

#[derive(Debug)]
enum NodeData {
    Element {
        tag: String,
        attrs: IndexMap<String, String>,
        children: Vec<MemoryNode>,
    },
    Text(String),
}

impl MemoryNode {
    fn element(tag: &str) -> Self {
        Self(Arc::new(RwLock::new(NodeData::Element {
            tag: tag.to_string(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        })))
    }

    fn text(text: &str) -> Self {
        Self(Arc::new(RwLock::new(NodeData::Text(text.to_string()))))
    }

    /// Whether two handles refer to the same live node.
    pub fn ptr_eq(&self, other: &MemoryNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_element(&self) -> bool {
        matches!(*self.0.read(), NodeData::Element { .. })
    }

    pub fn tag(&self) -> Option<String> {
        match &*self.0.read() {
            NodeData::Element { tag, .. } => Some(tag.clone()),
            NodeData::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> Option<String> {
        match &*self.0.read() {
            NodeData::Text(text) => Some(text.clone()),
            NodeData::Element { .. } => None,
        }
    }

    pub fn attribute(&self, key: &str) -> Option<String> {
        match &*self.0.read() {
            NodeData::Element { attrs, .. } => attrs.get(key).cloned(),
            NodeData::Text(_) => None,
        }
    }

    pub fn child(&self, index: usize) -> Option<MemoryNode> {
        match &*self.0.read() {
            NodeData::Element { children, .. } => children.get(index).cloned(),
            NodeData::Text(_) => None,
        }
    }

    pub fn child_count(&self) -> usize {
        match &*self.0.read() {
            NodeData::Element { children, .. } => children.len(),
            NodeData::Text(_) => 0,
        }
    }

    /// Markup for this node's children.
    pub fn inner_html(&self) -> String {
        match &*self.0.read() {
            NodeData::Element { children, .. } => {
                children.iter().map(MemoryNode::outer_html).collect()
            }
            NodeData::Text(text) => text.clone(),
        }
    }

    /// Markup for this node, children included.
    pub fn outer_html(&self) -> String {
        match &*self.0.read() {
            NodeData::Text(text) => text.clone(),
            NodeData::Element { tag, attrs, children } => {
                let mut out = String::new();
                out.push('<');
                out.push_str(tag);
                for (key, value) in attrs {
                    out.push(' ');
                    out.push_str(key);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                out.push('>');
                for child in children {
                    out.push_str(&child.outer_html());
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                out
            }
        }
    }
}

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MemoryNode").field(&self.outer_html()).finish()
    }
}

impl Host for MemoryHost {
    type Node = MemoryNode;

    fn create_element(&self, tag: &str) -> MemoryNode {
        MemoryNode::element(tag)
    }

    fn create_text(&self, text: &str) -> MemoryNode {
        MemoryNode::text(text)
    }

    fn set_attribute(&self, node: &MemoryNode, key: &str, value: &AttrValue) {
        if let NodeData::Element { attrs, .. } = &mut *node.0.write() {
            attrs.insert(key.to_string(), value.render());
        }
    }

    fn remove_attribute(&self, node: &MemoryNode, key: &str) {
        if let NodeData::Element { attrs, .. } = &mut *node.0.write() {
            attrs.shift_remove(key);
        }
    }

    fn append_child(&self, parent: &MemoryNode, child: &MemoryNode) {
        if let NodeData::Element { children, .. } = &mut *parent.0.write() {
            children.push(child.clone());
        }
    }

    fn replace_child(&self, parent: &MemoryNode, new_child: &MemoryNode, old_child: &MemoryNode) {
        if let NodeData::Element { children, .. } = &mut *parent.0.write() {
            if let Some(slot) = children.iter_mut().find(|c| c.ptr_eq(old_child)) {
                *slot = new_child.clone();
            }
        }
    }

    fn remove_child_at(&self, parent: &MemoryNode, index: usize) {
        if let NodeData::Element { children, .. } = &mut *parent.0.write() {
            if index < children.len() {
                children.remove(index);
            }
        }
    }

    fn child_at(&self, parent: &MemoryNode, index: usize) -> Option<MemoryNode> {
        parent.child(index)
    }

    fn is_valid_root(&self, node: &MemoryNode) -> bool {
        node.is_element()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
