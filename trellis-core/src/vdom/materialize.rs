//! Tree Materializer
//!
//! Turns a virtual node into a fresh host subtree. Construction is bottom-up
//! and recursive: children are materialized first, then appended in order.
//!
//! Only truthy prop values become attributes here. This filter belongs to
//! materialization alone; the reconciler's attribute patch path applies
//! values as-is.

use tracing::trace;

use super::node::{VChild, VNode};
use crate::error::{RenderError, Result};
use crate::host::Host;

/// Build a fresh host node for `child`.
///
/// Pure construction: the returned node is not attached to anything, and no
/// host node outside the new subtree is touched.
pub fn materialize<H: Host>(host: &H, child: &VChild) -> Result<H::Node> {
    match child {
        VChild::Text(text) => Ok(host.create_text(text)),
        VChild::Element(node) => materialize_element(host, node),
    }
}

fn materialize_element<H: Host>(host: &H, node: &VNode) -> Result<H::Node> {
    if node.tag.is_empty() {
        return Err(RenderError::InvalidVNode(
            "element with an empty tag".into(),
        ));
    }

    let element = host.create_element(&node.tag);

    if let Some(props) = &node.props {
        for (key, value) in props {
            if value.is_truthy() {
                host.set_attribute(&element, key, value);
            }
        }
    }

    for child in &node.children {
        let host_child = materialize(host, child)?;
        host.append_child(&element, &host_child);
    }

    trace!(tag = %node.tag, children = node.children.len(), "materialized element");
    Ok(element)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
