//! Reconciler
//!
//! Diffs a new virtual tree against the previously committed one and applies
//! the minimal set of host mutations, in place.
//!
//! # Policy
//!
//! For a `(new, old)` pair at a child position, in priority order:
//!
//! 1. New absent, old present: remove the host child at that position.
//! 2. New present, old absent: materialize the new node and append it.
//! 3. Both text and equal: nothing to do; the host text node survives.
//! 4. Both text and different, or elements of different tags: materialize
//!    the new node and replace the host child. Identity is intentionally
//!    not preserved across a type change.
//! 5. Elements of the same tag: patch attributes in place, then recurse
//!    over child positions.
//!
//! Children are matched purely by ordinal position, never by key. A list
//! that grows by appending stays stable; a list that reorders or removes an
//! early element causes spurious updates to everything after the edit point.
//! That trade-off is part of the contract; callers relying on identity
//! preservation get exactly the positional behavior.
//!
//! # Attribute patching
//!
//! Every key in the new props whose value differs from the old one is set,
//! and every key the new props dropped is removed. Unlike materialization,
//! this path does not skip falsy values: a prop that changes to `false` is
//! written as the attribute text `"false"`. The asymmetry is intentional
//! and covered by tests.

use tracing::trace;

use super::materialize::materialize;
use super::node::{Props, VChild};
use crate::error::{RenderError, Result};
use crate::host::Host;

/// Reconcile the child position `index` of `parent`.
///
/// `new` and `old` are the virtual children now wanted and previously
/// committed at that position. The host child order under `parent` must
/// match the old virtual tree; it does whenever `parent` is only ever
/// mutated through this function and [`materialize`].
pub fn patch<H: Host>(
    host: &H,
    parent: &H::Node,
    new: Option<&VChild>,
    old: Option<&VChild>,
    index: usize,
) -> Result<()> {
    match (new, old) {
        (None, None) => Ok(()),
        (None, Some(_)) => {
            trace!(index, "removing host child");
            host.remove_child_at(parent, index);
            Ok(())
        }
        (Some(new), None) => {
            let node = materialize(host, new)?;
            host.append_child(parent, &node);
            Ok(())
        }
        (Some(new), Some(old)) => patch_existing(host, parent, new, old, index),
    }
}

fn patch_existing<H: Host>(
    host: &H,
    parent: &H::Node,
    new: &VChild,
    old: &VChild,
    index: usize,
) -> Result<()> {
    match (new, old) {
        (VChild::Text(new_text), VChild::Text(old_text)) => {
            if new_text == old_text {
                return Ok(());
            }
            replace_at(host, parent, new, index)
        }
        (VChild::Element(new_el), VChild::Element(old_el)) if new_el.tag == old_el.tag => {
            let target = child_at(host, parent, index)?;
            patch_attributes(host, &target, new_el.props.as_ref(), old_el.props.as_ref());

            let new_len = new_el.children.len();
            let old_len = old_el.children.len();
            for i in 0..new_len {
                patch(
                    host,
                    &target,
                    new_el.children.get(i),
                    old_el.children.get(i),
                    i,
                )?;
            }
            // Surplus old children go tail-first so earlier host indices
            // stay valid while trailing children are removed.
            for i in (new_len..old_len).rev() {
                patch(host, &target, None, old_el.children.get(i), i)?;
            }
            Ok(())
        }
        // Text/element mismatch or a tag change: rebuild the subtree.
        _ => replace_at(host, parent, new, index),
    }
}

fn replace_at<H: Host>(host: &H, parent: &H::Node, new: &VChild, index: usize) -> Result<()> {
    let old_host = child_at(host, parent, index)?;
    let new_host = materialize(host, new)?;
    trace!(index, "replacing host child");
    host.replace_child(parent, &new_host, &old_host);
    Ok(())
}

fn child_at<H: Host>(host: &H, parent: &H::Node, index: usize) -> Result<H::Node> {
    host.child_at(parent, index).ok_or_else(|| {
        RenderError::HostDesync(format!("expected a host child at index {index}"))
    })
}

fn patch_attributes<H: Host>(
    host: &H,
    target: &H::Node,
    new_props: Option<&Props>,
    old_props: Option<&Props>,
) {
    let empty = Props::new();
    let new_props = new_props.unwrap_or(&empty);
    let old_props = old_props.unwrap_or(&empty);

    for (key, value) in new_props {
        if old_props.get(key) == Some(value) {
            continue;
        }
        host.set_attribute(target, key, value);
    }

    for key in old_props.keys() {
        if new_props.contains_key(key) {
            continue;
        }
        host.remove_attribute(target, key);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
