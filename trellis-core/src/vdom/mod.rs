//! Virtual Tree
//!
//! This module implements the virtual node model and the two operations that
//! connect it to a live host tree: materialization and reconciliation.
//!
//! # Concepts
//!
//! ## VNode
//!
//! A [`VNode`] is a lightweight description of an element to render: a tag,
//! an optional prop map, and an ordered list of children. Children are either
//! nested elements or raw text. VNodes are pure data; they carry no behavior
//! and no reference to the host tree.
//!
//! ## Materialization
//!
//! [`materialize`] turns a virtual node into a fresh host subtree, bottom-up.
//! It is used for first renders and for any subtree the reconciler decides to
//! rebuild.
//!
//! ## Reconciliation
//!
//! [`patch`] diffs a new virtual tree against the previously committed one
//! and applies the minimal set of host mutations, preserving host node
//! identity wherever type and position are unchanged. Children are matched
//! purely by position; there is no keyed diffing.

mod materialize;
mod node;
mod patch;

pub use materialize::materialize;
pub use node::{attrs, jsx, AttrValue, JsxChild, Props, VChild, VNode};
pub use patch::patch;
