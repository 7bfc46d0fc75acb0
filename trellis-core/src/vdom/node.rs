//! Virtual Node Model
//!
//! The data shape produced by the [`jsx`] factory. VNodes are plain values:
//! cheap to clone, comparable, and serializable for snapshots and debugging.
//!
//! # Invariants
//!
//! - `children` is always a flat sequence. Child lists handed to the factory
//!   are flattened before storage, so neither the materializer nor the
//!   reconciler ever sees a nested list.
//! - Prop maps preserve insertion order, so attribute application and
//!   serialization are deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered prop map, as attached to an element node.
pub type Props = IndexMap<String, AttrValue>;

/// A prop value.
///
/// Values are dynamically shaped like the attribute values of a markup host.
/// Truthiness follows the usual host convention: `Null`, `false`, zero, and
/// the empty string are falsy, everything else is truthy. Only the initial
/// materialization consults truthiness; the attribute patch path does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// An explicit "no value". Renders as an empty attribute string.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Whether the value would be applied as an attribute during
    /// materialization.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Bool(value) => *value,
            AttrValue::Int(value) => *value != 0,
            AttrValue::Float(value) => *value != 0.0,
            AttrValue::Text(value) => !value.is_empty(),
        }
    }

    /// The attribute text a host should store for this value.
    pub fn render(&self) -> String {
        match self {
            AttrValue::Null => String::new(),
            AttrValue::Bool(value) => value.to_string(),
            AttrValue::Int(value) => value.to_string(),
            AttrValue::Float(value) => value.to_string(),
            AttrValue::Text(value) => value.clone(),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

/// A child of an element: either raw text or a nested element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VChild {
    Text(String),
    Element(VNode),
}

impl From<&str> for VChild {
    fn from(value: &str) -> Self {
        VChild::Text(value.to_string())
    }
}

impl From<String> for VChild {
    fn from(value: String) -> Self {
        VChild::Text(value)
    }
}

impl From<VNode> for VChild {
    fn from(value: VNode) -> Self {
        VChild::Element(value)
    }
}

/// A description of an element to render.
///
/// Unknown tags are allowed; the tag is handed to the host verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VNode {
    pub tag: String,
    pub props: Option<Props>,
    pub children: Vec<VChild>,
}

/// A factory argument: text, an element, or a list of either.
///
/// Lists exist so a component can splice a computed sequence of children
/// into a call; they are flattened away by [`jsx`] and never stored.
#[derive(Debug, Clone)]
pub enum JsxChild {
    Text(String),
    Node(VNode),
    List(Vec<JsxChild>),
}

impl JsxChild {
    fn flatten_into(self, out: &mut Vec<VChild>) {
        match self {
            JsxChild::Text(text) => out.push(VChild::Text(text)),
            JsxChild::Node(node) => out.push(VChild::Element(node)),
            JsxChild::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<&str> for JsxChild {
    fn from(value: &str) -> Self {
        JsxChild::Text(value.to_string())
    }
}

impl From<String> for JsxChild {
    fn from(value: String) -> Self {
        JsxChild::Text(value)
    }
}

impl From<VNode> for JsxChild {
    fn from(value: VNode) -> Self {
        JsxChild::Node(value)
    }
}

impl<T> From<Vec<T>> for JsxChild
where
    T: Into<JsxChild>,
{
    fn from(items: Vec<T>) -> Self {
        JsxChild::List(items.into_iter().map(Into::into).collect())
    }
}

/// Build a [`VNode`].
///
/// Child lists are flattened before storage so the stored `children`
/// sequence is always flat. No validation of `tag` happens here; an unknown
/// tag simply becomes the host element name.
pub fn jsx<I>(tag: &str, props: Option<Props>, children: I) -> VNode
where
    I: IntoIterator<Item = JsxChild>,
{
    let mut flat = Vec::new();
    for child in children {
        child.flatten_into(&mut flat);
    }
    VNode {
        tag: tag.to_string(),
        props,
        children: flat,
    }
}

/// Build a prop map from key/value pairs, preserving order.
pub fn attrs<K, V, I>(pairs: I) -> Props
where
    K: Into<String>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
