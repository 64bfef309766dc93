//! The document node type and its `serde_json::Value` conversions.

use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::sync::Arc;

/// An immutable JSON value with `Arc`-shared container children.
///
/// Equality is deep structural equality; pointer identity of shared branches
/// is checked separately with `Arc::ptr_eq` where it matters.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Num(Number),
    Str(String),
    Arr(Vec<Arc<Node>>),
    Obj(IndexMap<String, Arc<Node>>),
}

impl Node {
    /// Check if this node is JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// The boolean value, if this node is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The string slice, if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this node is one.
    pub fn as_num(&self) -> Option<&Number> {
        match self {
            Node::Num(n) => Some(n),
            _ => None,
        }
    }

    /// The elements, if this node is an array.
    pub fn as_arr(&self) -> Option<&[Arc<Node>]> {
        match self {
            Node::Arr(items) => Some(items),
            _ => None,
        }
    }

    /// The members, if this node is an object.
    pub fn as_obj(&self) -> Option<&IndexMap<String, Arc<Node>>> {
        match self {
            Node::Obj(map) => Some(map),
            _ => None,
        }
    }

    /// Object member lookup; `None` for other node kinds.
    pub fn key(&self, key: &str) -> Option<&Arc<Node>> {
        self.as_obj().and_then(|map| map.get(key))
    }

    /// Array element lookup; `None` for other node kinds.
    pub fn at(&self, index: usize) -> Option<&Arc<Node>> {
        self.as_arr().and_then(|items| items.get(index))
    }

    /// Convert back into a plain `serde_json::Value`.
    pub fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Num(n),
            Value::String(s) => Node::Str(s),
            Value::Array(items) => {
                Node::Arr(items.into_iter().map(|item| Arc::new(Node::from(item))).collect())
            }
            Value::Object(map) => Node::Obj(
                map.into_iter()
                    .map(|(key, value)| (key, Arc::new(Node::from(value))))
                    .collect(),
            ),
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Num(n) => Value::Number(n.clone()),
            Node::Str(s) => Value::String(s.clone()),
            Node::Arr(items) => {
                Value::Array(items.iter().map(|item| Value::from(item.as_ref())).collect())
            }
            Node::Obj(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), Value::from(value.as_ref())))
                    .collect(),
            ),
        }
    }
}
