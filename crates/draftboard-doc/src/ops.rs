//! Path reads and copy-on-write path writes.
//!
//! Writes never fail: missing or mismatched intermediate containers are
//! created to match the path segment (an object for a key, an array for an
//! index), and out-of-range indices null-pad the array up to the written
//! slot. The cost of this leniency is paid once at write time; reads stay
//! strict and answer `None` for anything that is not there.

use crate::Node;
use draftboard_path::Seg;
use indexmap::IndexMap;
use std::sync::Arc;

/// Read the node at `path`.
///
/// Returns `None` if any step is missing or addresses the wrong container
/// kind. The empty path reads the root.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use draftboard_doc::{get, Node};
/// use draftboard_path::parse_path;
///
/// let doc = Arc::new(Node::from(serde_json::json!({"items": [{"on": true}]})));
/// let path = parse_path("items[0].on").unwrap();
/// assert_eq!(get(&doc, &path).unwrap().as_bool(), Some(true));
/// assert!(get(&doc, &parse_path("items[3]").unwrap()).is_none());
/// ```
pub fn get<'a>(root: &'a Arc<Node>, path: &[Seg]) -> Option<&'a Arc<Node>> {
    let mut current = root;
    for seg in path {
        current = match (current.as_ref(), seg) {
            (Node::Obj(map), Seg::Key(key)) => map.get(key)?,
            (Node::Arr(items), Seg::Index(index)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, returning the new document root.
///
/// Only the spine from the root to the written location is rebuilt; every
/// sibling branch is carried over as the same `Arc` allocation. Writing at
/// the empty path replaces the whole document. Writing at an index equal to
/// the array length appends.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use draftboard_doc::{get, set, Node};
/// use draftboard_path::parse_path;
///
/// let doc = Arc::new(Node::from(serde_json::json!({})));
/// // Intermediates are created to match the path shape.
/// let path = parse_path("rows[1].name").unwrap();
/// let next = set(&doc, &path, Arc::new(Node::from(serde_json::json!("two"))));
/// assert_eq!(
///     next.to_value(),
///     serde_json::json!({"rows": [null, {"name": "two"}]})
/// );
/// ```
pub fn set(root: &Arc<Node>, path: &[Seg], value: Arc<Node>) -> Arc<Node> {
    let (seg, rest) = match path.split_first() {
        Some(parts) => parts,
        None => return value,
    };
    match seg {
        Seg::Key(key) => {
            let mut map = match root.as_ref() {
                Node::Obj(map) => map.clone(),
                _ => IndexMap::new(),
            };
            let child = match map.get(key) {
                Some(child) => child.clone(),
                None => Arc::new(Node::Null),
            };
            map.insert(key.clone(), set(&child, rest, value));
            Arc::new(Node::Obj(map))
        }
        Seg::Index(index) => {
            let mut items = match root.as_ref() {
                Node::Arr(items) => items.clone(),
                _ => Vec::new(),
            };
            while items.len() <= *index {
                items.push(Arc::new(Node::Null));
            }
            let child = items[*index].clone();
            items[*index] = set(&child, rest, value);
            Arc::new(Node::Arr(items))
        }
    }
}

/// Remove the node at `path`, returning the new document root.
///
/// Removing an object key drops the member; removing an array index shifts
/// the later elements down. A path that does not resolve is a no-op and
/// returns the original root `Arc` unchanged. Unsetting the root leaves a
/// `null` document.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use draftboard_doc::{unset, Node};
/// use draftboard_path::parse_path;
///
/// let doc = Arc::new(Node::from(serde_json::json!({"items": [1, 2, 3]})));
/// let next = unset(&doc, &parse_path("items[1]").unwrap());
/// assert_eq!(next.to_value(), serde_json::json!({"items": [1, 3]}));
///
/// // Missing paths are a no-op, observable by identity.
/// let same = unset(&doc, &parse_path("items[9]").unwrap());
/// assert!(Arc::ptr_eq(&doc, &same));
/// ```
pub fn unset(root: &Arc<Node>, path: &[Seg]) -> Arc<Node> {
    let (seg, rest) = match path.split_first() {
        Some(parts) => parts,
        None => return Arc::new(Node::Null),
    };

    if rest.is_empty() {
        return match (root.as_ref(), seg) {
            (Node::Obj(map), Seg::Key(key)) if map.contains_key(key) => {
                let mut map = map.clone();
                map.shift_remove(key);
                Arc::new(Node::Obj(map))
            }
            (Node::Arr(items), Seg::Index(index)) if *index < items.len() => {
                let mut items = items.clone();
                items.remove(*index);
                Arc::new(Node::Arr(items))
            }
            _ => root.clone(),
        };
    }

    match (root.as_ref(), seg) {
        (Node::Obj(map), Seg::Key(key)) => match map.get(key) {
            Some(child) => {
                let next = unset(child, rest);
                if Arc::ptr_eq(&next, child) {
                    return root.clone();
                }
                let mut map = map.clone();
                map.insert(key.clone(), next);
                Arc::new(Node::Obj(map))
            }
            None => root.clone(),
        },
        (Node::Arr(items), Seg::Index(index)) => match items.get(*index) {
            Some(child) => {
                let next = unset(child, rest);
                if Arc::ptr_eq(&next, child) {
                    return root.clone();
                }
                let mut items = items.clone();
                items[*index] = next;
                Arc::new(Node::Arr(items))
            }
            None => root.clone(),
        },
        _ => root.clone(),
    }
}
