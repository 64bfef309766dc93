//! Write events emitted by controls.
//!
//! Controls never touch the document. Editing a control produces a [`Write`]
//! naming the path and the new value (or its removal), and the host applies
//! it with [`draftboard_doc::set`] / [`draftboard_doc::unset`].

use std::sync::Arc;

use draftboard_doc::Node;
use draftboard_path::{Path, Seg};

use crate::field::VARIANT_KEY;

/// A single requested document edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    /// Place `value` at `path`, creating intermediate structure as needed.
    Set { path: Path, value: Arc<Node> },
    /// Remove the value at `path`.
    Unset { path: Path },
}

impl Write {
    pub fn set(path: Path, value: Node) -> Self {
        Write::Set {
            path,
            value: Arc::new(value),
        }
    }

    pub fn unset(path: Path) -> Self {
        Write::Unset { path }
    }

    /// The path this event edits.
    pub fn path(&self) -> &[Seg] {
        match self {
            Write::Set { path, .. } => path,
            Write::Unset { path } => path,
        }
    }
}

/// Builds the write for picking a union variant.
///
/// Picking a tag rewrites only the `"type"` key and keeps every other key the
/// object already holds, so values entered under one variant survive a switch
/// away and back. Picking `None` clears the object entirely.
///
/// ```
/// use draftboard_doc::Node;
/// use draftboard_path::parse_path;
/// use draftboard_schema::switch_variant;
/// use serde_json::json;
///
/// let current = Node::from(json!({"type": "link", "url": "https://example.com"}));
/// let write = switch_variant(&parse_path("action").unwrap(), Some(&current), Some("button"));
/// let draftboard_schema::Write::Set { value, .. } = write else { panic!() };
/// assert_eq!(
///     Into::<serde_json::Value>::into(value.as_ref()),
///     json!({"type": "button", "url": "https://example.com"}),
/// );
/// ```
pub fn switch_variant(path: &[Seg], current: Option<&Node>, choice: Option<&str>) -> Write {
    match choice {
        None => Write::unset(path.to_vec()),
        Some(tag) => {
            let mut map = current
                .and_then(Node::as_obj)
                .cloned()
                .unwrap_or_default();
            map.insert(
                VARIANT_KEY.to_string(),
                Arc::new(Node::Str(tag.to_string())),
            );
            Write::Set {
                path: path.to_vec(),
                value: Arc::new(Node::Obj(map)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftboard_path::parse_path;
    use serde_json::json;

    fn value_of(write: &Write) -> serde_json::Value {
        match write {
            Write::Set { value, .. } => value.as_ref().into(),
            Write::Unset { .. } => panic!("expected a set"),
        }
    }

    #[test]
    fn test_switch_keeps_sibling_keys() {
        let path = parse_path("card.action").unwrap();
        let current = Node::from(json!({"type": "link", "url": "x", "label": "Go"}));
        let write = switch_variant(&path, Some(&current), Some("button"));
        assert_eq!(write.path(), &path[..]);
        assert_eq!(
            value_of(&write),
            json!({"type": "button", "url": "x", "label": "Go"})
        );
    }

    #[test]
    fn test_switch_from_nothing_builds_bare_tag() {
        let write = switch_variant(&parse_path("action").unwrap(), None, Some("link"));
        assert_eq!(value_of(&write), json!({"type": "link"}));
    }

    #[test]
    fn test_switch_over_scalar_replaces_it() {
        let current = Node::from(json!("oops"));
        let write = switch_variant(&parse_path("action").unwrap(), Some(&current), Some("link"));
        assert_eq!(value_of(&write), json!({"type": "link"}));
    }

    #[test]
    fn test_switch_to_none_clears() {
        let path = parse_path("action").unwrap();
        let current = Node::from(json!({"type": "link"}));
        let write = switch_variant(&path, Some(&current), None);
        assert_eq!(write, Write::unset(path));
    }
}
