//! Structured document paths.
//!
//! A location inside a JSON document is a sequence of [`Seg`] segments -
//! object keys and array indices - rather than a delimited string. Code that
//! reads or writes values works on `&[Seg]` slices; the dot/bracket string
//! form (`buttons[2].icon.color`) appears only where a path crosses a UI or
//! log boundary, via [`parse_path`] and [`format_path`].
//!
//! # Example
//!
//! ```
//! use draftboard_path::{parse_path, format_path, Seg};
//!
//! let path = parse_path("buttons[2].icon.color").unwrap();
//! assert_eq!(
//!     path,
//!     vec![
//!         Seg::key("buttons"),
//!         Seg::index(2),
//!         Seg::key("icon"),
//!         Seg::key("color"),
//!     ]
//! );
//! assert_eq!(format_path(&path), "buttons[2].icon.color");
//! ```

use std::fmt;

pub mod parse;
pub use parse::{format_path, parse_path, ParseError};

/// One step into a JSON document: an object key or an array index.
///
/// Keys and indices are distinct variants, so `"2"` the key and `2` the
/// index never collapse into the same segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seg {
    /// Object member key.
    Key(String),
    /// Array element index.
    Index(usize),
}

impl Seg {
    /// Build a key segment.
    pub fn key(key: impl Into<String>) -> Self {
        Seg::Key(key.into())
    }

    /// Build an index segment.
    pub fn index(index: usize) -> Self {
        Seg::Index(index)
    }

    /// The key, if this segment is one.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(key) => Some(key),
            Seg::Index(_) => None,
        }
    }

    /// The index, if this segment is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Key(_) => None,
            Seg::Index(index) => Some(*index),
        }
    }
}

impl From<&str> for Seg {
    fn from(key: &str) -> Self {
        Seg::Key(key.to_string())
    }
}

impl From<String> for Seg {
    fn from(key: String) -> Self {
        Seg::Key(key)
    }
}

impl From<usize> for Seg {
    fn from(index: usize) -> Self {
        Seg::Index(index)
    }
}

impl fmt::Display for Seg {
    /// Bare segment text, without dot/bracket punctuation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(key) => f.write_str(key),
            Seg::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A path into a JSON document, root-first.
///
/// The empty path addresses the document root.
pub type Path = Vec<Seg>;

/// Check if a path addresses the document root.
///
/// # Example
///
/// ```
/// use draftboard_path::{is_root, Seg};
///
/// assert!(is_root(&[]));
/// assert!(!is_root(&[Seg::key("foo")]));
/// ```
pub fn is_root(path: &[Seg]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict ancestor of `child`.
///
/// # Example
///
/// ```
/// use draftboard_path::{is_child, parse_path};
///
/// let parent = parse_path("buttons[2]").unwrap();
/// let child = parse_path("buttons[2].icon").unwrap();
/// assert!(is_child(&parent, &child));
/// assert!(!is_child(&child, &parent));
/// ```
pub fn is_child(parent: &[Seg], child: &[Seg]) -> bool {
    if parent.len() >= child.len() {
        return false;
    }
    parent.iter().zip(child.iter()).all(|(a, b)| a == b)
}

/// Check if two paths address the same location.
pub fn is_path_equal(p1: &[Seg], p2: &[Seg]) -> bool {
    p1 == p2
}

/// The parent of a path, or `None` for the root.
///
/// # Example
///
/// ```
/// use draftboard_path::{parent, parse_path, Seg};
///
/// let path = parse_path("icon.color").unwrap();
/// assert_eq!(parent(&path), Some(&[Seg::key("icon")][..]));
/// assert_eq!(parent(&[]), None);
/// ```
pub fn parent(path: &[Seg]) -> Option<&[Seg]> {
    match path.len() {
        0 => None,
        n => Some(&path[..n - 1]),
    }
}

/// Return `base` extended by one segment.
///
/// # Example
///
/// ```
/// use draftboard_path::{format_path, join, parse_path};
///
/// let base = parse_path("buttons").unwrap();
/// let item = join(&base, 2usize);
/// assert_eq!(format_path(&join(&item, "label")), "buttons[2].label");
/// ```
pub fn join(base: &[Seg], seg: impl Into<Seg>) -> Path {
    let mut path = base.to_vec();
    path.push(seg.into());
    path
}
