//! Persistent JSON document tree.
//!
//! [`Node`] is an immutable JSON tree whose containers hold `Arc`-shared
//! children. Writes go through [`set`] and [`unset`], which rebuild only the
//! spine from the root down to the written location and reuse every branch
//! they did not touch. Sharing is observable with `Arc::ptr_eq`, so a host
//! that diffs by identity sees untouched subtrees as unchanged.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use draftboard_doc::{get, set, Node};
//! use draftboard_path::parse_path;
//!
//! let doc: Arc<Node> = Arc::new(Node::from(serde_json::json!({
//!     "header": {"title": "Home"},
//!     "footer": {"note": "fine print"}
//! })));
//!
//! let title = parse_path("header.title").unwrap();
//! let next = set(&doc, &title, Arc::new(Node::from(serde_json::json!("Welcome"))));
//!
//! // The write rebuilt the header spine...
//! assert_eq!(get(&next, &title).unwrap().as_str(), Some("Welcome"));
//!
//! // ...while the untouched footer is the same allocation as before.
//! let footer = parse_path("footer").unwrap();
//! assert!(Arc::ptr_eq(
//!     get(&doc, &footer).unwrap(),
//!     get(&next, &footer).unwrap(),
//! ));
//! ```

pub mod node;
pub mod ops;
pub mod stable;

pub use node::Node;
pub use ops::{get, set, unset};
pub use stable::stringify;
