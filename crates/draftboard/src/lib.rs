//! Schema-driven JSON editing sessions with undo history.
//!
//! A [`Session`] binds the workspace's pieces together: documents as shared
//! immutable trees (`draftboard-doc`), structured paths (`draftboard-path`),
//! declarative field metadata rendered to controls (`draftboard-schema`),
//! and a snapshot timeline with undo, redo, and jump (`draftboard-history`).
//!
//! ```
//! use draftboard::{build, parse_path, Session};
//! use serde_json::json;
//!
//! let fields = build::fields([
//!     ("title", build::string().labeled("Title")),
//!     ("pinned", build::boolean()),
//! ]);
//! let mut session = Session::new(fields, json!({"title": "Draft", "pinned": false}));
//!
//! let title = parse_path("title").unwrap();
//! session.edit(&title, json!("Final"));
//! assert_eq!(session.export()["title"], json!("Final"));
//!
//! session.undo();
//! assert_eq!(session.export()["title"], json!("Draft"));
//! ```

pub mod session;

pub use session::Session;

pub use draftboard_doc::Node;
pub use draftboard_history::{History, Recorder, DEFAULT_CAPACITY};
pub use draftboard_path::{format_path, parse_path, Path, Seg};
pub use draftboard_schema::{
    build, from_json, Control, Field, FieldMap, RowId, Widget, Write,
};
