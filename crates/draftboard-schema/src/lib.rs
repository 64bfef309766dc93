//! Schema-driven form model for JSON documents.
//!
//! A [`FieldMap`] declares how a document is edited: which keys exist, what
//! kind of input each one gets, and how nested objects, tagged unions, and
//! arrays of items unfold. [`render`] projects the map and a document into a
//! flat list of [`Control`]s bound to document paths; editing a control
//! produces a [`Write`] event that the host applies to its document. The
//! form model itself never mutates document state.
//!
//! ```
//! use draftboard_doc::{set, Node};
//! use draftboard_schema::{build, render, RowStates, Widget, Write};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let fields = build::fields([
//!     ("title", build::string().labeled("Title")),
//!     ("pinned", build::boolean()),
//! ]);
//! let doc = Arc::new(Node::from(json!({"title": "Hello", "pinned": false})));
//!
//! let mut rows = RowStates::new();
//! let controls = render(&fields, &doc, &mut rows);
//! assert_eq!(controls[0].label, "Title");
//! assert_eq!(controls[0].widget, Widget::Text { value: "Hello".into() });
//!
//! // Editing a control emits a write; the host applies it to its document.
//! let write = Write::set(controls[1].path.clone(), Node::Bool(true));
//! let Write::Set { path, value } = write else { unreachable!() };
//! let doc = set(&doc, &path, value);
//! assert_eq!(doc.key("pinned").unwrap().as_bool(), Some(true));
//! ```

pub mod build;
pub mod field;
pub mod items;
pub mod render;
pub mod rows;
pub mod write;

pub use field::{
    display_label, from_json, resolve, to_json, ArrField, BoolField, Choice, Field, FieldBase,
    FieldMap, MetadataError, ObjField, ObjKind, SelectField, StrField, TextField, VariantDef,
    VARIANT_KEY,
};
pub use items::{default_item, default_value, duplicate_row, push_row, remove_row};
pub use render::{render, Control, Row, VariantChoice, Widget};
pub use rows::{RowId, RowStates};
pub use write::{switch_variant, Write};
