//! Shorthand constructors for building a [`FieldMap`] in Rust.
//!
//! ```
//! use draftboard_schema::build;
//!
//! let fields = build::fields([
//!     ("title", build::string().labeled("Title")),
//!     ("pinned", build::boolean()),
//!     ("align", build::select(["left", "center", "right"])),
//!     ("buttons", build::array(build::fields([
//!         ("name", build::string()),
//!     ]))),
//! ]);
//! assert_eq!(fields["align"].kind(), "select");
//! ```

use crate::field::{
    ArrField, BoolField, Choice, Field, FieldMap, ObjField, ObjKind, SelectField, StrField,
    TextField, VariantDef,
};

/// Collects `(key, field)` pairs into a [`FieldMap`], keeping their order.
pub fn fields<'a>(entries: impl IntoIterator<Item = (&'a str, Field)>) -> FieldMap {
    entries
        .into_iter()
        .map(|(key, field)| (key.to_string(), field))
        .collect()
}

/// Single-line text field.
pub fn string() -> Field {
    Field::String(StrField::default())
}

/// Multi-line text field.
pub fn textarea() -> Field {
    Field::Textarea(TextField::default())
}

/// Checkbox field.
pub fn boolean() -> Field {
    Field::Boolean(BoolField::default())
}

/// Dropdown field over the given choices.
pub fn select(options: impl IntoIterator<Item = impl Into<Choice>>) -> Field {
    Field::Select(SelectField {
        options: options.into_iter().map(Into::into).collect(),
        ..SelectField::default()
    })
}

/// Fixed group of sub-fields.
pub fn object(fields: FieldMap) -> Field {
    Field::Object(ObjField {
        base: Default::default(),
        kind: ObjKind::Fixed { fields },
    })
}

/// Tagged union over the given variants.
pub fn union(options: impl IntoIterator<Item = VariantDef>) -> Field {
    Field::Object(ObjField {
        base: Default::default(),
        kind: ObjKind::Union {
            options: options.into_iter().collect(),
        },
    })
}

/// One union variant, selected by writing `type_` into the document.
pub fn variant(type_: &str, fields: FieldMap) -> VariantDef {
    VariantDef {
        type_: type_.to_string(),
        label: None,
        fields,
    }
}

/// Row list whose items are edited through `item_fields`.
pub fn array(item_fields: FieldMap) -> Field {
    Field::Array(ArrField {
        item_fields,
        ..ArrField::default()
    })
}

impl Field {
    /// Returns the field with an explicit display label.
    pub fn labeled(mut self, label: &str) -> Self {
        match &mut self {
            Field::String(field) => field.base.label = Some(label.to_string()),
            Field::Textarea(field) => field.base.label = Some(label.to_string()),
            Field::Boolean(field) => field.base.label = Some(label.to_string()),
            Field::Select(field) => field.base.label = Some(label.to_string()),
            Field::Object(field) => field.base.label = Some(label.to_string()),
            Field::Array(field) => field.base.label = Some(label.to_string()),
            Field::Unknown => {}
        }
        self
    }
}

impl VariantDef {
    /// Returns the variant with an explicit picker label.
    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }
}
