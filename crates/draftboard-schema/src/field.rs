//! Field metadata types.
//!
//! A form is described by a [`FieldMap`]: an ordered map from document keys to
//! [`Field`] descriptors. Descriptors say how a key is edited (text box,
//! checkbox, dropdown, nested group, row list) and never hold document data
//! themselves. The same map can be built in Rust via [`crate::build`] or
//! loaded from JSON via [`from_json`].

use draftboard_doc::Node;
use draftboard_path::Seg;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Object key that selects the active variant of a [`Field::Object`] union.
pub const VARIANT_KEY: &str = "type";

/// Ordered field descriptors, keyed by the document key they edit.
pub type FieldMap = IndexMap<String, Field>;

/// Properties shared by every field kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldBase {
    /// Display label. Falls back to a capitalized key when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrField {
    #[serde(flatten)]
    pub base: FieldBase,
}

/// Multi-line text input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    #[serde(flatten)]
    pub base: FieldBase,
}

/// Checkbox.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolField {
    #[serde(flatten)]
    pub base: FieldBase,
}

/// Dropdown over a fixed list of values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectField {
    #[serde(flatten)]
    pub base: FieldBase,
    #[serde(default)]
    pub options: Vec<Choice>,
}

/// One entry of a [`SelectField`]. A bare JSON value labels itself; a
/// `{"value": …, "label": …}` pair shows the label and stores the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Labeled { value: Value, label: String },
    Bare(Value),
}

impl Choice {
    /// The value written into the document when this entry is picked.
    pub fn value(&self) -> &Value {
        match self {
            Choice::Labeled { value, .. } => value,
            Choice::Bare(value) => value,
        }
    }

    /// The text shown in the dropdown.
    pub fn label(&self) -> String {
        match self {
            Choice::Labeled { label, .. } => label.clone(),
            Choice::Bare(Value::String(text)) => text.clone(),
            Choice::Bare(value) => value.to_string(),
        }
    }
}

impl From<&str> for Choice {
    fn from(text: &str) -> Self {
        Choice::Bare(Value::String(text.to_string()))
    }
}

impl From<String> for Choice {
    fn from(text: String) -> Self {
        Choice::Bare(Value::String(text))
    }
}

impl From<Value> for Choice {
    fn from(value: Value) -> Self {
        Choice::Bare(value)
    }
}

impl From<(Value, &str)> for Choice {
    fn from((value, label): (Value, &str)) -> Self {
        Choice::Labeled {
            value,
            label: label.to_string(),
        }
    }
}

/// Nested object. Either a fixed group of sub-fields or a tagged union whose
/// active shape follows the document's `"type"` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjField {
    #[serde(flatten)]
    pub base: FieldBase,
    #[serde(flatten)]
    pub kind: ObjKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjKind {
    Fixed { fields: FieldMap },
    Union { options: Vec<VariantDef> },
}

/// One alternative of a union object. `type_` is written into the document's
/// `"type"` key when the variant is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDef {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub fields: FieldMap,
}

impl VariantDef {
    /// The text shown in the variant picker.
    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.type_.clone())
    }
}

/// Editable list. Every item is an object edited through `item_fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrField {
    #[serde(flatten)]
    pub base: FieldBase,
    #[serde(default, alias = "itemFields")]
    pub item_fields: FieldMap,
}

/// A field descriptor. The serialized form is tagged by `"type"`:
///
/// ```json
/// {"type": "select", "label": "Align", "options": ["left", "right"]}
/// ```
///
/// Unrecognized tags deserialize to [`Field::Unknown`] so a newer metadata
/// document still loads; rendering skips them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Field {
    String(StrField),
    Textarea(TextField),
    Boolean(BoolField),
    Select(SelectField),
    Object(ObjField),
    Array(ArrField),
    #[serde(other)]
    Unknown,
}

impl Field {
    /// Short name of this field kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Field::String(_) => "string",
            Field::Textarea(_) => "textarea",
            Field::Boolean(_) => "boolean",
            Field::Select(_) => "select",
            Field::Object(_) => "object",
            Field::Array(_) => "array",
            Field::Unknown => "unknown",
        }
    }

    /// Shared base properties, absent for [`Field::Unknown`].
    pub fn base(&self) -> Option<&FieldBase> {
        match self {
            Field::String(field) => Some(&field.base),
            Field::Textarea(field) => Some(&field.base),
            Field::Boolean(field) => Some(&field.base),
            Field::Select(field) => Some(&field.base),
            Field::Object(field) => Some(&field.base),
            Field::Array(field) => Some(&field.base),
            Field::Unknown => None,
        }
    }

    /// Explicit label, if one was set.
    pub fn label(&self) -> Option<&str> {
        self.base().and_then(|base| base.label.as_deref())
    }
}

/// Label shown for `field` when it edits the document key `key`: the explicit
/// label when present, otherwise the key with its first letter capitalized.
pub fn display_label(key: &str, field: &Field) -> String {
    match field.label() {
        Some(label) => label.to_string(),
        None => {
            let mut chars = key.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("INVALID_METADATA: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Loads a [`FieldMap`] from its JSON form.
///
/// ```
/// use serde_json::json;
///
/// let fields = draftboard_schema::from_json(json!({
///     "title": {"type": "string"},
///     "done": {"type": "boolean", "label": "Done?"},
/// }))
/// .unwrap();
/// assert_eq!(fields["done"].label(), Some("Done?"));
/// ```
pub fn from_json(value: Value) -> Result<FieldMap, MetadataError> {
    Ok(serde_json::from_value(value)?)
}

/// Serializes a [`FieldMap`] back to JSON.
pub fn to_json(fields: &FieldMap) -> Result<Value, MetadataError> {
    Ok(serde_json::to_value(fields)?)
}

/// Looks up the descriptor a path points at, descending through nested
/// groups, union variants, and array items. Union steps consult `root` for
/// the active `"type"` tag. Returns `None` when the path leaves the described
/// tree, points at the root, or at an array row (rows are edited through
/// their item fields, not as a single field).
pub fn resolve<'a>(fields: &'a FieldMap, root: &Node, path: &[Seg]) -> Option<&'a Field> {
    let mut current = fields;
    let mut value: Option<&Node> = Some(root);
    let mut segs = path.iter().peekable();

    while let Some(seg) = segs.next() {
        let key = match seg {
            Seg::Key(key) => key,
            Seg::Index(_) => return None,
        };
        let field = current.get(key.as_str())?;
        if segs.peek().is_none() {
            return Some(field);
        }
        let child = value.and_then(|v| v.key(key)).map(|arc| arc.as_ref());
        match field {
            Field::Object(obj) => match &obj.kind {
                ObjKind::Fixed { fields } => {
                    current = fields;
                    value = child;
                }
                ObjKind::Union { options } => {
                    let tag = child
                        .and_then(|v| v.key(VARIANT_KEY))
                        .and_then(|tag| tag.as_str())?;
                    let variant = options.iter().find(|variant| variant.type_ == tag)?;
                    current = &variant.fields;
                    value = child;
                }
            },
            Field::Array(arr) => {
                let index = match segs.next()? {
                    Seg::Index(index) => *index,
                    Seg::Key(_) => return None,
                };
                if segs.peek().is_none() {
                    return None;
                }
                current = &arr.item_fields;
                value = child.and_then(|v| v.at(index)).map(|arc| arc.as_ref());
            }
            _ => return None,
        }
    }
    None
}
