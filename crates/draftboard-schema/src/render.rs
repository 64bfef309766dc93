//! Rendering a [`FieldMap`] against a document into a flat control list.
//!
//! [`render`] walks the field map and the document side by side and produces
//! one [`Control`] per visible input, each carrying the full document path it
//! edits. Rendering never changes the document and never emits writes; the
//! only state it touches is [`RowStates`], to mint ids for rows it has not
//! seen before.
//!
//! Missing document branches are not an error. Controls over absent values
//! render their defaults (empty text, unchecked box, first select choice) and
//! stay display-only until the user edits them. An explicit JSON `null` reads
//! the same as a missing value.

use std::sync::Arc;

use draftboard_doc::Node;
use draftboard_path::{join, Path, Seg};

use crate::field::{display_label, Choice, Field, FieldMap, ObjKind, VARIANT_KEY};
use crate::rows::{RowId, RowStates};

/// One rendered input, bound to the document path it edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub path: Path,
    pub label: String,
    pub widget: Widget,
}

/// What kind of input a [`Control`] is, with its display value.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// Single-line text input.
    Text { value: String },
    /// Multi-line text input.
    Textarea { value: String },
    /// Checkbox.
    Checkbox { value: bool },
    /// Dropdown. `selected` is the document value, or the first choice's
    /// value materialized for display when the document holds nothing or an
    /// explicit `null`.
    Select {
        choices: Vec<Choice>,
        selected: serde_json::Value,
    },
    /// Union variant picker. `selected` is the document's current tag;
    /// `None` renders as the picker's empty sentinel.
    Variant {
        choices: Vec<VariantChoice>,
        selected: Option<String>,
    },
    /// Array editor: one entry per row.
    Rows { rows: Vec<Row> },
}

/// One pickable entry of a [`Widget::Variant`].
#[derive(Debug, Clone, PartialEq)]
pub struct VariantChoice {
    pub tag: String,
    pub label: String,
}

/// One array row as rendered. Collapsed rows keep their title and id but
/// carry no controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub open: bool,
    pub title: String,
    pub controls: Vec<Control>,
}

/// Renders `fields` against `root` into controls.
pub fn render(fields: &FieldMap, root: &Node, rows: &mut RowStates) -> Vec<Control> {
    let mut out = Vec::new();
    render_fields(&mut out, fields, Some(root), &[], rows);
    out
}

fn render_fields(
    out: &mut Vec<Control>,
    fields: &FieldMap,
    value: Option<&Node>,
    prefix: &[Seg],
    rows: &mut RowStates,
) {
    for (key, field) in fields {
        let path = join(prefix, key.as_str());
        let child = value.and_then(|v| v.key(key)).map(|arc| arc.as_ref());
        let label = display_label(key, field);
        match field {
            Field::String(_) => out.push(Control {
                path,
                label,
                widget: Widget::Text {
                    value: text_of(child),
                },
            }),
            Field::Textarea(_) => out.push(Control {
                path,
                label,
                widget: Widget::Textarea {
                    value: text_of(child),
                },
            }),
            Field::Boolean(_) => out.push(Control {
                path,
                label,
                widget: Widget::Checkbox {
                    value: child.and_then(Node::as_bool).unwrap_or(false),
                },
            }),
            Field::Select(select) => {
                // Null reads as absent, like it does for the text widgets.
                let selected = match child {
                    Some(node) if !node.is_null() => node.to_value(),
                    _ => select
                        .options
                        .first()
                        .map(|choice| choice.value().clone())
                        .unwrap_or(serde_json::Value::Null),
                };
                out.push(Control {
                    path,
                    label,
                    widget: Widget::Select {
                        choices: select.options.clone(),
                        selected,
                    },
                });
            }
            Field::Object(obj) => match &obj.kind {
                ObjKind::Fixed { fields } => {
                    render_fields(out, fields, child, &path, rows);
                }
                ObjKind::Union { options } => {
                    let selected = child
                        .and_then(|v| v.key(VARIANT_KEY))
                        .and_then(|tag| tag.as_str())
                        .map(str::to_string);
                    let choices = options
                        .iter()
                        .map(|variant| VariantChoice {
                            tag: variant.type_.clone(),
                            label: variant.display_label(),
                        })
                        .collect();
                    out.push(Control {
                        path: path.clone(),
                        label,
                        widget: Widget::Variant {
                            choices,
                            selected: selected.clone(),
                        },
                    });
                    if let Some(tag) = selected {
                        match options.iter().find(|variant| variant.type_ == tag) {
                            Some(variant) => {
                                render_fields(out, &variant.fields, child, &path, rows);
                            }
                            None => {
                                tracing::debug!(tag, "active variant has no declared fields");
                            }
                        }
                    }
                }
            },
            Field::Array(arr) => {
                let items: &[Arc<Node>] = child.and_then(Node::as_arr).unwrap_or(&[]);
                let synced = rows.sync(&path, items.len());
                let mut rendered = Vec::with_capacity(synced.len());
                for (index, (id, open)) in synced.into_iter().enumerate() {
                    let item = items.get(index).map(|arc| arc.as_ref());
                    let mut controls = Vec::new();
                    if open {
                        render_fields(
                            &mut controls,
                            &arr.item_fields,
                            item,
                            &join(&path, index),
                            rows,
                        );
                    }
                    rendered.push(Row {
                        id,
                        open,
                        title: row_title(item, index),
                        controls,
                    });
                }
                out.push(Control {
                    path,
                    label,
                    widget: Widget::Rows { rows: rendered },
                });
            }
            Field::Unknown => {
                tracing::debug!(key = %key, "field of unknown type skipped");
            }
        }
    }
}

fn text_of(node: Option<&Node>) -> String {
    match node {
        None | Some(Node::Null) => String::new(),
        Some(Node::Str(text)) => text.clone(),
        Some(other) => other.to_value().to_string(),
    }
}

/// Title shown on a collapsed row: the item's first non-empty `name`,
/// `label`, or `title` string, else a positional fallback.
fn row_title(item: Option<&Node>, index: usize) -> String {
    for key in ["name", "label", "title"] {
        if let Some(text) = item
            .and_then(|item| item.key(key))
            .and_then(|value| value.as_str())
        {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    format!("Item {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use draftboard_path::{format_path, parse_path};
    use serde_json::json;

    fn card_fields() -> FieldMap {
        build::fields([
            ("title", build::string()),
            ("notes", build::textarea().labeled("Notes")),
            ("pinned", build::boolean()),
            ("align", build::select(["left", "center", "right"])),
            (
                "style",
                build::object(build::fields([("color", build::string())])),
            ),
            (
                "action",
                build::union([
                    build::variant("none", build::fields([])),
                    build::variant(
                        "link",
                        build::fields([("url", build::string().labeled("URL"))]),
                    )
                    .labeled("Open link"),
                ]),
            ),
            (
                "buttons",
                build::array(build::fields([
                    ("name", build::string()),
                    ("enabled", build::boolean()),
                ])),
            ),
        ])
    }

    fn control<'a>(controls: &'a [Control], path: &str) -> &'a Control {
        let want = parse_path(path).unwrap();
        controls
            .iter()
            .find(|control| control.path == want)
            .unwrap_or_else(|| {
                let have: Vec<String> =
                    controls.iter().map(|c| format_path(&c.path)).collect();
                panic!("no control at {path}; have {have:?}")
            })
    }

    // ── Leaf widgets ──

    #[test]
    fn test_scalar_widgets_carry_document_values() {
        let fields = card_fields();
        let doc = Node::from(json!({
            "title": "Hello",
            "notes": "Body",
            "pinned": true,
            "align": "center",
        }));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);

        assert_eq!(
            control(&controls, "title").widget,
            Widget::Text { value: "Hello".to_string() }
        );
        assert_eq!(control(&controls, "notes").label, "Notes");
        assert_eq!(
            control(&controls, "pinned").widget,
            Widget::Checkbox { value: true }
        );
        let Widget::Select { selected, choices } = &control(&controls, "align").widget else {
            panic!("expected select");
        };
        assert_eq!(selected, &json!("center"));
        assert_eq!(choices.len(), 3);
    }

    #[test]
    fn test_missing_branches_render_defaults_without_writing() {
        let fields = card_fields();
        let doc = Node::from(json!({}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);

        assert_eq!(
            control(&controls, "title").widget,
            Widget::Text { value: String::new() }
        );
        assert_eq!(
            control(&controls, "pinned").widget,
            Widget::Checkbox { value: false }
        );
        // The select shows its first choice even though the document holds
        // nothing at the path.
        let Widget::Select { selected, .. } = &control(&controls, "align").widget else {
            panic!("expected select");
        };
        assert_eq!(selected, &json!("left"));
        // Nested group renders too, off the absent branch.
        assert_eq!(
            control(&controls, "style.color").widget,
            Widget::Text { value: String::new() }
        );
    }

    #[test]
    fn test_null_select_value_reads_as_absent() {
        let fields = card_fields();
        let doc = Node::from(json!({"title": null, "align": null}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);

        // A stored null falls back the same way a missing value does, for
        // the select just like the text widgets.
        let Widget::Select { selected, .. } = &control(&controls, "align").widget else {
            panic!("expected select");
        };
        assert_eq!(selected, &json!("left"));
        assert_eq!(
            control(&controls, "title").widget,
            Widget::Text { value: String::new() }
        );
    }

    #[test]
    fn test_nonstring_text_value_renders_compact_json() {
        let fields = build::fields([("title", build::string())]);
        let doc = Node::from(json!({"title": {"a": 1}}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);
        assert_eq!(
            control(&controls, "title").widget,
            Widget::Text { value: "{\"a\":1}".to_string() }
        );
    }

    // ── Nested paths ──

    #[test]
    fn test_nested_group_controls_use_full_paths() {
        let fields = card_fields();
        let doc = Node::from(json!({"style": {"color": "red"}}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);
        assert_eq!(
            control(&controls, "style.color").widget,
            Widget::Text { value: "red".to_string() }
        );
    }

    // ── Unions ──

    #[test]
    fn test_union_picker_and_active_fields() {
        let fields = card_fields();
        let doc = Node::from(json!({"action": {"type": "link", "url": "https://x"}}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);

        let Widget::Variant { choices, selected } = &control(&controls, "action").widget else {
            panic!("expected variant picker");
        };
        assert_eq!(selected.as_deref(), Some("link"));
        assert_eq!(choices[0].label, "none");
        assert_eq!(choices[1].label, "Open link");
        assert_eq!(
            control(&controls, "action.url").widget,
            Widget::Text { value: "https://x".to_string() }
        );
    }

    #[test]
    fn test_union_without_value_renders_picker_only() {
        let fields = card_fields();
        let doc = Node::from(json!({}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);
        let Widget::Variant { selected, .. } = &control(&controls, "action").widget else {
            panic!("expected variant picker");
        };
        assert_eq!(selected, &None);
        assert!(!controls.iter().any(|c| c.path == parse_path("action.url").unwrap()));
    }

    #[test]
    fn test_union_with_undeclared_tag_skips_fields() {
        let fields = card_fields();
        let doc = Node::from(json!({"action": {"type": "beacon", "url": "x"}}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);
        let Widget::Variant { selected, .. } = &control(&controls, "action").widget else {
            panic!("expected variant picker");
        };
        assert_eq!(selected.as_deref(), Some("beacon"));
        assert!(!controls.iter().any(|c| c.path == parse_path("action.url").unwrap()));
    }

    // ── Unknown fields ──

    #[test]
    fn test_unknown_fields_are_skipped() {
        let fields = crate::from_json(json!({
            "viz": {"type": "sparkline"},
            "title": {"type": "string"},
        }))
        .unwrap();
        let doc = Node::from(json!({"viz": 1, "title": "t"}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);
        assert_eq!(controls.len(), 1);
        assert_eq!(format_path(&controls[0].path), "title");
    }

    // ── Arrays ──

    #[test]
    fn test_rows_render_titles_and_ids() {
        let fields = card_fields();
        let doc = Node::from(json!({"buttons": [
            {"name": "Save", "enabled": true},
            {"name": "", "enabled": false},
        ]}));
        let mut rows = RowStates::new();
        let controls = render(&fields, &doc, &mut rows);

        let Widget::Rows { rows: rendered } = &control(&controls, "buttons").widget else {
            panic!("expected rows");
        };
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0].title, "Save");
        assert_eq!(rendered[1].title, "Item 2");
        assert_ne!(rendered[0].id, rendered[1].id);
        // Collapsed rows carry no controls.
        assert!(rendered.iter().all(|row| !row.open && row.controls.is_empty()));
    }

    #[test]
    fn test_open_row_renders_item_controls_with_indexed_paths() {
        let fields = card_fields();
        let doc = Node::from(json!({"buttons": [{"name": "Save", "enabled": true}]}));
        let mut rows = RowStates::new();
        render(&fields, &doc, &mut rows);
        rows.toggle(&parse_path("buttons").unwrap(), 0);

        let controls = render(&fields, &doc, &mut rows);
        let Widget::Rows { rows: rendered } = &control(&controls, "buttons").widget else {
            panic!("expected rows");
        };
        assert!(rendered[0].open);
        let name = rendered[0]
            .controls
            .iter()
            .find(|c| c.path == parse_path("buttons[0].name").unwrap())
            .unwrap();
        assert_eq!(name.widget, Widget::Text { value: "Save".to_string() });
    }

    #[test]
    fn test_row_ids_stable_across_renders() {
        let fields = card_fields();
        let doc = Node::from(json!({"buttons": [{"name": "a"}, {"name": "b"}]}));
        let mut rows = RowStates::new();

        let first = render(&fields, &doc, &mut rows);
        let second = render(&fields, &doc, &mut rows);
        let ids = |controls: &[Control]| -> Vec<RowId> {
            let Widget::Rows { rows } = &control(controls, "buttons").widget else {
                panic!("expected rows");
            };
            rows.iter().map(|row| row.id).collect()
        };
        assert_eq!(ids(&first), ids(&second));
    }
}
