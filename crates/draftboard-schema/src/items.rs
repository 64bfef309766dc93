//! Array item operations: default synthesis for new rows and the write
//! events behind add, duplicate, and delete.

use std::sync::Arc;

use draftboard_doc::Node;
use draftboard_path::{join, Seg};
use indexmap::IndexMap;

use crate::field::{Field, FieldMap, ObjKind, VARIANT_KEY};
use crate::write::Write;

/// Starting value for one field of a fresh row.
///
/// Selects start on their first choice and checkboxes unchecked. Union
/// objects start on their first variant so the picker has a concrete shape to
/// show. Everything else starts as an empty string; writes through the field
/// replace it with proper structure on first edit.
pub fn default_value(field: &Field) -> Node {
    match field {
        Field::Boolean(_) => Node::Bool(false),
        Field::Select(select) => match select.options.first() {
            Some(choice) => Node::from(choice.value().clone()),
            None => Node::Str(String::new()),
        },
        Field::Object(obj) => match &obj.kind {
            ObjKind::Union { options } => match options.first() {
                Some(variant) => {
                    let mut map = IndexMap::new();
                    map.insert(
                        VARIANT_KEY.to_string(),
                        Arc::new(Node::Str(variant.type_.clone())),
                    );
                    Node::Obj(map)
                }
                None => Node::Str(String::new()),
            },
            ObjKind::Fixed { .. } => Node::Str(String::new()),
        },
        _ => Node::Str(String::new()),
    }
}

/// A fresh row: one default per item field, in declaration order.
pub fn default_item(item_fields: &FieldMap) -> Node {
    let map = item_fields
        .iter()
        .map(|(key, field)| (key.clone(), Arc::new(default_value(field))))
        .collect();
    Node::Obj(map)
}

/// Write that appends a fresh default row to the array at `path`, which
/// currently holds `len` rows.
pub fn push_row(path: &[Seg], len: usize, item_fields: &FieldMap) -> Write {
    Write::set(join(path, len), default_item(item_fields))
}

/// Write that duplicates row `index` into `index + 1`, or `None` when there
/// is no such row.
///
/// The copy is inserted as the same shared node, not a rebuilt value. Reads
/// of the two rows stay one allocation until an edit, and the first write to
/// either row rebuilds only that row's spine.
pub fn duplicate_row(path: &[Seg], array: &[Arc<Node>], index: usize) -> Option<Write> {
    let row = array.get(index)?;
    let mut items = array.to_vec();
    items.insert(index + 1, Arc::clone(row));
    Some(Write::Set {
        path: path.to_vec(),
        value: Arc::new(Node::Arr(items)),
    })
}

/// Write that deletes row `index`. Rows after it shift down when the host
/// applies the write.
pub fn remove_row(path: &[Seg], index: usize) -> Write {
    Write::unset(join(path, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;
    use draftboard_doc::{get, set, unset};
    use draftboard_path::parse_path;
    use serde_json::json;

    fn button_fields() -> FieldMap {
        build::fields([
            ("name", build::string()),
            ("enabled", build::boolean()),
            ("align", build::select(["left", "right"])),
            (
                "action",
                build::union([
                    build::variant("none", build::fields([])),
                    build::variant("link", build::fields([("url", build::string())])),
                ]),
            ),
            ("icon", build::object(build::fields([("name", build::string())]))),
        ])
    }

    // ── Defaults ──

    #[test]
    fn test_default_item_per_kind() {
        let item = default_item(&button_fields());
        assert_eq!(
            Into::<serde_json::Value>::into(&item),
            json!({
                "name": "",
                "enabled": false,
                "align": "left",
                "action": {"type": "none"},
                "icon": "",
            })
        );
    }

    #[test]
    fn test_default_select_without_options_is_empty_string() {
        assert_eq!(default_value(&build::select(Vec::<&str>::new())), Node::Str(String::new()));
    }

    #[test]
    fn test_default_select_first_choice_may_be_nonstring() {
        let field = build::select([json!(0), json!(1)]);
        assert_eq!(default_value(&field), Node::from(json!(0)));
    }

    // ── Row writes ──

    #[test]
    fn test_push_row_targets_next_index() {
        let path = parse_path("buttons").unwrap();
        let write = push_row(&path, 2, &build::fields([("name", build::string())]));
        let Write::Set { path: target, value } = write else {
            panic!("expected a set");
        };
        assert_eq!(target, parse_path("buttons[2]").unwrap());
        assert_eq!(Into::<serde_json::Value>::into(value.as_ref()), json!({"name": ""}));
    }

    #[test]
    fn test_duplicate_row_inserts_shared_copy() {
        let doc = Arc::new(Node::from(json!({"buttons": [
            {"name": "a"},
            {"name": "b"},
        ]})));
        let path = parse_path("buttons").unwrap();
        let items = get(&doc, &path).and_then(|n| n.as_arr().map(<[_]>::to_vec)).unwrap();

        let write = duplicate_row(&path, &items, 0).unwrap();
        let Write::Set { path: target, value } = write else {
            panic!("expected a set");
        };
        let doc = set(&doc, &target, value);
        assert_eq!(
            Into::<serde_json::Value>::into(doc.as_ref()),
            json!({"buttons": [{"name": "a"}, {"name": "a"}, {"name": "b"}]})
        );
        // Original and copy are one shared node until an edit diverges them.
        let original = get(&doc, &parse_path("buttons[0]").unwrap()).unwrap();
        let copy = get(&doc, &parse_path("buttons[1]").unwrap()).unwrap();
        assert!(Arc::ptr_eq(original, copy));
    }

    #[test]
    fn test_duplicate_row_out_of_range() {
        assert!(duplicate_row(&parse_path("buttons").unwrap(), &[], 0).is_none());
    }

    #[test]
    fn test_remove_row_shifts_rest_down() {
        let doc = Arc::new(Node::from(json!({"buttons": [
            {"name": "a"},
            {"name": "b"},
            {"name": "c"},
        ]})));
        let path = parse_path("buttons").unwrap();
        let write = remove_row(&path, 1);
        let Write::Unset { path: target } = write else {
            panic!("expected an unset");
        };
        let doc = unset(&doc, &target);
        assert_eq!(
            Into::<serde_json::Value>::into(doc.as_ref()),
            json!({"buttons": [{"name": "a"}, {"name": "c"}]})
        );
    }
}
