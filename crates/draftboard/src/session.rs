//! An editing session: one document, its form, and its undo timeline.
//!
//! [`Session`] owns the pieces the sub-crates keep separate: the shared-tree
//! document, the field metadata, per-array row view state, and the history
//! recorder. Hosts render controls with [`Session::form`], feed user edits
//! back through [`Session::apply`] or the row and variant helpers, and move
//! through time with [`Session::undo`] / [`Session::redo`] /
//! [`Session::jump_to`].
//!
//! Every document change funnels through one capture point, so the timeline
//! stays consistent no matter which helper produced the write. Restores feed
//! their own change notification back to the recorder, which recognizes and
//! drops it; nothing a restore does is ever captured as a new edit.

use std::sync::Arc;

use draftboard_doc::{get, set, unset, Node};
use draftboard_history::{History, Recorder};
use draftboard_path::{format_path, Path, Seg};
use draftboard_schema::{
    push_row, render, resolve, Control, Field, FieldMap, ObjKind, RowStates, Write,
};
use serde_json::Value;

/// A live editing session over one JSON document.
#[derive(Debug, Clone)]
pub struct Session {
    fields: FieldMap,
    doc: Arc<Node>,
    recorder: Recorder,
    rows: RowStates,
    selection: Option<Path>,
}

impl Session {
    /// Opens a session on `initial`, which becomes the first history state.
    pub fn new(fields: FieldMap, initial: Value) -> Self {
        Self::with_capacity(fields, initial, draftboard_history::DEFAULT_CAPACITY)
    }

    /// Like [`Session::new`] with an explicit bound on undo depth.
    pub fn with_capacity(fields: FieldMap, initial: Value, capacity: usize) -> Self {
        let doc = Arc::new(Node::from(initial));
        let mut recorder = Recorder::with_capacity(capacity);
        recorder.observe(&doc.to_value());
        Session {
            fields,
            doc,
            recorder,
            rows: RowStates::new(),
            selection: None,
        }
    }

    /// The current document.
    pub fn document(&self) -> &Arc<Node> {
        &self.doc
    }

    /// The field metadata this session edits against.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// The undo timeline, for cursor and depth queries.
    pub fn history(&self) -> &History {
        self.recorder.history()
    }

    /// The current document as a plain JSON value.
    pub fn export(&self) -> Value {
        self.doc.to_value()
    }

    /// The current document as JSON text, for saving or sharing a layout.
    pub fn export_json(&self) -> String {
        self.doc.to_value().to_string()
    }

    /// Replaces the document wholesale. The previous document stays one undo
    /// step away; selection and row view state reset. Returns `false` when
    /// the imported state equals the current one.
    pub fn import(&mut self, state: Value) -> bool {
        self.doc = Arc::new(Node::from(state));
        self.selection = None;
        self.rows.clear();
        let captured = self.recorder.observe(&self.doc.to_value());
        tracing::debug!(captured, "document imported");
        captured
    }

    /// [`Session::import`] from JSON text. The document is untouched when the
    /// text does not parse.
    pub fn import_json(&mut self, text: &str) -> Result<bool, serde_json::Error> {
        let state = serde_json::from_str(text)?;
        Ok(self.import(state))
    }

    /// Renders the current form. Mutable only for row-id bookkeeping; the
    /// document and history are untouched.
    pub fn form(&mut self) -> Vec<Control> {
        render(&self.fields, &self.doc, &mut self.rows)
    }

    /// Applies one write event and captures the result. Returns `false` when
    /// the write left the document canonically unchanged, in which case no
    /// history entry is added.
    pub fn apply(&mut self, write: Write) -> bool {
        self.doc = match write {
            Write::Set { path, value } => set(&self.doc, &path, value),
            Write::Unset { path } => unset(&self.doc, &path),
        };
        self.recorder.observe(&self.doc.to_value())
    }

    /// Convenience for [`Session::apply`] with a plain JSON value.
    pub fn edit(&mut self, path: &[Seg], value: Value) -> bool {
        self.apply(Write::set(path.to_vec(), Node::from(value)))
    }

    // ── History ──

    pub fn can_undo(&self) -> bool {
        self.recorder.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.recorder.can_redo()
    }

    /// Steps back one state. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.recorder.undo() {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    /// Steps forward one state. Returns `false` when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        match self.recorder.redo() {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    /// Jumps straight to the history state at `index`, clamping past the
    /// newest. Returns `false` when the history is empty.
    pub fn jump_to(&mut self, index: usize) -> bool {
        match self.recorder.jump_to(index) {
            Some(state) => {
                self.restore(state);
                true
            }
            None => false,
        }
    }

    /// Drops all undo and redo states, keeping the current document.
    pub fn clear_history(&mut self) {
        self.recorder.clear();
    }

    fn restore(&mut self, state: Value) {
        self.doc = Arc::new(Node::from(state));
        self.selection = None;
        // The change notification a host fires after a restore. The recorder
        // is armed for it and drops it instead of recording a new edit.
        let echo = self.doc.to_value();
        self.recorder.observe(&echo);
        tracing::debug!("document restored from history");
    }

    // ── Selection ──

    /// Marks a control as focused, or clears focus. Restores and imports
    /// clear it, since the control under focus may no longer exist.
    pub fn select(&mut self, path: Option<Path>) {
        self.selection = path;
    }

    pub fn selection(&self) -> Option<&[Seg]> {
        self.selection.as_deref()
    }

    // ── Rows ──

    /// Appends a fresh default row to the array field at `path`. Returns
    /// `false` when `path` is not a declared array field.
    pub fn add_row(&mut self, path: &[Seg]) -> bool {
        let Some(Field::Array(arr)) = resolve(&self.fields, &self.doc, path) else {
            tracing::debug!(path = %format_path(path), "add_row: not an array field");
            return false;
        };
        let len = self.array_len(path);
        let write = push_row(path, len, &arr.item_fields);
        self.apply(write);
        self.rows.inserted(path, len);
        true
    }

    /// Duplicates row `index` into `index + 1`. The copy shares the original
    /// row's node until one of them is edited. Returns `false` when `path` is
    /// not a declared array field or the row does not exist.
    pub fn duplicate_row(&mut self, path: &[Seg], index: usize) -> bool {
        if !matches!(
            resolve(&self.fields, &self.doc, path),
            Some(Field::Array(_))
        ) {
            tracing::debug!(path = %format_path(path), "duplicate_row: not an array field");
            return false;
        }
        let Some(write) = get(&self.doc, path)
            .and_then(|node| node.as_arr())
            .and_then(|items| draftboard_schema::duplicate_row(path, items, index))
        else {
            return false;
        };
        self.apply(write);
        self.rows.inserted(path, index + 1);
        true
    }

    /// Deletes row `index`; later rows shift down and keep their view state.
    /// Returns `false` when `path` is not a declared array field or the row
    /// does not exist.
    pub fn remove_row(&mut self, path: &[Seg], index: usize) -> bool {
        if !matches!(
            resolve(&self.fields, &self.doc, path),
            Some(Field::Array(_))
        ) {
            tracing::debug!(path = %format_path(path), "remove_row: not an array field");
            return false;
        }
        if index >= self.array_len(path) {
            return false;
        }
        self.apply(draftboard_schema::remove_row(path, index));
        self.rows.removed(path, index);
        true
    }

    /// Collapses or expands a row. View state only: the document and history
    /// are untouched.
    pub fn toggle_row(&mut self, path: &[Seg], index: usize) {
        self.rows.toggle(path, index);
    }

    fn array_len(&self, path: &[Seg]) -> usize {
        get(&self.doc, path)
            .and_then(|node| node.as_arr())
            .map(|items| items.len())
            .unwrap_or(0)
    }

    // ── Unions ──

    /// Picks the active variant of the union field at `path`, or clears it
    /// with `None`. Values entered under other variants stay in the document,
    /// but row view state under the union resets. Returns `false` when `path`
    /// is not a declared union field.
    pub fn switch_variant(&mut self, path: &[Seg], choice: Option<&str>) -> bool {
        match resolve(&self.fields, &self.doc, path) {
            Some(Field::Object(obj)) if matches!(obj.kind, ObjKind::Union { .. }) => {}
            _ => {
                tracing::debug!(path = %format_path(path), "switch_variant: not a union field");
                return false;
            }
        }
        let current = get(&self.doc, path).cloned();
        let write = draftboard_schema::switch_variant(path, current.as_deref(), choice);
        if self.apply(write) {
            // Arrays under the previous variant stopped rendering; a later
            // value at the same paths must not adopt their row state.
            self.rows.prune_under(path);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draftboard_path::parse_path;
    use draftboard_schema::build;
    use serde_json::json;

    fn session() -> Session {
        let fields = build::fields([
            ("title", build::string()),
            ("pinned", build::boolean()),
        ]);
        Session::new(fields, json!({"title": "one", "pinned": false}))
    }

    #[test]
    fn test_edit_and_export() {
        let mut session = session();
        assert!(session.edit(&parse_path("title").unwrap(), json!("two")));
        assert_eq!(session.export(), json!({"title": "two", "pinned": false}));
    }

    #[test]
    fn test_noop_edit_adds_no_history() {
        let mut session = session();
        assert!(!session.edit(&parse_path("title").unwrap(), json!("one")));
        assert_eq!(session.history().len(), 1);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_restores_and_redo_returns() {
        let mut session = session();
        session.edit(&parse_path("title").unwrap(), json!("two"));

        assert!(session.undo());
        assert_eq!(session.export(), json!({"title": "one", "pinned": false}));
        assert!(!session.can_undo());
        // The restore notification was not captured as an edit.
        assert_eq!(session.history().len(), 2);

        assert!(session.redo());
        assert_eq!(session.export(), json!({"title": "two", "pinned": false}));
        assert!(!session.can_redo());
    }

    #[test]
    fn test_undo_at_floor_is_noop() {
        let mut session = session();
        assert!(!session.undo());
        assert_eq!(session.export(), json!({"title": "one", "pinned": false}));
    }

    #[test]
    fn test_restore_clears_selection() {
        let mut session = session();
        session.edit(&parse_path("title").unwrap(), json!("two"));
        session.select(Some(parse_path("title").unwrap()));
        assert!(session.selection().is_some());
        session.undo();
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_row_ops_reject_non_array_paths() {
        let mut session = session();
        assert!(!session.add_row(&parse_path("title").unwrap()));
        assert!(!session.duplicate_row(&parse_path("title").unwrap(), 0));
        assert!(!session.remove_row(&parse_path("ghost").unwrap(), 0));
        assert!(!session.switch_variant(&parse_path("pinned").unwrap(), Some("x")));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_import_is_undoable() {
        let mut session = session();
        assert!(session.import(json!({"title": "fresh"})));
        assert_eq!(session.export(), json!({"title": "fresh"}));
        assert!(session.undo());
        assert_eq!(session.export(), json!({"title": "one", "pinned": false}));
    }

    #[test]
    fn test_json_text_roundtrip() {
        let mut session = session();
        let text = session.export_json();
        assert_eq!(text, r#"{"title":"one","pinned":false}"#);

        // Importing the export back is the unchanged no-op.
        assert!(!session.import_json(&text).unwrap());
        assert_eq!(session.history().len(), 1);

        assert!(session.import_json(r#"{"title": "two"}"#).unwrap());
        assert_eq!(session.export(), json!({"title": "two"}));
        assert!(session.import_json("not json").is_err());
        assert_eq!(session.export(), json!({"title": "two"}));
    }
}
