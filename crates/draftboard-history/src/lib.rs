//! Snapshot-based undo/redo history.
//!
//! [`History`] keeps a timeline of JSON snapshots as three stacks - past,
//! present, future - and moves a cursor through them. Snapshots are compared
//! by their canonical serialization (sorted keys), so a "change" that
//! re-serializes to the same bytes never becomes an undo step.
//!
//! [`Recorder`] wraps a `History` with the capture protocol a host plugs its
//! state-change notifications into: it filters the echo that follows a
//! restore, so undoing can never record itself as a fresh edit.
//!
//! # Example
//!
//! ```
//! use draftboard_history::Recorder;
//! use serde_json::json;
//!
//! let mut recorder = Recorder::new();
//! recorder.observe(&json!({"title": "v1"}));
//! recorder.observe(&json!({"title": "v2"}));
//!
//! let snapshot = recorder.undo().unwrap();
//! assert_eq!(snapshot, json!({"title": "v1"}));
//! // The host applies the snapshot and its change pipeline fires again;
//! // the echo is swallowed instead of becoming a new entry.
//! recorder.observe(&snapshot);
//! assert!(recorder.can_redo());
//! ```

pub mod history;
pub mod recorder;

pub use history::{History, DEFAULT_CAPACITY};
pub use recorder::Recorder;
