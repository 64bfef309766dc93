//! The undo/redo timeline: past, present, future.

use draftboard_doc::stringify;
use serde_json::Value;

/// Default bound on the number of past entries retained.
pub const DEFAULT_CAPACITY: usize = 100;

/// One snapshot on the timeline, with its canonical form cached so equality
/// checks never re-serialize.
#[derive(Debug, Clone)]
struct Entry {
    state: Value,
    canon: String,
}

/// Snapshot timeline with a movable cursor.
///
/// The timeline reads oldest-first: `past` (oldest at the front), then the
/// present entry, then `future` (nearest redo at the front). Setting a new
/// state while the cursor sits in the middle of the timeline discards the
/// future - history forks rather than splices.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<Entry>,
    present: Option<Entry>,
    future: Vec<Entry>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// An empty timeline with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty timeline retaining at most `capacity` past entries.
    ///
    /// When the bound is exceeded the oldest entry is dropped, so the
    /// deepest undo chain reaches `capacity` steps back.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            past: Vec::new(),
            present: None,
            future: Vec::new(),
            capacity,
        }
    }

    /// Record `state` as the new present.
    ///
    /// Returns `false` without touching the timeline when `state` is
    /// canonically identical to the current present. Otherwise the old
    /// present is pushed into the past, the future is discarded, and the
    /// oldest past entries beyond the capacity bound are dropped.
    pub fn set(&mut self, state: Value) -> bool {
        let canon = stringify(&state);
        self.set_canonical(state, canon)
    }

    /// `set` with a pre-computed canonical form.
    pub(crate) fn set_canonical(&mut self, state: Value, canon: String) -> bool {
        if let Some(present) = &self.present {
            if present.canon == canon {
                tracing::debug!("set suppressed: state unchanged");
                return false;
            }
        }
        if let Some(previous) = self.present.take() {
            self.past.push(previous);
            while self.past.len() > self.capacity {
                self.past.remove(0);
            }
        }
        self.present = Some(Entry { state, canon });
        self.future.clear();
        tracing::debug!(undo_depth = self.past.len(), "history entry pushed");
        true
    }

    /// Step the cursor back one entry and return the new present.
    ///
    /// Returns `None` when the past is empty; the timeline is untouched.
    pub fn undo(&mut self) -> Option<&Value> {
        if !self.step_back() {
            return None;
        }
        tracing::debug!(undo_remaining = self.past.len(), "undo");
        self.present()
    }

    /// Step the cursor forward one entry and return the new present.
    ///
    /// Returns `None` when the future is empty; the timeline is untouched.
    pub fn redo(&mut self) -> Option<&Value> {
        if !self.step_forward() {
            return None;
        }
        tracing::debug!(redo_remaining = self.future.len(), "redo");
        self.present()
    }

    /// Move the cursor to `index` on the timeline and return the new present.
    ///
    /// An out-of-range index clamps to the nearest end rather than failing.
    /// Returns `None` only when the timeline is empty.
    pub fn jump_to(&mut self, index: usize) -> Option<&Value> {
        let cursor = self.cursor()?;
        let target = index.min(self.len() - 1);
        if target < cursor {
            for _ in 0..cursor - target {
                self.step_back();
            }
        } else {
            for _ in 0..target - cursor {
                self.step_forward();
            }
        }
        tracing::debug!(from = cursor, to = target, "jump");
        self.present()
    }

    /// Drop the past and future, keeping only the present.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        tracing::debug!("history cleared");
    }

    /// Whether a step back is possible.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a step forward is possible.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// The state under the cursor.
    pub fn present(&self) -> Option<&Value> {
        self.present.as_ref().map(|entry| &entry.state)
    }

    /// The cursor's position on the timeline, `None` when empty.
    pub fn cursor(&self) -> Option<usize> {
        self.present.as_ref().map(|_| self.past.len())
    }

    /// Total number of entries on the timeline.
    pub fn len(&self) -> usize {
        self.past.len() + usize::from(self.present.is_some()) + self.future.len()
    }

    /// Whether the timeline holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.present.is_none()
    }

    /// The capacity bound on past entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All states on the timeline, oldest first.
    pub fn states(&self) -> impl Iterator<Item = &Value> + '_ {
        self.past
            .iter()
            .map(|entry| &entry.state)
            .chain(self.present.iter().map(|entry| &entry.state))
            .chain(self.future.iter().map(|entry| &entry.state))
    }

    fn step_back(&mut self) -> bool {
        let previous = match self.past.pop() {
            Some(entry) => entry,
            None => return false,
        };
        if let Some(current) = self.present.take() {
            self.future.insert(0, current);
        }
        self.present = Some(previous);
        true
    }

    fn step_forward(&mut self) -> bool {
        if self.future.is_empty() {
            return false;
        }
        let next = self.future.remove(0);
        if let Some(current) = self.present.take() {
            self.past.push(current);
        }
        self.present = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filled(states: &[i64]) -> History {
        let mut history = History::new();
        for &n in states {
            history.set(json!({"v": n}));
        }
        history
    }

    // ── set ─────────────────────────────────────────────────────────────

    #[test]
    fn test_first_set_installs_present_without_past() {
        let mut history = History::new();
        assert!(history.set(json!({"v": 1})));
        assert_eq!(history.present(), Some(&json!({"v": 1})));
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_set_pushes_previous_present() {
        let history = filled(&[1, 2, 3]);
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.present(), Some(&json!({"v": 3})));
        assert!(history.can_undo());
    }

    #[test]
    fn test_set_identical_state_is_filtered() {
        let mut history = filled(&[1]);
        assert!(!history.set(json!({"v": 1})));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_set_filters_on_canonical_form_not_key_order() {
        let mut history = History::new();
        history.set(json!({"a": 1, "b": 2}));
        // Same members, different insertion order: not a new state.
        assert!(!history.set(json!({"b": 2, "a": 1})));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_set_discards_future() {
        let mut history = filled(&[1, 2, 3]);
        history.undo();
        history.undo();
        assert!(history.can_redo());

        assert!(history.set(json!({"v": 9})));
        assert!(!history.can_redo());
        assert_eq!(
            history.states().cloned().collect::<Vec<_>>(),
            vec![json!({"v": 1}), json!({"v": 9})]
        );
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = History::with_capacity(3);
        for n in 1..=5 {
            history.set(json!({"v": n}));
        }
        assert_eq!(history.len(), 4); // 3 past + present
        // The deepest undo now lands on v2; v1 fell off the front.
        while history.can_undo() {
            history.undo();
        }
        assert_eq!(history.present(), Some(&json!({"v": 2})));
    }

    // ── undo / redo ─────────────────────────────────────────────────────

    #[test]
    fn test_undo_moves_present_to_future() {
        let mut history = filled(&[1, 2]);
        assert_eq!(history.undo(), Some(&json!({"v": 1})));
        assert_eq!(history.cursor(), Some(0));
        assert!(history.can_redo());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_on_empty_past_is_noop() {
        let mut history = filled(&[1]);
        assert_eq!(history.undo(), None);
        assert_eq!(history.present(), Some(&json!({"v": 1})));

        let mut empty = History::new();
        assert_eq!(empty.undo(), None);
    }

    #[test]
    fn test_redo_moves_present_to_past() {
        let mut history = filled(&[1, 2]);
        history.undo();
        assert_eq!(history.redo(), Some(&json!({"v": 2})));
        assert_eq!(history.cursor(), Some(1));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_redo_without_future_is_noop() {
        let mut history = filled(&[1, 2]);
        assert_eq!(history.redo(), None);
        assert_eq!(history.present(), Some(&json!({"v": 2})));
    }

    #[test]
    fn test_undo_redo_are_inverse() {
        let mut history = filled(&[1, 2, 3]);
        let before: Vec<Value> = history.states().cloned().collect();
        history.undo();
        history.redo();
        let after: Vec<Value> = history.states().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(history.present(), Some(&json!({"v": 3})));
    }

    // ── jump_to ─────────────────────────────────────────────────────────

    #[test]
    fn test_jump_backwards_and_forwards() {
        let mut history = filled(&[1, 2, 3, 4]);
        assert_eq!(history.jump_to(0), Some(&json!({"v": 1})));
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.jump_to(2), Some(&json!({"v": 3})));
        assert_eq!(history.cursor(), Some(2));
        // Jumping to the current cursor is a no-op.
        assert_eq!(history.jump_to(2), Some(&json!({"v": 3})));
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_jump_clamps_out_of_range() {
        let mut history = filled(&[1, 2, 3]);
        assert_eq!(history.jump_to(99), Some(&json!({"v": 3})));
        assert_eq!(history.cursor(), Some(2));
    }

    #[test]
    fn test_jump_on_empty_timeline() {
        let mut history = History::new();
        assert_eq!(history.jump_to(0), None);
    }

    #[test]
    fn test_jump_preserves_timeline() {
        let mut history = filled(&[1, 2, 3, 4]);
        history.jump_to(1);
        assert_eq!(
            history.states().cloned().collect::<Vec<_>>(),
            vec![
                json!({"v": 1}),
                json!({"v": 2}),
                json!({"v": 3}),
                json!({"v": 4}),
            ]
        );
    }

    // ── clear ───────────────────────────────────────────────────────────

    #[test]
    fn test_clear_keeps_present() {
        let mut history = filled(&[1, 2, 3]);
        history.undo();
        history.clear();
        assert_eq!(history.present(), Some(&json!({"v": 2})));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_clear_on_empty() {
        let mut history = History::new();
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert_eq!(history.cursor(), None);
    }
}
