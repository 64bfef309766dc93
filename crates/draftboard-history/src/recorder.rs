//! The capture protocol between a host's change notifications and the
//! timeline.
//!
//! The hazard in auto-capture is feedback: restoring a snapshot makes the
//! host's state change, the host's change pipeline fires, and a naive
//! recorder would log the restore as a brand-new edit - wiping the redo
//! stack it just enabled. The recorder arms a one-shot guard when it hands
//! out a snapshot and disarms it on the next observation, double-checked
//! against the canonical form so a genuine edit arriving instead of the
//! echo is still captured.

use crate::History;
use draftboard_doc::stringify;
use serde_json::Value;

/// Auto-capturing wrapper around [`History`].
///
/// Hosts call [`observe`](Recorder::observe) from their state-change
/// pipeline and [`undo`](Recorder::undo) / [`redo`](Recorder::redo) /
/// [`jump_to`](Recorder::jump_to) from their controls; the recorder decides
/// what actually lands on the timeline.
#[derive(Debug, Clone)]
pub struct Recorder {
    history: History,
    /// Canonical form of the last state this recorder saw or handed out.
    last_capture: Option<String>,
    /// Armed between handing out a snapshot and seeing its echo.
    restoring: bool,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    /// A recorder over an empty timeline with the default capacity.
    pub fn new() -> Self {
        Self::over(History::new())
    }

    /// A recorder over an empty timeline retaining `capacity` past entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::over(History::with_capacity(capacity))
    }

    /// A recorder over an existing timeline.
    pub fn over(history: History) -> Self {
        Self {
            history,
            last_capture: None,
            restoring: false,
        }
    }

    /// Feed one state observation through the capture filter.
    ///
    /// Returns `true` when the state became a new history entry. The
    /// observation is dropped when it is the echo of a restore this
    /// recorder handed out, or when it is canonically identical to the
    /// last state seen.
    pub fn observe(&mut self, state: &Value) -> bool {
        let canon = stringify(state);
        if self.restoring {
            self.restoring = false;
            if self.last_capture.as_deref() == Some(canon.as_str()) {
                tracing::debug!("capture suppressed: restore echo");
                return false;
            }
            // Something other than the echo arrived; treat it as an edit.
        }
        if self.last_capture.as_deref() == Some(canon.as_str()) {
            tracing::debug!("capture suppressed: state unchanged");
            return false;
        }
        let captured = self.history.set_canonical(state.clone(), canon.clone());
        self.last_capture = Some(canon);
        captured
    }

    /// Step back and hand out the snapshot the host should now apply.
    ///
    /// Arms the echo guard; the next [`observe`](Recorder::observe) of this
    /// exact state is not captured.
    pub fn undo(&mut self) -> Option<Value> {
        let snapshot = self.history.undo()?.clone();
        self.arm(&snapshot);
        Some(snapshot)
    }

    /// Step forward and hand out the snapshot the host should now apply.
    pub fn redo(&mut self) -> Option<Value> {
        let snapshot = self.history.redo()?.clone();
        self.arm(&snapshot);
        Some(snapshot)
    }

    /// Move to a timeline position (clamped) and hand out its snapshot.
    pub fn jump_to(&mut self, index: usize) -> Option<Value> {
        let snapshot = self.history.jump_to(index)?.clone();
        self.arm(&snapshot);
        Some(snapshot)
    }

    /// Whether a restore is pending its echo.
    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    /// Whether a step back is possible.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a step forward is possible.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The state under the cursor.
    pub fn present(&self) -> Option<&Value> {
        self.history.present()
    }

    /// Drop past and future, keeping the present.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Read access to the underlying timeline.
    pub fn history(&self) -> &History {
        &self.history
    }

    fn arm(&mut self, snapshot: &Value) {
        self.restoring = true;
        self.last_capture = Some(stringify(snapshot));
    }
}
