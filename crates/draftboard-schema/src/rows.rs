//! Per-array row bookkeeping.
//!
//! Array rows carry view state (collapsed or expanded) that lives outside the
//! document. Keying that state by row position breaks as soon as a row above
//! is inserted or removed, so every rendered row gets a synthetic [`RowId`]
//! instead: ids follow rows when neighbours come and go, and the open set is
//! a set of ids.
//!
//! Arrays nested inside rows are tracked the same way, under paths that pass
//! through their parent row's index. Insert and remove therefore re-key those
//! nested lists along with the rows they belong to; positional keying would
//! otherwise resurface one level down, with a surviving row adopting the
//! nested state of a deleted neighbour.

use std::collections::{HashMap, HashSet};

use draftboard_path::{Path, Seg};

/// Synthetic identity of one rendered array row. Never stored in the
/// document.
pub type RowId = u64;

#[derive(Debug, Default, Clone)]
struct RowList {
    ids: Vec<RowId>,
    open: HashSet<RowId>,
}

/// Row ids and open flags for every array in a form, keyed by array path.
#[derive(Debug, Default, Clone)]
pub struct RowStates {
    next_id: RowId,
    lists: HashMap<Path, RowList>,
}

impl RowStates {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> RowId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Aligns the id list for `path` with an array of `len` rows and returns
    /// `(id, open)` per row.
    ///
    /// Growth and shrink through [`inserted`](Self::inserted) and
    /// [`removed`](Self::removed) keep the list aligned, so a length mismatch
    /// here means the document changed underneath the view (a history
    /// restore). Positional identity is unknowable then: all ids are
    /// re-minted and every row starts collapsed.
    pub fn sync(&mut self, path: &[Seg], len: usize) -> Vec<(RowId, bool)> {
        if self.lists.get(path).map(|list| list.ids.len()) != Some(len) {
            let ids: Vec<RowId> = (0..len).map(|_| self.mint()).collect();
            self.lists.insert(
                path.to_vec(),
                RowList {
                    ids,
                    open: HashSet::new(),
                },
            );
        }
        let list = &self.lists[path];
        list.ids
            .iter()
            .map(|id| (*id, list.open.contains(id)))
            .collect()
    }

    /// Id of the row at `index`, if that array has been rendered.
    pub fn id_at(&self, path: &[Seg], index: usize) -> Option<RowId> {
        self.lists.get(path)?.ids.get(index).copied()
    }

    /// Whether the row at `index` is expanded.
    pub fn is_open(&self, path: &[Seg], index: usize) -> bool {
        match self.lists.get(path) {
            Some(list) => list
                .ids
                .get(index)
                .is_some_and(|id| list.open.contains(id)),
            None => false,
        }
    }

    /// Expands a collapsed row or collapses an expanded one. Unknown rows are
    /// ignored.
    pub fn toggle(&mut self, path: &[Seg], index: usize) {
        let Some(list) = self.lists.get_mut(path) else {
            return;
        };
        let Some(id) = list.ids.get(index).copied() else {
            return;
        };
        if !list.open.remove(&id) {
            list.open.insert(id);
        }
    }

    /// Records a row inserted at `index`; it gets a fresh id and starts
    /// collapsed. Ids of the rows after it are unchanged, and lists kept for
    /// arrays nested inside those rows follow them to their shifted index.
    pub fn inserted(&mut self, path: &[Seg], index: usize) {
        let id = self.mint();
        let list = self.lists.entry(path.to_vec()).or_default();
        let at = index.min(list.ids.len());
        list.ids.insert(at, id);
        self.reindex(path, |i| if i >= at { Some(i + 1) } else { Some(i) });
    }

    /// Records the removal of the row at `index`, dropping its id, its open
    /// flag, and the lists of every array nested inside it. Lists nested in
    /// the rows after it follow them down one slot.
    pub fn removed(&mut self, path: &[Seg], index: usize) {
        let Some(list) = self.lists.get_mut(path) else {
            return;
        };
        if index >= list.ids.len() {
            return;
        }
        let id = list.ids.remove(index);
        list.open.remove(&id);
        self.reindex(path, |i| {
            if i == index {
                None
            } else if i > index {
                Some(i - 1)
            } else {
                Some(i)
            }
        });
    }

    /// Drops the lists of every array at or under `path`.
    ///
    /// For subtrees that leave the form wholesale, a union variant switched
    /// away or the branch unset: an array rendered there later starts fresh
    /// instead of adopting state minted for a value that is gone.
    pub fn prune_under(&mut self, path: &[Seg]) {
        self.lists.retain(|key, _| !key.starts_with(path));
    }

    /// Drops all row state. Minted ids are never reused.
    pub fn clear(&mut self) {
        self.lists.clear();
    }

    /// Re-keys nested lists through the row index directly under `path`.
    /// `shift` maps an old row index to its new one, or to `None` when the
    /// list belongs to a row that no longer exists.
    fn reindex(&mut self, path: &[Seg], shift: impl Fn(usize) -> Option<usize>) {
        let lists = std::mem::take(&mut self.lists);
        self.lists = lists
            .into_iter()
            .filter_map(|(mut key, list)| {
                if let Some(i) = row_under(&key, path) {
                    match shift(i) {
                        Some(to) => key[path.len()] = Seg::Index(to),
                        None => return None,
                    }
                }
                Some((key, list))
            })
            .collect();
    }
}

/// The row index `key` passes through directly under the array at `path`, if
/// it does.
fn row_under(key: &[Seg], path: &[Seg]) -> Option<usize> {
    if key.len() <= path.len() || !key.starts_with(path) {
        return None;
    }
    match &key[path.len()] {
        Seg::Index(index) => Some(*index),
        Seg::Key(_) => None,
    }
}
