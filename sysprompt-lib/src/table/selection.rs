//! Row selection by record id.
//!
//! Selection is keyed by identity, so it survives filtering, sorting and
//! paging: a hidden row stays selected until explicitly deselected.

use std::collections::BTreeSet;

use crate::model::RecordId;

/// Tri-state checkbox value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Indeterminate,
    Checked,
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            Self::Checked
        } else {
            Self::Unchecked
        }
    }
}

/// ID-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<RecordId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.selected.iter().copied().collect()
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle one id. Returns the new state of that id.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Select every id in `ids`. Returns the ids that were newly selected.
    pub fn select_all(&mut self, ids: &[RecordId]) -> Vec<RecordId> {
        ids.iter()
            .copied()
            .filter(|id| self.selected.insert(*id))
            .collect()
    }

    /// Deselect every id in `ids`. Returns the ids that were removed.
    pub fn deselect_all(&mut self, ids: &[RecordId]) -> Vec<RecordId> {
        ids.iter()
            .copied()
            .filter(|id| self.selected.remove(id))
            .collect()
    }

    /// Clear all selection.
    /// Returns the ids that were deselected.
    pub fn clear(&mut self) -> Vec<RecordId> {
        std::mem::take(&mut self.selected).into_iter().collect()
    }

    /// Drops ids for which `exists` is false. Returns the dropped ids.
    pub fn retain_existing(&mut self, exists: impl Fn(RecordId) -> bool) -> Vec<RecordId> {
        let gone: Vec<RecordId> = self.selected.iter().copied().filter(|id| !exists(*id)).collect();
        for id in &gone {
            self.selected.remove(id);
        }
        gone
    }

    /// Aggregate state over `ids`: all, some or none selected.
    ///
    /// An empty id set reads as unchecked.
    pub fn check_state(&self, ids: &[RecordId]) -> CheckState {
        let hits = ids.iter().filter(|id| self.selected.contains(id)).count();
        match hits {
            0 => CheckState::Unchecked,
            n if n == ids.len() => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }

    /// Header checkbox action over `ids`: if all are selected, deselect
    /// them; otherwise select them all. Ids outside `ids` are untouched.
    pub fn toggle_all(&mut self, ids: &[RecordId]) -> CheckState {
        if self.check_state(ids) == CheckState::Checked {
            self.deselect_all(ids);
        } else {
            self.select_all(ids);
        }
        self.check_state(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        assert!(selection.toggle(3));
        assert!(selection.is_selected(3));
        assert!(!selection.toggle(3));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_check_state() {
        let mut selection = Selection::new();
        let ids = [1, 2, 3];
        assert_eq!(selection.check_state(&ids), CheckState::Unchecked);
        selection.toggle(2);
        assert_eq!(selection.check_state(&ids), CheckState::Indeterminate);
        selection.select_all(&ids);
        assert_eq!(selection.check_state(&ids), CheckState::Checked);
        assert_eq!(selection.check_state(&[]), CheckState::Unchecked);
    }

    #[test]
    fn test_toggle_all_leaves_outside_ids() {
        let mut selection = Selection::new();
        selection.toggle(99);
        assert_eq!(selection.toggle_all(&[1, 2]), CheckState::Checked);
        assert_eq!(selection.ids(), vec![1, 2, 99]);
        assert_eq!(selection.toggle_all(&[1, 2]), CheckState::Unchecked);
        assert_eq!(selection.ids(), vec![99]);
    }

    #[test]
    fn test_toggle_all_from_partial_selects_rest() {
        let mut selection = Selection::new();
        selection.toggle(1);
        assert_eq!(selection.toggle_all(&[1, 2, 3]), CheckState::Checked);
    }

    #[test]
    fn test_retain_existing() {
        let mut selection = Selection::new();
        selection.select_all(&[1, 2, 3]);
        assert_eq!(selection.retain_existing(|id| id != 2), vec![2]);
        assert_eq!(selection.ids(), vec![1, 3]);
    }
}
