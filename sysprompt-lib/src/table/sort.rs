//! Single-column stable sort.

use std::cmp::Ordering;

use super::column::ColumnId;
use crate::model::Record;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: ColumnId,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: ColumnId) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: ColumnId) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// Next sort state after a header click on `column`.
///
/// The same column cycles unsorted → ascending → descending → unsorted;
/// a different column starts at ascending.
pub fn cycle_sort(current: Option<SortState>, column: ColumnId) -> Option<SortState> {
    match current {
        Some(state) if state.column == column => match state.direction {
            SortDirection::Ascending => Some(SortState::descending(column)),
            SortDirection::Descending => None,
        },
        _ => Some(SortState::ascending(column)),
    }
}

/// Case-insensitive comparison of two values; equal keys compare equal.
fn compare_values(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sorts in place. Stable in both directions: ties keep their prior order.
pub fn sort_records(records: &mut [&Record], sort: SortState) {
    let column = sort.column;
    if !column.has_value() {
        return;
    }
    records.sort_by(|a, b| {
        let a = column.value(a).unwrap_or_default();
        let b = column.value(b).unwrap_or_default();
        match sort.direction {
            SortDirection::Ascending => compare_values(a, b),
            SortDirection::Descending => compare_values(b, a),
        }
    });
}
