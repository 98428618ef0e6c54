//! View state and the derived table view.

use super::column::Cell;
use super::column::Column;
use super::column::ColumnId;
use super::column::render_cell;
use super::column::role_columns;
use super::filter::filter_records;
use super::page::PageSize;
use super::page::Pagination;
use super::selection::CheckState;
use super::selection::Selection;
use super::sort::SortState;
use super::sort::cycle_sort;
use super::sort::sort_records;
use super::truncate::DEFAULT_TRUNCATE_BUDGET;
use crate::model::Record;
use crate::model::RecordId;

/// Message shown when no record passes the filter.
pub const EMPTY_MESSAGE: &str = "No data available";

/// Ephemeral filter/sort/page/selection state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Committed (debounced) global filter text.
    pub filter: String,
    pub sort: Option<SortState>,
    pub page: Pagination,
    pub selection: Selection,
}

impl ViewState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page: Pagination::new(page_size),
            ..Self::default()
        }
    }

    /// Commits new filter text. Returns `true` if it changed.
    ///
    /// A changed filter returns to the first page.
    pub fn set_filter(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.filter {
            return false;
        }
        self.filter = text;
        self.page.index = 0;
        true
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: RecordId,
    pub selected: bool,
    pub cells: Vec<Cell>,
}

/// A rendered header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub column: ColumnId,
    pub label: &'static str,
    pub sortable: bool,
    /// Sort direction shown on this header, if it is the active column.
    pub sort: Option<SortState>,
    /// Select-all checkbox state, only on the checkbox column.
    pub check: Option<CheckState>,
}

/// Everything a front end needs to draw the table for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: Vec<HeaderCell>,
    /// Rows of the current page, in display order.
    pub rows: Vec<TableRow>,
    /// Number of records passing the filter.
    pub filtered_total: usize,
    /// Pagination with the index clamped to an existing page.
    pub page: Pagination,
    pub page_count: usize,
    /// Select-all state over the whole filtered set.
    pub select_all: CheckState,
}

impl TableView {
    /// Empty-state message when nothing passes the filter.
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.filtered_total == 0).then_some(EMPTY_MESSAGE)
    }
}

/// Turns records plus [`ViewState`] into a [`TableView`].
///
/// # Example
///
/// ```
/// use sysprompt_lib::model::Record;
/// use sysprompt_lib::table::{TableEngine, ViewState};
///
/// let engine = TableEngine::new();
/// let records = vec![Record::new(1, "tutor", "help", "help")];
/// let view = engine.render(&records, &ViewState::default());
/// assert_eq!(view.rows.len(), 1);
/// assert_eq!(view.filtered_total, 1);
/// ```
#[derive(Debug, Clone)]
pub struct TableEngine {
    columns: Vec<Column>,
    budget: usize,
}

impl Default for TableEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TableEngine {
    /// Engine over the role columns with the default truncation budget.
    pub fn new() -> Self {
        Self {
            columns: role_columns(),
            budget: DEFAULT_TRUNCATE_BUDGET,
        }
    }

    /// Sets the truncation budget.
    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Records passing the filter, sorted per the view.
    pub fn arrange<'a>(&self, records: &'a [Record], view: &ViewState) -> Vec<&'a Record> {
        let mut rows = filter_records(records, &view.filter, &self.columns);
        if let Some(sort) = view.sort {
            sort_records(&mut rows, sort);
        }
        rows
    }

    /// Ids of every record passing the filter.
    pub fn filtered_ids(&self, records: &[Record], view: &ViewState) -> Vec<RecordId> {
        filter_records(records, &view.filter, &self.columns)
            .into_iter()
            .map(|r| r.id)
            .collect()
    }

    /// Renders the current page.
    pub fn render(&self, records: &[Record], view: &ViewState) -> TableView {
        let arranged = self.arrange(records, view);
        let total = arranged.len();
        let ids: Vec<RecordId> = arranged.iter().map(|r| r.id).collect();
        let select_all = view.selection.check_state(&ids);

        let rows = arranged[view.page.range(total)]
            .iter()
            .map(|record| {
                let selected = view.selection.is_selected(record.id);
                TableRow {
                    id: record.id,
                    selected,
                    cells: self
                        .columns
                        .iter()
                        .map(|column| render_cell(column, record, selected, self.budget))
                        .collect(),
                }
            })
            .collect();

        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                column: column.id,
                label: column.header,
                sortable: column.sortable,
                sort: view.sort.filter(|s| s.column == column.id),
                check: (column.id == ColumnId::Select).then_some(select_all),
            })
            .collect();

        TableView {
            headers,
            rows,
            filtered_total: total,
            page: Pagination {
                index: view.page.clamped_index(total),
                size: view.page.size,
            },
            page_count: view.page.page_count(total),
            select_all,
        }
    }

    /// Header click. Non-sortable columns are ignored.
    pub fn toggle_sort(&self, view: &mut ViewState, column: ColumnId) -> Option<SortState> {
        if self.column(column).is_some_and(|c| c.sortable) {
            view.sort = cycle_sort(view.sort, column);
        }
        view.sort
    }

    /// Select-all over the filtered set (every page, not just the visible one).
    pub fn toggle_all(&self, records: &[Record], view: &mut ViewState) -> CheckState {
        let ids = self.filtered_ids(records, view);
        view.selection.toggle_all(&ids)
    }
}
