//! Column descriptors and cell dispatch.

use super::selection::CheckState;
use super::truncate::truncate;
use crate::model::Record;

/// Identifies one of the fixed table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Select,
    Name,
    Content,
    ContentAlt,
    Actions,
}

impl ColumnId {
    /// The record value this column reads, if it reads one.
    ///
    /// Only columns with a value take part in filtering and sorting.
    pub fn value<'a>(&self, record: &'a Record) -> Option<&'a str> {
        match self {
            Self::Name => Some(&record.name),
            Self::Content => Some(&record.content),
            Self::ContentAlt => Some(&record.content_alt),
            Self::Select | Self::Actions => None,
        }
    }

    /// Returns `true` for columns backed by a record value.
    pub fn has_value(&self) -> bool {
        !matches!(self, Self::Select | Self::Actions)
    }
}

/// How a column's cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// Plain text with the record id as secondary text.
    Text,
    /// Width-budgeted text with the full value kept for disclosure.
    TruncatedText,
    /// Row selection checkbox.
    Checkbox,
    /// Row action buttons.
    Actions,
}

/// Actions offered on each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

/// Actions in display order.
pub const ROW_ACTIONS: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];

/// Column configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub header: &'static str,
    pub kind: RenderKind,
    pub sortable: bool,
}

impl Column {
    /// Create a non-sortable column.
    pub const fn new(id: ColumnId, header: &'static str, kind: RenderKind) -> Self {
        Self {
            id,
            header,
            kind,
            sortable: false,
        }
    }

    /// Make the column sortable.
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// The fixed column set of the role table.
pub fn role_columns() -> Vec<Column> {
    vec![
        Column::new(ColumnId::Select, "", RenderKind::Checkbox),
        Column::new(ColumnId::Name, "roleName", RenderKind::Text).sortable(),
        Column::new(ColumnId::Content, "roleContent", RenderKind::TruncatedText).sortable(),
        Column::new(ColumnId::ContentAlt, "roleContentEng", RenderKind::TruncatedText).sortable(),
        Column::new(ColumnId::Actions, "Action", RenderKind::Actions),
    ]
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Checkbox(CheckState),
    Text {
        text: String,
        detail: Option<String>,
    },
    /// `display` is shown inline; `full` backs the hover disclosure.
    Truncated {
        display: String,
        full: String,
    },
    Actions(&'static [RowAction]),
}

impl Cell {
    /// The inline text of the cell, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Truncated { display, .. } => Some(display),
            _ => None,
        }
    }
}

/// Renders one cell according to the column's [`RenderKind`].
pub fn render_cell(column: &Column, record: &Record, selected: bool, budget: usize) -> Cell {
    let value = column.id.value(record).unwrap_or_default();
    match column.kind {
        RenderKind::Checkbox => Cell::Checkbox(CheckState::from(selected)),
        RenderKind::Text => Cell::Text {
            text: value.to_string(),
            detail: Some(record.id.to_string()),
        },
        RenderKind::TruncatedText => Cell::Truncated {
            display: truncate(value, budget),
            full: value.to_string(),
        },
        RenderKind::Actions => Cell::Actions(&ROW_ACTIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_kind() {
        let record = Record::new(3, "tutor", "x".repeat(60), "short");
        let columns = role_columns();

        let cells: Vec<Cell> = columns
            .iter()
            .map(|c| render_cell(c, &record, true, 20))
            .collect();

        assert_eq!(cells[0], Cell::Checkbox(CheckState::Checked));
        assert_eq!(
            cells[1],
            Cell::Text {
                text: "tutor".into(),
                detail: Some("3".into())
            }
        );
        assert_eq!(
            cells[2],
            Cell::Truncated {
                display: format!("{}...", "x".repeat(20)),
                full: "x".repeat(60)
            }
        );
        assert_eq!(cells[3].text(), Some("short"));
        assert_eq!(cells[4], Cell::Actions(&ROW_ACTIONS));
    }

    #[test]
    fn test_control_columns_not_sortable() {
        for column in role_columns() {
            assert_eq!(column.sortable, column.id.has_value(), "{:?}", column.id);
        }
    }
}
