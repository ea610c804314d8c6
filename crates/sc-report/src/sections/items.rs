//! Checklist item tables.

use sc_common::{AnswerSet, Catalog, ChecklistKind, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Text placed in the column of an item's assigned status.
pub const MARKER: &str = "X";

/// Header of the description column.
pub const DESCRIPTION_HEADER: &str = "Descrição do Material";

/// One item row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRow {
    /// Item name.
    pub item: String,
    /// Assigned status, if any.
    pub status: Option<StatusCode>,
    /// One flag per status column; at most one is set.
    pub marks: Vec<bool>,
}

impl ItemRow {
    /// Indices of marked status columns.
    pub fn marked_columns(&self) -> Vec<usize> {
        self.marks
            .iter()
            .enumerate()
            .filter_map(|(i, marked)| marked.then_some(i))
            .collect()
    }

    /// Status cell texts: [`MARKER`] or empty.
    pub fn status_cells(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.marks
            .iter()
            .map(|marked| if *marked { MARKER } else { "" })
    }
}

/// Table for one catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    /// Category name, printed as the table heading.
    pub name: String,
    /// Status column headers, in column order.
    pub status_columns: Vec<String>,
    /// Rows in catalog order.
    pub rows: Vec<ItemRow>,
}

impl CategoryTable {
    /// Full header row: description column followed by status codes.
    pub fn header_row(&self) -> Vec<&str> {
        std::iter::once(DESCRIPTION_HEADER)
            .chain(self.status_columns.iter().map(String::as_str))
            .collect()
    }
}

/// All category tables of one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsSection {
    /// Kind the tables were built for.
    pub kind: ChecklistKind,
    /// Tables in catalog order.
    pub tables: Vec<CategoryTable>,
}

impl ItemsSection {
    /// Build the tables for `kind` from `answers`.
    ///
    /// Every answer must name a catalog item and carry a status valid for
    /// the kind; anything else is rejected rather than silently dropped.
    pub fn build(kind: ChecklistKind, answers: &AnswerSet) -> Result<Self> {
        let catalog = Catalog::for_kind(kind);

        for (item, status) in answers.iter() {
            if !catalog.contains(item) {
                return Err(ReportError::UnknownItem {
                    kind,
                    item: item.to_string(),
                });
            }
            if !status.is_valid_for(kind) {
                return Err(ReportError::InvalidStatus {
                    kind,
                    item: item.to_string(),
                    code: status.code().to_string(),
                });
            }
        }

        let status_columns: Vec<String> = kind
            .statuses()
            .iter()
            .map(|s| s.code().to_string())
            .collect();

        let tables = catalog
            .categories
            .iter()
            .map(|category| CategoryTable {
                name: category.name.to_string(),
                status_columns: status_columns.clone(),
                rows: category
                    .items
                    .iter()
                    .map(|item| {
                        let status = answers.get(item);
                        let mut marks = vec![false; status_columns.len()];
                        if let Some(col) = status.and_then(|s| kind.status_column(s)) {
                            marks[col] = true;
                        }
                        ItemRow {
                            item: item.to_string(),
                            status,
                            marks,
                        }
                    })
                    .collect(),
            })
            .collect();

        Ok(ItemsSection { kind, tables })
    }

    /// Iterate all rows across tables.
    pub fn rows(&self) -> impl Iterator<Item = &ItemRow> {
        self.tables.iter().flat_map(|t| t.rows.iter())
    }

    /// Find the row for an item.
    pub fn row(&self, item: &str) -> Option<&ItemRow> {
        self.rows().find(|r| r.item == item)
    }
}
