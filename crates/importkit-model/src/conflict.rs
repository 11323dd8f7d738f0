use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One invalid cell, in the shape the review grid consumes.
///
/// `row` is the 0-based data row index (the header row is not counted);
/// `col` is the 0-based CSV column index. `value` is the raw cell content
/// as read from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConflict {
    pub row: usize,
    pub col: usize,
    pub field: String,
    #[serde(rename = "csvColumn")]
    pub csv_column: String,
    pub error: String,
    pub value: String,
}

/// Outcome of validating a whole table against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub rows_checked: usize,
    pub cells_checked: usize,
    pub conflicts: Vec<ValidationConflict>,
}

impl ValidationReport {
    pub fn new(
        rows_checked: usize,
        cells_checked: usize,
        conflicts: Vec<ValidationConflict>,
    ) -> Self {
        ValidationReport {
            rows_checked,
            cells_checked,
            conflicts,
        }
    }

    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Number of distinct rows with at least one conflict.
    pub fn affected_rows(&self) -> usize {
        self.conflicts
            .iter()
            .map(|conflict| conflict.row)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}
