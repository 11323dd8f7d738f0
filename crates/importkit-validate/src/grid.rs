use std::collections::HashMap;

use importkit_model::{ColumnMapping, FieldDefinition, ValidationConflict};
use tracing::{debug, warn};

use crate::validate_cell;

/// Validate every mapped cell of a table.
///
/// `mapping` assigns CSV headers to field names; fields without a mapping
/// and mappings naming headers the file does not have are skipped (missing
/// signal, not an error). Rows shorter than the header row read as blank
/// cells. Conflicts come back in row-major order: by row, then by column.
pub fn validate_grid(
    headers: &[String],
    rows: &[Vec<String>],
    fields: &[FieldDefinition],
    mapping: &ColumnMapping,
) -> Vec<ValidationConflict> {
    let mut targets: Vec<(&FieldDefinition, usize)> = Vec::new();
    for field in fields {
        let Some(header) = mapping.get(&field.name) else {
            continue;
        };
        let Some(col) = find_column(headers, header) else {
            warn!(
                field = %field.name,
                column = %header,
                "mapped column not found in headers, skipping field"
            );
            continue;
        };
        targets.push((field, col));
    }
    targets.sort_by_key(|(_, col)| *col);

    debug!(
        rows = rows.len(),
        mapped_fields = targets.len(),
        "validating grid"
    );

    let mut conflicts = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        for (field, col) in &targets {
            let value = row.get(*col).map(String::as_str).unwrap_or("");
            if let Some(error) = validate_cell(Some(value), field) {
                conflicts.push(ValidationConflict {
                    row: row_index,
                    col: *col,
                    field: field.name.clone(),
                    csv_column: headers[*col].clone(),
                    error,
                    value: value.to_string(),
                });
            }
        }
    }
    conflicts
}

/// Re-check previously recorded conflicts against the current grid.
///
/// Used after the user edits cells in the review screen: conflicts whose
/// cells now validate are dropped, the rest come back with the refreshed
/// message and current value. The column is re-derived from `mapping`
/// when one is given (columns may have been remapped since the conflict
/// was recorded), falling back to the recorded index. Conflicts pointing
/// outside the grid are dropped; conflicts naming a field the schema no
/// longer has are kept as-is, since they cannot be proven resolved.
pub fn revalidate_conflicts(
    headers: &[String],
    rows: &[Vec<String>],
    fields: &[FieldDefinition],
    conflicts: &[ValidationConflict],
    mapping: Option<&ColumnMapping>,
) -> Vec<ValidationConflict> {
    let fields_by_name: HashMap<&str, &FieldDefinition> =
        fields.iter().map(|field| (field.name.as_str(), field)).collect();

    let mut remaining = Vec::new();
    for conflict in conflicts {
        let Some(field) = fields_by_name.get(conflict.field.as_str()) else {
            warn!(field = %conflict.field, "no field definition for conflict, keeping it");
            remaining.push(conflict.clone());
            continue;
        };

        let col = mapping
            .and_then(|mapping| mapping.get(&conflict.field))
            .and_then(|header| find_column(headers, header))
            .or_else(|| (conflict.col < headers.len()).then_some(conflict.col));
        let Some(col) = col else {
            warn!(
                field = %conflict.field,
                col = conflict.col,
                "conflict points outside the grid, dropping it"
            );
            continue;
        };
        if conflict.row >= rows.len() {
            warn!(
                field = %conflict.field,
                row = conflict.row,
                "conflict points outside the grid, dropping it"
            );
            continue;
        }

        let value = rows[conflict.row].get(col).map(String::as_str).unwrap_or("");
        if let Some(error) = validate_cell(Some(value), field) {
            remaining.push(ValidationConflict {
                row: conflict.row,
                col,
                field: conflict.field.clone(),
                csv_column: headers[col].clone(),
                error,
                value: value.to_string(),
            });
        }
    }

    debug!(
        before = conflicts.len(),
        after = remaining.len(),
        "re-validated conflicts"
    );
    remaining
}

/// Column lookup: exact match first, then case-insensitive, mirroring how
/// headers are matched during mapping.
fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .or_else(|| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
        })
}
