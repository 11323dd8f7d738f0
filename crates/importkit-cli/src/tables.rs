//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use importkit_model::{
    DateFormat, FieldDefinition, FieldRules, MappingSuggestion, NumberSign, ValidationConflict,
    ValidationReport,
};

const VALUE_DISPLAY_MAX: usize = 40;

pub fn suggestion_table(suggestions: &[MappingSuggestion]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("CSV Column"),
        header_cell("Target Field"),
        header_cell("Confidence"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for suggestion in suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.csv_column),
            Cell::new(&suggestion.target_field_name),
            confidence_cell(suggestion.confidence),
            Cell::new(&suggestion.reason),
        ]);
    }
    table
}

/// Conflict listing, capped at `limit` rows. Row numbers are shown 1-based;
/// the JSON report keeps the 0-based indexes.
pub fn conflict_table(conflicts: &[ValidationConflict], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("CSV Column"),
        header_cell("Field"),
        header_cell("Value"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for conflict in conflicts.iter().take(limit) {
        table.add_row(vec![
            Cell::new(conflict.row + 1),
            Cell::new(&conflict.csv_column),
            Cell::new(&conflict.field),
            Cell::new(display_value(&conflict.value)),
            Cell::new(&conflict.error).fg(Color::Red),
        ]);
    }
    table
}

pub fn summary_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Rows checked"), Cell::new(report.rows_checked)]);
    table.add_row(vec![Cell::new("Cells checked"), Cell::new(report.cells_checked)]);
    table.add_row(vec![Cell::new("Conflicts"), count_cell(report.conflict_count(), Color::Red)]);
    table.add_row(vec![
        Cell::new("Affected rows"),
        count_cell(report.affected_rows(), Color::Yellow),
    ]);
    table
}

pub fn fields_table(fields: &[FieldDefinition]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Rules"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for field in fields {
        table.add_row(vec![
            Cell::new(&field.name),
            Cell::new(field.label()),
            Cell::new(field.field_type()),
            if field.required {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                Cell::new("no").add_attribute(Attribute::Dim)
            },
            Cell::new(rules_summary(&field.rules)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn confidence_cell(confidence: f32) -> Cell {
    let text = format!("{confidence:.0}");
    if confidence >= 85.0 {
        Cell::new(text).fg(Color::Green)
    } else if confidence >= 60.0 {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).add_attribute(Attribute::Dim)
    }
}

fn display_value(value: &str) -> String {
    if value.is_empty() {
        return "(blank)".to_string();
    }
    if value.chars().count() > VALUE_DISPLAY_MAX {
        let mut head: String = value.chars().take(VALUE_DISPLAY_MAX).collect();
        head.push_str("...");
        head
    } else {
        value.to_string()
    }
}

/// One-line description of a field's rules for the `fields` table.
fn rules_summary(rules: &FieldRules) -> String {
    match rules {
        FieldRules::Text { min_length, max_length } => match (min_length, max_length) {
            (None, None) => String::new(),
            (Some(min), None) => format!("at least {min} characters"),
            (None, Some(max)) => format!("at most {max} characters"),
            (Some(min), Some(max)) => format!("{min} to {max} characters"),
        },
        FieldRules::Number { sign, integer_only, min_value, max_value } => {
            let mut parts = Vec::new();
            if *integer_only {
                parts.push("whole numbers".to_string());
            }
            match sign {
                NumberSign::Positive => parts.push("positive".to_string()),
                NumberSign::Negative => parts.push("negative".to_string()),
                NumberSign::Any => {}
            }
            if let Some(min) = min_value {
                parts.push(format!("min {min}"));
            }
            if let Some(max) = max_value {
                parts.push(format!("max {max}"));
            }
            parts.join(", ")
        }
        FieldRules::Date { format } => match format {
            DateFormat::Any => "any common date format".to_string(),
            specific => format!("{specific} format"),
        },
        FieldRules::Email | FieldRules::Phone => String::new(),
        FieldRules::Boolean { template } => template.expected_display().to_string(),
        FieldRules::Select { options } => format!("one of: {}", options.join(", ")),
        FieldRules::CustomRegex { pattern } => format!("pattern {pattern}"),
    }
}
