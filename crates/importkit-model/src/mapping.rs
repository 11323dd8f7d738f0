use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A proposed assignment of one CSV column to one target field.
///
/// `confidence` is 0–100; `reason` is advisory text for the mapping review
/// screen and carries no semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSuggestion {
    pub csv_column: String,
    pub target_field_name: String,
    pub confidence: f32,
    pub reason: String,
}

/// Accepted column assignments: field name -> CSV header.
pub type ColumnMapping = BTreeMap<String, String>;

/// Turn accepted suggestions into a column mapping. Later suggestions do
/// not overwrite earlier ones, so feeding the engine output (sorted by
/// descending confidence) keeps the strongest assignment per field.
pub fn mapping_from_suggestions(suggestions: &[MappingSuggestion]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for suggestion in suggestions {
        mapping
            .entry(suggestion.target_field_name.clone())
            .or_insert_with(|| suggestion.csv_column.clone());
    }
    mapping
}
