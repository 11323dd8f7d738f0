use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::FieldDefinition;

/// An importer definition: the target schema plus the behavior toggles
/// that decide what happens to rows that fail validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Importer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
    /// Carry unmapped CSV columns through to the imported rows.
    #[serde(default)]
    pub include_unmatched_columns: bool,
    /// Drop rows with conflicts instead of blocking the import.
    #[serde(default)]
    pub filter_invalid_rows: bool,
    /// Any conflict blocks the whole import.
    #[serde(default)]
    pub disable_on_invalid_rows: bool,
}

impl Importer {
    /// Parse an importer definition from JSON and check it for internal
    /// consistency.
    pub fn from_json(json: &str) -> Result<Self> {
        let importer: Importer = serde_json::from_str(json)?;
        importer.ensure_valid()?;
        Ok(importer)
    }

    /// Field names are the keys mappings and conflicts are addressed by;
    /// they must be present and unique (case-insensitively, since CSV
    /// headers are matched without regard to case).
    pub fn ensure_valid(&self) -> Result<()> {
        let mut seen: Vec<String> = Vec::with_capacity(self.fields.len());
        for (index, field) in self.fields.iter().enumerate() {
            let name = field.name.trim();
            if name.is_empty() {
                return Err(ModelError::InvalidImporter(format!(
                    "field {} has an empty name",
                    index + 1
                )));
            }
            let lower = name.to_lowercase();
            if seen.contains(&lower) {
                return Err(ModelError::InvalidImporter(format!(
                    "duplicate field name '{name}'"
                )));
            }
            seen.push(lower);
        }
        Ok(())
    }

    /// Look up a field by its machine name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}
