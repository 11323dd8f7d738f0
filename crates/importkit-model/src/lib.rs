pub mod conflict;
pub mod error;
pub mod field;
pub mod importer;
pub mod mapping;

pub use conflict::{ValidationConflict, ValidationReport};
pub use error::{ModelError, Result};
pub use field::{
    BooleanTemplate, DateFormat, FieldDefinition, FieldRules, FieldType, NumberSign,
};
pub use importer::Importer;
pub use mapping::{ColumnMapping, MappingSuggestion, mapping_from_suggestions};
