use thiserror::Error;

/// Errors produced while building or loading model types.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "unknown field type '{0}' (expected one of: text, number, date, email, phone, boolean, select, custom_regex)"
    )]
    UnknownFieldType(String),

    #[error("invalid importer definition: {0}")]
    InvalidImporter(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
