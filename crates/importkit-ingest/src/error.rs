use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a CSV file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file could not be opened or a record could not be parsed.
    #[error("read csv {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// The file held no records at all, not even a header row.
    #[error("{} has no header row", path.display())]
    NoHeader { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, IngestError>;
