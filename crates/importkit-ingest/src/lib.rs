mod csv_table;
mod error;

pub use csv_table::{CsvTable, read_csv_table};
pub use error::{IngestError, Result};
