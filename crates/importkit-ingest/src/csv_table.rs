use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// An in-memory CSV file: one header row plus the data rows under it.
///
/// Rows are padded or cut to the header width, so indexing a row by a
/// header position never reaches past the record.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// First `n` data rows, for sampling.
    #[must_use]
    pub fn sample_rows(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// Position of a header, matching case-insensitively when there is no
    /// exact hit.
    #[must_use]
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|candidate| candidate == header).or_else(|| {
            self.headers.iter().position(|candidate| candidate.eq_ignore_ascii_case(header))
        })
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').trim().to_string()
}

/// Reads a CSV file into memory.
///
/// The first non-blank record becomes the header row; fully blank records
/// are skipped. A file without any record is an error, a file with only a
/// header row is an empty table.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv { path: path.to_path_buf(), source })?;
    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|source| IngestError::Csv { path: path.to_path_buf(), source })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        records.push(row);
    }
    let Some((first, data)) = records.split_first() else {
        return Err(IngestError::NoHeader { path: path.to_path_buf() });
    };
    let headers: Vec<String> = first.iter().map(|cell| normalize_header(cell)).collect();
    let mut rows = Vec::with_capacity(data.len());
    for record in data {
        let mut row: Vec<String> = record.iter().take(headers.len()).cloned().collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    debug!(path = %path.display(), headers = headers.len(), rows = rows.len(), "loaded csv table");
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn reads_headers_and_trimmed_rows() {
        let file = write_csv("name,email\nAda , a@b.com\nGrace,g@h.io\n");
        let table = read_csv_table(file.path()).expect("table");
        assert_eq!(table.headers, vec!["name", "email"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Ada", "a@b.com"]);
    }

    #[test]
    fn strips_bom_and_collapses_header_whitespace() {
        let file = write_csv("\u{feff} name ,Email  Address\nAda,a@b.com\n");
        let table = read_csv_table(file.path()).expect("table");
        assert_eq!(table.headers, vec!["name", "Email Address"]);
    }

    #[test]
    fn skips_fully_blank_records() {
        let file = write_csv("name,email\n,\n  ,   \nAda,a@b.com\n");
        let table = read_csv_table(file.path()).expect("table");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "Ada");
    }

    #[test]
    fn pads_short_rows_and_drops_extra_cells() {
        let file = write_csv("a,b,c\n1,2\n1,2,3,4\n");
        let table = read_csv_table(file.path()).expect("table");
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_file_is_an_error() {
        let file = write_csv("");
        let error = read_csv_table(file.path()).expect_err("no header");
        assert!(matches!(error, IngestError::NoHeader { .. }));
    }

    #[test]
    fn header_only_file_yields_an_empty_table() {
        let file = write_csv("a,b\n");
        let table = read_csv_table(file.path()).expect("table");
        assert_eq!(table.headers.len(), 2);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn sample_rows_clamps_to_available_data() {
        let file = write_csv("a\n1\n2\n3\n");
        let table = read_csv_table(file.path()).expect("table");
        assert_eq!(table.sample_rows(2).len(), 2);
        assert_eq!(table.sample_rows(99).len(), 3);
    }

    #[test]
    fn column_index_prefers_exact_then_case_insensitive() {
        let table = CsvTable {
            headers: vec!["Email".to_string(), "email".to_string()],
            rows: Vec::new(),
        };
        assert_eq!(table.column_index("email"), Some(1));
        assert_eq!(table.column_index("EMAIL"), Some(0));
        assert_eq!(table.column_index("phone"), None);
    }
}
