//! JSON validation report written by `importkit validate --output`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use importkit_model::{ValidationConflict, ValidationReport};

/// Schema identifier embedded in every report payload.
pub const REPORT_SCHEMA: &str = "importkit.validation-report";
/// Bumped when the payload shape changes incompatibly.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Machine-readable outcome of one validation run.
#[derive(Debug, Serialize)]
pub struct ReportPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
    /// Importer name from the schema file.
    pub importer: &'a str,
    /// Path of the validated CSV file.
    pub source: String,
    pub rows_checked: usize,
    pub cells_checked: usize,
    pub conflict_count: usize,
    pub affected_rows: usize,
    pub conflicts: &'a [ValidationConflict],
}

impl<'a> ReportPayload<'a> {
    #[must_use]
    pub fn new(importer: &'a str, source: &Path, report: &'a ValidationReport) -> Self {
        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            importer,
            source: source.display().to_string(),
            rows_checked: report.rows_checked,
            cells_checked: report.cells_checked,
            conflict_count: report.conflict_count(),
            affected_rows: report.affected_rows(),
            conflicts: &report.conflicts,
        }
    }
}

/// Serializes the payload and writes it to `path`.
pub fn write_report(path: &Path, payload: &ReportPayload<'_>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(payload).context("serialize report")?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
