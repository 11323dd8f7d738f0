//! Command implementations.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use importkit_cli::logging::redact_value;
use importkit_cli::report::{ReportPayload, write_report};
use importkit_ingest::{CsvTable, read_csv_table};
use importkit_map::{MAPPING_SAMPLE_ROWS, suggest_mappings};
use importkit_model::{ColumnMapping, Importer, ValidationReport, mapping_from_suggestions};
use importkit_validate::validate_grid;

use crate::cli::{FieldsArgs, MapArgs, ValidateArgs};
use crate::tables::{conflict_table, fields_table, suggestion_table, summary_table};

pub fn run_map(args: &MapArgs) -> Result<()> {
    let importer = load_importer(&args.schema)?;
    let table =
        read_csv_table(&args.data).with_context(|| format!("load {}", args.data.display()))?;
    info!(
        importer = %importer.name,
        headers = table.headers.len(),
        rows = table.rows.len(),
        "suggesting mappings"
    );
    let suggestions = suggest_mappings(
        &table.headers,
        table.sample_rows(MAPPING_SAMPLE_ROWS),
        &importer.fields,
    );
    if args.json {
        let json = serde_json::to_string_pretty(&suggestions).context("serialize suggestions")?;
        println!("{json}");
        return Ok(());
    }
    if suggestions.is_empty() {
        println!("No mapping suggestions cleared the confidence threshold.");
    } else {
        println!("{}", suggestion_table(&suggestions));
    }
    let matched: BTreeSet<&str> =
        suggestions.iter().map(|suggestion| suggestion.csv_column.as_str()).collect();
    let unmatched: Vec<&str> = table
        .headers
        .iter()
        .map(String::as_str)
        .filter(|header| !matched.contains(header))
        .collect();
    if !unmatched.is_empty() {
        println!("Unmatched headers: {}", unmatched.join(", "));
    }
    Ok(())
}

/// Validates the CSV against the schema. Returns true when the import
/// would be blocked, which the caller turns into the exit code.
pub fn run_validate(args: &ValidateArgs) -> Result<bool> {
    let importer = load_importer(&args.schema)?;
    let table =
        read_csv_table(&args.data).with_context(|| format!("load {}", args.data.display()))?;
    let mapping = resolve_mapping(args.mapping.as_deref(), &table, &importer)?;
    if mapping.is_empty() {
        warn!("no columns are mapped; nothing will be validated");
    }
    let conflicts = validate_grid(&table.headers, &table.rows, &importer.fields, &mapping);
    let mapped_fields = importer
        .fields
        .iter()
        .filter(|field| {
            mapping
                .get(&field.name)
                .is_some_and(|header| table.column_index(header).is_some())
        })
        .count();
    let report = ValidationReport::new(
        table.rows.len(),
        mapped_fields * table.rows.len(),
        conflicts,
    );
    for conflict in &report.conflicts {
        debug!(
            row = conflict.row,
            field = %conflict.field,
            value = redact_value(&conflict.value),
            error = %conflict.error,
            "conflict"
        );
    }
    if report.is_clean() {
        println!("No conflicts: {} rows validated cleanly.", report.rows_checked);
    } else {
        println!("{}", conflict_table(&report.conflicts, args.limit));
        if report.conflict_count() > args.limit {
            println!("... and {} more conflicts", report.conflict_count() - args.limit);
        }
    }
    println!("{}", summary_table(&report));
    let blocked = importer.disable_on_invalid_rows && !report.is_clean();
    print_verdict(&importer, &report, blocked);
    if let Some(path) = &args.output {
        let payload = ReportPayload::new(&importer.name, &args.data, &report);
        write_report(path, &payload)?;
        info!(path = %path.display(), "wrote validation report");
    }
    Ok(blocked)
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let importer = load_importer(&args.schema)?;
    println!("Importer: {}", importer.name);
    if let Some(description) = &importer.description {
        println!("{description}");
    }
    let mut options = Vec::new();
    if importer.include_unmatched_columns {
        options.push("include unmatched columns");
    }
    if importer.filter_invalid_rows {
        options.push("filter invalid rows");
    }
    if importer.disable_on_invalid_rows {
        options.push("disable on invalid rows");
    }
    if !options.is_empty() {
        println!("Options: {}", options.join(", "));
    }
    println!("{}", fields_table(&importer.fields));
    Ok(())
}

fn print_verdict(importer: &Importer, report: &ValidationReport, blocked: bool) {
    if blocked {
        println!(
            "Verdict: blocked ({} conflicts; this importer disables import on invalid rows)",
            report.conflict_count()
        );
    } else if importer.filter_invalid_rows && !report.is_clean() {
        println!(
            "Verdict: importable; {} of {} rows would be dropped",
            report.affected_rows(),
            report.rows_checked
        );
    } else if report.is_clean() {
        println!("Verdict: importable");
    } else {
        println!(
            "Verdict: importable with {} conflicts to review",
            report.conflict_count()
        );
    }
}

fn resolve_mapping(
    path: Option<&Path>,
    table: &CsvTable,
    importer: &Importer,
) -> Result<ColumnMapping> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("read mapping {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parse mapping {}", path.display()))
        }
        None => {
            let suggestions = suggest_mappings(
                &table.headers,
                table.sample_rows(MAPPING_SAMPLE_ROWS),
                &importer.fields,
            );
            info!(count = suggestions.len(), "no mapping file given; using engine suggestions");
            Ok(mapping_from_suggestions(&suggestions))
        }
    }
}

fn load_importer(path: &Path) -> Result<Importer> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read schema {}", path.display()))?;
    Importer::from_json(&raw).with_context(|| format!("parse schema {}", path.display()))
}
