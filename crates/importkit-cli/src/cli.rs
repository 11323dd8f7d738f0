//! CLI argument definitions for importkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "importkit",
    version,
    about = "CSV importer toolkit - map columns and validate data against an importer schema",
    long_about = "Map CSV columns onto the fields of an importer schema and validate\n\
                  the data cell by cell.\n\n\
                  Schemas are JSON files describing fields, their types and their rules."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log cell values verbatim instead of redacting them.
    ///
    /// Imported files often contain personal data; leave this off unless you
    /// are debugging with data you are allowed to see in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest which CSV column feeds which importer field.
    Map(MapArgs),

    /// Validate a CSV file cell by cell against an importer schema.
    Validate(ValidateArgs),

    /// Show the fields an importer schema defines.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// CSV file to inspect.
    #[arg(value_name = "DATA_CSV")]
    pub data: PathBuf,

    /// Importer schema JSON file.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// Print the raw suggestion list as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// CSV file to validate.
    #[arg(value_name = "DATA_CSV")]
    pub data: PathBuf,

    /// Importer schema JSON file.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,

    /// Column mapping JSON file: an object of field name to CSV header.
    ///
    /// When omitted, the mapping is taken from the engine's accepted
    /// suggestions for this file.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Write a JSON validation report to this path.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum number of conflicts to print (the report always has all).
    #[arg(long = "limit", value_name = "N", default_value_t = 25)]
    pub limit: usize,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Importer schema JSON file.
    #[arg(long = "schema", value_name = "FILE")]
    pub schema: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
