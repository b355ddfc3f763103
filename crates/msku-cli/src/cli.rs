//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "msku",
    version,
    about = "Map marketplace SKUs onto canonical master SKUs",
    long_about = "Map heterogeneous marketplace product identifiers (SKUs) onto a\n\
                  canonical master identifier (MSKU).\n\n\
                  Explicit mappings are applied first; everything else is grouped\n\
                  by a rule-based pattern classifier."
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

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include raw identifier values in row-level (trace) logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map every row of a sales CSV to an MSKU.
    Process(ProcessArgs),

    /// Classify identifiers given on the command line.
    Classify(ClassifyArgs),

    /// Show which column would be used as the identifier column.
    Detect(DetectArgs),

    /// Inspect or edit a master mapping seed file.
    Mappings(MappingsArgs),
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Sales data CSV with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Master mapping seed (JSON object of MSKU to SKU variants).
    #[arg(long = "mappings", value_name = "JSON")]
    pub mappings: Option<PathBuf>,

    /// Add the built-in sample mappings to the seed.
    #[arg(long = "sample-mappings")]
    pub sample_mappings: bool,

    /// Write the annotated dataset to this CSV.
    #[arg(long = "output", short = 'o', value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Write the updated master mapping to this JSON file.
    #[arg(long = "save-mappings", value_name = "JSON")]
    pub save_mappings: Option<PathBuf>,

    /// Read identifiers from this column instead of detecting one.
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Fail when no identifier column is detected instead of using the first column.
    #[arg(long = "require-column", conflicts_with = "column")]
    pub require_column: bool,

    #[command(flatten)]
    pub detection: DetectionArgs,

    #[command(flatten)]
    pub rules: RulesArgs,

    /// Number of categories listed in the summary.
    #[arg(long = "top", value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Print the processing summary as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Identifiers to classify.
    #[arg(value_name = "ID", required = true)]
    pub identifiers: Vec<String>,

    #[command(flatten)]
    pub rules: RulesArgs,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Sales data CSV with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

#[derive(Args)]
pub struct MappingsArgs {
    /// Master mapping seed file. Created on save when missing.
    #[arg(value_name = "JSON")]
    pub path: PathBuf,

    /// Add the built-in sample mappings.
    #[arg(long = "sample")]
    pub sample: bool,

    /// MSKU whose variant list is replaced by --variants.
    #[arg(long = "set", value_name = "MSKU", requires = "variants")]
    pub set: Option<String>,

    /// Comma or newline separated SKU variants for --set.
    #[arg(long = "variants", value_name = "LIST", requires = "set")]
    pub variants: Option<String>,

    /// Remove an MSKU and all its variants.
    #[arg(long = "remove", value_name = "MSKU")]
    pub remove: Option<String>,

    /// Drop every mapping before applying other edits.
    #[arg(long = "clear")]
    pub clear: bool,
}

#[derive(Args)]
pub struct DetectionArgs {
    /// Number of values sampled per column when no column name matches.
    #[arg(long = "sample-size", value_name = "N", default_value_t = 10)]
    pub sample_size: usize,

    /// Share of sampled values that must look like identifiers.
    #[arg(
        long = "min-ratio",
        value_name = "RATIO",
        default_value_t = 0.7,
        value_parser = parse_ratio
    )]
    pub min_ratio: f64,
}

/// Parses a ratio in `0.0..=1.0`.
pub fn parse_ratio(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("`{raw}` is not between 0 and 1"))
    }
}

#[derive(Args)]
pub struct RulesArgs {
    /// TOML file overriding brand, keyword, and prefix tables.
    #[arg(long = "rules", value_name = "TOML")]
    pub rules: Option<PathBuf>,
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
