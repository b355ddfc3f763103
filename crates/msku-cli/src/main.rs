//! `msku` command-line tool.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use msku_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use msku_cli::commands::{
    MappingsOutcome, ProcessOutcome, run_classify, run_detect, run_mappings, run_process,
};
use msku_cli::logging::{LogConfig, LogFormat, init_logging};
use msku_cli::summary::{category_table, classification_table, overview_table, report_table};
use msku_ingest::{ColumnDetection, DetectionMethod};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Process(args) => run_process(args).and_then(|outcome| {
            print_process(&outcome, args.top, args.json)?;
            Ok(())
        }),
        Command::Classify(args) => run_classify(args).map(|rows| {
            let table = classification_table(rows.iter().map(|(id, cat)| (id.as_str(), cat.as_str())));
            println!("{table}");
        }),
        Command::Detect(args) => run_detect(args).map(|found| print_detection(found.as_ref())),
        Command::Mappings(args) => run_mappings(args).map(|outcome| print_mappings(&outcome)),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn print_process(outcome: &ProcessOutcome, top: usize, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
        return Ok(());
    }
    println!("Input: {}", outcome.input.display());
    println!(
        "Identifier column: {}",
        describe_column(&outcome.sku_column, outcome.detection.as_ref())
    );
    if let Some(path) = &outcome.output {
        println!("Output: {}", path.display());
    }
    if let Some(path) = &outcome.saved_mappings {
        println!(
            "Mappings: {} ({} categories)",
            path.display(),
            outcome.report.total_categories
        );
    }
    println!("{}", overview_table(&outcome.summary));
    if !outcome.summary.categories.is_empty() {
        println!();
        println!("Top categories:");
        println!("{}", category_table(&outcome.summary, top));
    }
    Ok(())
}

fn print_detection(found: Option<&ColumnDetection>) {
    match found {
        Some(found) => println!("{}", describe_column(&found.column, Some(found))),
        None => println!("No identifier column detected; the first column would be used."),
    }
}

fn print_mappings(outcome: &MappingsOutcome) {
    println!("Mappings: {}", outcome.path.display());
    if outcome.saved {
        println!("Saved changes.");
    }
    println!("{}", report_table(&outcome.report));
}

fn describe_column(column: &str, detection: Option<&ColumnDetection>) -> String {
    match detection.map(|found| &found.method) {
        Some(DetectionMethod::Keyword { keyword }) => {
            format!("{column} (name matches '{keyword}')")
        }
        Some(DetectionMethod::ValueSample { ratio }) => {
            format!("{column} ({:.0}% of sampled values look like identifiers)", ratio * 100.0)
        }
        None => column.to_string(),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
