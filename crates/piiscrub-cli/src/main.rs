//! piiscrub CLI
//!
//! Scans CSV rows carrying JSON records for PII and writes redacted copies.

mod batch;
mod config;
mod json_format;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use config::ScanConfig;
use piiscrub_pii::RecordScanner;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "piiscrub")]
#[command(about = "piiscrub - PII classification and redaction for tabular records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file (YAML or TOML)
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "PIISCRUB_CONFIG",
        global = true
    )]
    config: Option<PathBuf>,

    /// Log level filter (e.g. info, debug, piiscrub_pii=trace)
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a CSV file of records (default if no command specified)
    Scan {
        /// Input CSV with record_id and data_json columns
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Scan a single JSON object and print the result
    Inspect {
        /// Record as a JSON object, e.g. '{"phone": "9876543210"}'
        record: String,
    },
}

fn load_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ScanConfig::default(),
    };

    config.merge_env();

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(Commands::Scan { input, output }) = &cli.command {
        if let Some(input) = input {
            config.input = input.clone();
        }
        if let Some(output) = output {
            config.output = output.clone();
        }
    }

    Ok(config)
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("Invalid log level: {}", level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn run_scan(config: &ScanConfig, scanner: &RecordScanner) -> Result<()> {
    let summary = batch::process_file(config, scanner)?;

    if !summary.skipped_records.is_empty() {
        warn!("{} record(s) skipped:", summary.skipped);
        for (record_id, reason) in &summary.skipped_records {
            warn!("  - {}: {}", record_id, reason);
        }
    }

    Ok(())
}

fn run_inspect(record: &str, config: &ScanConfig, scanner: &RecordScanner) -> Result<()> {
    let record =
        batch::decode_record(record).map_err(|e| anyhow!("Could not decode record: {}", e))?;
    let outcome = scanner.scan(&record);

    let redacted = json_format::to_string(&outcome.record, config.output_format.ensure_ascii)?;
    println!("redacted: {}", redacted);
    println!(
        "is_pii:   {}",
        config.output_format.boolean_style.render(outcome.is_pii)
    );
    for detection in &outcome.detection.matches {
        println!(
            "  {} ({}) via {}",
            detection.field,
            detection.pii_type.field_name(),
            detection.rule.as_str()
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.logging.level)?;

    let scanner = RecordScanner::from_config(config.detector.clone())
        .context("Failed to build PII scanner")?;
    info!(?scanner, "PII scanner ready");

    match cli.command {
        None | Some(Commands::Scan { .. }) => run_scan(&config, &scanner),
        Some(Commands::Inspect { record }) => run_inspect(&record, &config, &scanner),
    }
}
