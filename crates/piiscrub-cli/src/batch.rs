//! CSV batch scanning
//!
//! Reads `record_id,data_json` rows, scans each decoded record and writes
//! `record_id,redacted_data_json,is_pii` rows in input order. Rows whose
//! payload does not decode to a JSON object are skipped with a warning.

use crate::config::{BooleanStyle, ScanConfig};
use crate::json_format;
use anyhow::{Context, Result};
use piiscrub_pii::{Record, RecordScanner};
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use tracing::{debug, info, warn};

pub const OUTPUT_HEADER: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(default)]
    record_id: String,

    #[serde(default = "default_payload")]
    data_json: String,
}

fn default_payload() -> String {
    "{}".to_string()
}

/// Output formatting for a batch
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub ensure_ascii: bool,
    pub boolean_style: BooleanStyle,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            ensure_ascii: true,
            boolean_style: BooleanStyle::Title,
        }
    }
}

impl From<&ScanConfig> for BatchOptions {
    fn from(config: &ScanConfig) -> Self {
        Self {
            ensure_ascii: config.output_format.ensure_ascii,
            boolean_style: config.output_format.boolean_style,
        }
    }
}

/// Result of a single input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowResult {
    Processed { is_pii: bool },
    Skipped { record_id: String, reason: String },
}

/// Counts for a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub flagged: usize,
    pub skipped: usize,
    /// (record_id, reason) for every skipped row
    pub skipped_records: Vec<(String, String)>,
}

impl BatchSummary {
    fn record(&mut self, result: RowResult) {
        self.total += 1;
        match result {
            RowResult::Processed { is_pii } => {
                self.processed += 1;
                if is_pii {
                    self.flagged += 1;
                }
            }
            RowResult::Skipped { record_id, reason } => {
                self.skipped += 1;
                self.skipped_records.push((record_id, reason));
            }
        }
    }
}

/// Decode a `data_json` payload into a record
pub fn decode_record(payload: &str) -> Result<Record, String> {
    match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, found {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Scan every row from `input` and write results to `output`
pub fn process<R: Read, W: Write>(
    input: R,
    output: W,
    scanner: &RecordScanner,
    options: BatchOptions,
) -> Result<BatchSummary> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(output);

    writer
        .write_record(OUTPUT_HEADER)
        .context("Failed to write output header")?;

    let mut summary = BatchSummary::default();

    for (idx, row) in reader.deserialize::<InputRow>().enumerate() {
        let row = row.with_context(|| format!("Failed to read input row {}", idx + 1))?;

        let result = match decode_record(&row.data_json) {
            Ok(record) => {
                let outcome = scanner.scan(&record);
                let redacted = json_format::to_string(&outcome.record, options.ensure_ascii)
                    .context("Failed to encode redacted record")?;

                writer
                    .write_record([
                        row.record_id.as_str(),
                        redacted.as_str(),
                        options.boolean_style.render(outcome.is_pii),
                    ])
                    .with_context(|| format!("Failed to write record {}", row.record_id))?;

                debug!(record_id = %row.record_id, is_pii = outcome.is_pii, "record scanned");
                RowResult::Processed {
                    is_pii: outcome.is_pii,
                }
            }
            Err(reason) => {
                warn!(
                    "Could not decode JSON for record_id {}. Skipping. ({})",
                    row.record_id, reason
                );
                RowResult::Skipped {
                    record_id: row.record_id,
                    reason,
                }
            }
        };

        summary.record(result);
    }

    writer.flush().context("Failed to flush output")?;

    Ok(summary)
}

/// Scan the configured input file into the configured output file
pub fn process_file(config: &ScanConfig, scanner: &RecordScanner) -> Result<BatchSummary> {
    info!("Processing file: {}...", config.input.display());

    let input = File::open(&config.input)
        .with_context(|| format!("The file '{}' was not found", config.input.display()))?;
    let output = File::create(&config.output)
        .with_context(|| format!("Failed to create output file: {}", config.output.display()))?;

    let summary = process(input, output, scanner, BatchOptions::from(config))?;

    info!(
        total = summary.total,
        processed = summary.processed,
        flagged = summary.flagged,
        skipped = summary.skipped,
        "Processing complete. Output written to {}",
        config.output.display()
    );

    Ok(summary)
}
