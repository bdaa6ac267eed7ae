//! Record-level classification and redaction
//!
//! Ties a detector and a redactor together: classify the record, then mask
//! every flagged field that holds a string.

use crate::detector::{DetectorConfig, PIIDetector, Record, RecordDetection, RuleBasedDetector};
use crate::error::Result;
use crate::redactor::{FieldRedactor, PIIRedactor};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Result of scanning one record
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// Copy of the input with flagged string fields masked
    pub record: Record,

    /// Whether the record contains PII
    pub is_pii: bool,

    /// Which fields were flagged and why
    pub detection: RecordDetection,
}

/// Classifies and redacts records
#[derive(Clone)]
pub struct RecordScanner {
    detector: Arc<dyn PIIDetector>,
    redactor: Arc<dyn PIIRedactor>,
}

impl RecordScanner {
    /// Create a scanner using the rule-based detector and field redactor
    pub fn from_config(config: DetectorConfig) -> Result<Self> {
        let detector = RuleBasedDetector::new(config)?;
        Ok(Self::new(Arc::new(detector), Arc::new(FieldRedactor::new())))
    }

    pub fn new(detector: Arc<dyn PIIDetector>, redactor: Arc<dyn PIIRedactor>) -> Self {
        Self { detector, redactor }
    }

    /// Classify a record and return its redacted copy.
    ///
    /// Flagged fields that are null or hold non-string values are left as-is.
    pub fn scan(&self, record: &Record) -> ScanOutcome {
        let detection = self.detector.detect(record);
        let mut redacted = record.clone();

        if detection.is_pii {
            for field in &detection.pii_fields {
                if let Some(Value::String(text)) = redacted.get_mut(field) {
                    let masked = self.redactor.redact(field, text);
                    *text = masked;
                }
            }
            debug!(fields = ?detection.pii_fields, "record flagged as PII");
        }

        ScanOutcome {
            record: redacted,
            is_pii: detection.is_pii,
            detection,
        }
    }
}

impl std::fmt::Debug for RecordScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordScanner")
            .field("supported_types", &self.detector.supported_types())
            .finish()
    }
}
