//! piiscrub PII classification and redaction
//!
//! This crate provides the record-level PII engine:
//! - Standalone detection (phone, aadhar, passport, UPI id) by full pattern match
//! - Combinatorial detection (name, email, address, IP address, device id)
//! - Field-specific masking of flagged values
//!
//! Everything here is pure: no I/O, no global mutable state.

pub mod detector;
pub mod error;
pub mod redactor;
pub mod scanner;

pub use detector::{
    DetectionRule, DetectorConfig, FieldDetection, PIIDetector, PIIType, PatternTable, Record,
    RecordDetection, RuleBasedDetector,
};
pub use error::{PiiError, Result};
pub use redactor::{FieldRedactor, PIIRedactor};
pub use scanner::{RecordScanner, ScanOutcome};
