//! PII detectors

mod patterns;
mod rule_detector;

pub use patterns::PatternTable;
pub use rule_detector::RuleBasedDetector;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A decoded record: field name to JSON value, in source order
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Categories of PII, keyed by the field name they are recognised under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PIIType {
    /// 10-digit phone number
    Phone,

    /// 12-digit Aadhaar national ID
    Aadhar,

    /// Passport number: one capital letter and 7 digits
    Passport,

    /// UPI payment identifier (`handle@bank`)
    UpiId,

    /// Person name
    Name,

    /// Email address
    Email,

    /// Postal address
    Address,

    /// IP address
    IpAddress,

    /// Device identifier
    DeviceId,
}

impl PIIType {
    /// Categories that are PII on their own when the value matches the pattern
    pub const STANDALONE: [PIIType; 4] = [
        PIIType::Phone,
        PIIType::Aadhar,
        PIIType::Passport,
        PIIType::UpiId,
    ];

    /// Categories that are PII only when enough of them co-occur
    pub const COMBINATORIAL: [PIIType; 5] = [
        PIIType::Name,
        PIIType::Email,
        PIIType::Address,
        PIIType::IpAddress,
        PIIType::DeviceId,
    ];

    /// Resolve a record field name to its category. Matching is exact and case-sensitive.
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "phone" => Some(Self::Phone),
            "aadhar" => Some(Self::Aadhar),
            "passport" => Some(Self::Passport),
            "upi_id" => Some(Self::UpiId),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "address" => Some(Self::Address),
            "ip_address" => Some(Self::IpAddress),
            "device_id" => Some(Self::DeviceId),
            _ => None,
        }
    }

    /// The field name this category is recognised under
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Aadhar => "aadhar",
            Self::Passport => "passport",
            Self::UpiId => "upi_id",
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::IpAddress => "ip_address",
            Self::DeviceId => "device_id",
        }
    }

    pub fn is_standalone(&self) -> bool {
        Self::STANDALONE.contains(self)
    }

    pub fn is_combinatorial(&self) -> bool {
        Self::COMBINATORIAL.contains(self)
    }
}

/// Which rule class marked a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionRule {
    /// Value fully matched the category pattern
    Standalone,

    /// Field co-occurred with enough other qualifying weak signals
    Combinatorial,
}

impl DetectionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::Combinatorial => "combinatorial",
        }
    }
}

/// A single field marked for redaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetection {
    /// Field name in the record
    pub field: String,

    /// Category of the field
    pub pii_type: PIIType,

    /// Rule that marked the field
    pub rule: DetectionRule,
}

/// Detection result for one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetection {
    /// Fields to redact (deduplicated)
    pub pii_fields: BTreeSet<String>,

    /// Whether the record contains PII
    pub is_pii: bool,

    /// Per-field detail, in the order the passes marked them
    pub matches: Vec<FieldDetection>,
}

impl RecordDetection {
    pub(crate) fn mark(&mut self, field: &str, pii_type: PIIType, rule: DetectionRule) {
        self.is_pii = true;
        if self.pii_fields.insert(field.to_string()) {
            self.matches.push(FieldDetection {
                field: field.to_string(),
                pii_type,
                rule,
            });
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.pii_fields.contains(field)
    }
}

/// Trait for classifying a record
pub trait PIIDetector: Send + Sync {
    /// Detect which fields of the record are PII
    fn detect(&self, record: &Record) -> RecordDetection;

    /// Get the categories this detector looks at
    fn supported_types(&self) -> Vec<PIIType>;
}

/// Thresholds for the fixed rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum number of qualifying combinatorial fields that flags a record
    pub combinatorial_threshold: usize,

    /// Minimum whitespace-separated tokens for an address to qualify
    pub min_address_tokens: usize,

    /// Require a name to contain whitespace (more than a bare first name)
    pub require_multi_token_name: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            combinatorial_threshold: 2,
            min_address_tokens: 3,
            require_multi_token_name: true,
        }
    }
}
