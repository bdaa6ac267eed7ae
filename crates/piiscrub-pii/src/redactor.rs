//! PII redaction

mod field_redactor;

pub use field_redactor::FieldRedactor;

/// Fixed-width middle mask for phone numbers
pub const PHONE_MASK: &str = "XXXXXX";

/// Prefix mask for Aadhaar numbers
pub const AADHAR_MASK: &str = "XXXXXXXX";

/// Middle mask for passport numbers
pub const PASSPORT_MASK: &str = "XXXXX";

/// Replacement for values in an email field that are not `local@domain`
pub const MALFORMED_EMAIL: &str = "[REDACTED_EMAIL]";

/// Trait for masking a single field value
pub trait PIIRedactor: Send + Sync {
    /// Mask `value`, which was found under `field` in a flagged record
    fn redact(&self, field: &str, value: &str) -> String;
}

/// Generic mask for fields without a dedicated transform
pub fn fallback_mask(field: &str) -> String {
    format!("[REDACTED_{}]", field.to_uppercase())
}
