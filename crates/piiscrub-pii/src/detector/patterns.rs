//! Full-match pattern table
//!
//! Every pattern is anchored at both ends, so a value only counts when it
//! conforms in its entirety. A phone number followed by extension text, or an
//! ID embedded in a sentence, does not match.

use crate::detector::PIIType;
use regex::Regex;
use std::collections::HashMap;

/// (category, unanchored pattern)
const PATTERN_DEFS: [(PIIType, &str); 7] = [
    (PIIType::Phone, r"\b\d{10}\b"),
    (PIIType::Aadhar, r"\b\d{12}\b"),
    (PIIType::Passport, r"\b[A-Z]{1}[0-9]{7}\b"),
    (PIIType::UpiId, r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\b"),
    (
        PIIType::Email,
        r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b",
    ),
    (PIIType::IpAddress, r"\b(?:\d{1,3}\.){3}\d{1,3}\b"),
    (PIIType::Name, r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)+\b"),
];

/// Immutable category to pattern mapping, compiled once
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: HashMap<PIIType, Regex>,
}

impl PatternTable {
    /// Compile the fixed pattern set
    pub fn new() -> Result<Self, regex::Error> {
        let mut patterns = HashMap::with_capacity(PATTERN_DEFS.len());
        for (pii_type, pattern) in PATTERN_DEFS {
            patterns.insert(pii_type, Regex::new(&format!("^(?:{})$", pattern))?);
        }

        Ok(Self { patterns })
    }

    /// Whether `value` fully matches the pattern for `pii_type`.
    ///
    /// Categories without a pattern (address, device id) never match.
    pub fn is_match(&self, pii_type: PIIType, value: &str) -> bool {
        self.patterns
            .get(&pii_type)
            .is_some_and(|regex| regex.is_match(value))
    }

    /// Whether the table holds a pattern for `pii_type`
    pub fn has_pattern(&self, pii_type: PIIType) -> bool {
        self.patterns.contains_key(&pii_type)
    }
}
