//! Rule-based record detector implementation

use crate::detector::{
    DetectionRule, DetectorConfig, PIIDetector, PIIType, PatternTable, Record, RecordDetection,
};
use crate::error::{PiiError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Detector applying the standalone and combinatorial rule classes
#[derive(Debug, Clone)]
pub struct RuleBasedDetector {
    config: DetectorConfig,
    patterns: Arc<PatternTable>,
}

impl RuleBasedDetector {
    /// Create a detector with its own compiled pattern table
    pub fn new(config: DetectorConfig) -> Result<Self> {
        let patterns = Arc::new(PatternTable::new()?);
        Self::with_patterns(config, patterns)
    }

    /// Create a detector sharing an existing pattern table
    pub fn with_patterns(config: DetectorConfig, patterns: Arc<PatternTable>) -> Result<Self> {
        if config.combinatorial_threshold == 0 {
            return Err(PiiError::Config(
                "combinatorial_threshold must be at least 1".to_string(),
            ));
        }

        Ok(Self { config, patterns })
    }

    /// Whether a present combinatorial field passes its minimum-information filter.
    /// Filters only look at string values; any other present value qualifies.
    fn qualifies(&self, pii_type: PIIType, value: &Value) -> bool {
        let Value::String(text) = value else {
            return true;
        };

        match pii_type {
            PIIType::Name if self.config.require_multi_token_name => {
                text.chars().any(char::is_whitespace)
            }
            PIIType::Address => text.split_whitespace().count() >= self.config.min_address_tokens,
            _ => true,
        }
    }
}

impl PIIDetector for RuleBasedDetector {
    fn detect(&self, record: &Record) -> RecordDetection {
        let mut detection = RecordDetection::default();

        // Standalone pass
        for (field, value) in record {
            let Some(pii_type) = PIIType::from_field(field) else {
                continue;
            };
            if !pii_type.is_standalone() {
                continue;
            }
            if let Value::String(text) = value {
                if self.patterns.is_match(pii_type, text) {
                    trace!(field = %field, "standalone pattern matched");
                    detection.mark(field, pii_type, DetectionRule::Standalone);
                }
            }
        }

        // Combinatorial pass
        let qualifying: Vec<(&String, PIIType)> = record
            .iter()
            .filter_map(|(field, value)| {
                let pii_type = PIIType::from_field(field)?;
                (pii_type.is_combinatorial() && self.qualifies(pii_type, value))
                    .then_some((field, pii_type))
            })
            .collect();

        if qualifying.len() >= self.config.combinatorial_threshold {
            trace!(count = qualifying.len(), "combinatorial threshold reached");
            for (field, pii_type) in qualifying {
                detection.mark(field, pii_type, DetectionRule::Combinatorial);
            }
        }

        detection
    }

    fn supported_types(&self) -> Vec<PIIType> {
        PIIType::STANDALONE
            .into_iter()
            .chain(PIIType::COMBINATORIAL)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn detector() -> RuleBasedDetector {
        RuleBasedDetector::new(DetectorConfig::default()).unwrap()
    }

    #[test]
    fn test_no_known_fields_is_clean() {
        let detection = detector().detect(&record(json!({
            "order_id": "9876543210",
            "product": "Laptop",
            "amount": 54000
        })));

        assert!(!detection.is_pii);
        assert!(detection.pii_fields.is_empty());
        assert!(detection.matches.is_empty());
    }

    #[test]
    fn test_standalone_phone_flags_alone() {
        let detection = detector().detect(&record(json!({
            "phone": "9876543210",
            "product": "Laptop"
        })));

        assert!(detection.is_pii);
        assert!(detection.contains("phone"));
        assert_eq!(detection.pii_fields.len(), 1);
        assert_eq!(detection.matches[0].rule, DetectionRule::Standalone);
        assert_eq!(detection.matches[0].pii_type, PIIType::Phone);
    }

    #[test]
    fn test_phone_with_wrong_digit_count_is_ignored() {
        for phone in ["987654321", "98765432101"] {
            let detection = detector().detect(&record(json!({ "phone": phone })));
            assert!(!detection.is_pii, "{} should not be flagged", phone);
        }
    }

    #[test]
    fn test_non_string_standalone_value_is_ignored() {
        let detection = detector().detect(&record(json!({ "phone": 9876543210u64 })));
        assert!(!detection.is_pii);

        let detection = detector().detect(&record(json!({ "aadhar": null })));
        assert!(!detection.is_pii);
    }

    #[test]
    fn test_single_combinatorial_field_is_not_enough() {
        let detection = detector().detect(&record(json!({ "email": "jane.doe@example.com" })));
        assert!(!detection.is_pii);
        assert!(detection.pii_fields.is_empty());
    }

    #[test]
    fn test_two_combinatorial_fields_flag_both() {
        let detection = detector().detect(&record(json!({
            "email": "jane.doe@example.com",
            "ip_address": "10.0.0.5"
        })));

        assert!(detection.is_pii);
        assert!(detection.contains("email"));
        assert!(detection.contains("ip_address"));
        assert!(
            detection
                .matches
                .iter()
                .all(|m| m.rule == DetectionRule::Combinatorial)
        );
    }

    #[test]
    fn test_all_qualifying_fields_are_marked() {
        let detection = detector().detect(&record(json!({
            "name": "Madhav Rao",
            "email": "madhav@example.com",
            "device_id": "D-88231",
            "ip_address": "192.168.1.10"
        })));

        assert!(detection.is_pii);
        assert_eq!(detection.pii_fields.len(), 4);
    }

    #[test]
    fn test_single_token_name_does_not_qualify() {
        let detection = detector().detect(&record(json!({
            "name": "Madhav",
            "email": "madhav@example.com"
        })));
        assert!(!detection.is_pii);

        let detection = detector().detect(&record(json!({
            "name": "Madhav Rao",
            "email": "madhav@example.com"
        })));
        assert!(detection.is_pii);
    }

    #[test]
    fn test_name_with_tab_separator_qualifies() {
        let detection = detector().detect(&record(json!({
            "name": "Madhav\tRao",
            "email": "madhav@example.com"
        })));
        assert!(detection.is_pii);
        assert!(detection.contains("name"));
    }

    #[test]
    fn test_short_address_does_not_qualify() {
        let detection = detector().detect(&record(json!({
            "address": "Baker Street",
            "email": "madhav@example.com"
        })));
        assert!(!detection.is_pii);

        let detection = detector().detect(&record(json!({
            "address": "221B Baker Street",
            "email": "madhav@example.com"
        })));
        assert!(detection.is_pii);
        assert!(detection.contains("address"));
    }

    #[test]
    fn test_present_null_value_qualifies_for_weak_signals() {
        let detection = detector().detect(&record(json!({
            "email": null,
            "device_id": "D-1"
        })));
        assert!(detection.is_pii);
        assert!(detection.contains("email"));
    }

    #[test]
    fn test_non_string_name_skips_token_filter() {
        let detection = detector().detect(&record(json!({
            "name": 42,
            "ip_address": "10.0.0.5"
        })));
        assert!(detection.is_pii);
        assert!(detection.contains("name"));
    }

    #[test]
    fn test_both_passes_union() {
        let detection = detector().detect(&record(json!({
            "passport": "P1234567",
            "email": "jane@example.com",
            "device_id": "D-1",
            "name": "Jane"
        })));

        assert!(detection.is_pii);
        let fields: Vec<&str> = detection.pii_fields.iter().map(String::as_str).collect();
        assert_eq!(fields, vec!["device_id", "email", "passport"]);
    }

    #[test]
    fn test_custom_threshold() {
        let config = DetectorConfig {
            combinatorial_threshold: 3,
            ..Default::default()
        };
        let detector = RuleBasedDetector::new(config).unwrap();

        let detection = detector.detect(&record(json!({
            "email": "jane@example.com",
            "ip_address": "10.0.0.5"
        })));
        assert!(!detection.is_pii);
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let config = DetectorConfig {
            combinatorial_threshold: 0,
            ..Default::default()
        };
        let err = RuleBasedDetector::new(config).unwrap_err();
        assert!(matches!(err, PiiError::Config(_)));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let input = record(json!({
            "name": "Madhav Rao",
            "address": "221B Baker Street",
            "phone": "9876543210"
        }));
        let detector = detector();
        assert_eq!(detector.detect(&input), detector.detect(&input));
    }

    #[test]
    fn test_supported_types() {
        let types = detector().supported_types();
        assert_eq!(types.len(), 9);
        assert!(types.contains(&PIIType::UpiId));
        assert!(types.contains(&PIIType::DeviceId));
    }
}
