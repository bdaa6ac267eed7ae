//! End-to-end record scenarios for the PII engine

use piiscrub_pii::{DetectorConfig, PIIDetector, Record, RecordScanner, RuleBasedDetector};
use serde_json::{Value, json};

fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be an object"),
    }
}

fn scan(value: Value) -> (Record, bool) {
    let scanner = RecordScanner::from_config(DetectorConfig::default()).unwrap();
    let outcome = scanner.scan(&record(value));
    (outcome.record, outcome.is_pii)
}

#[test]
fn phone_alone_is_pii() {
    let (redacted, is_pii) = scan(json!({ "phone": "9876543210" }));

    assert!(is_pii);
    assert_eq!(redacted["phone"], "98XXXXXX10");
}

#[test]
fn aadhar_alone_is_pii() {
    let (redacted, is_pii) = scan(json!({ "aadhar": "123412341234" }));

    assert!(is_pii);
    assert_eq!(redacted["aadhar"], "XXXXXXXX1234");
}

#[test]
fn email_with_ip_is_pii() {
    let (redacted, is_pii) = scan(json!({
        "email": "jane.doe@example.com",
        "ip_address": "10.0.0.5"
    }));

    assert!(is_pii);
    assert_eq!(redacted["email"], "j******e@example.com");
    assert_eq!(redacted["ip_address"], "[REDACTED_IP_ADDRESS]");
}

#[test]
fn bare_first_name_is_not_pii() {
    let (redacted, is_pii) = scan(json!({ "name": "Madhav" }));

    assert!(!is_pii);
    assert_eq!(redacted["name"], "Madhav");
}

#[test]
fn full_name_with_address_is_pii() {
    let (redacted, is_pii) = scan(json!({
        "name": "Madhav Rao",
        "address": "221B Baker Street"
    }));

    assert!(is_pii);
    assert_eq!(redacted["name"], "M***** R**");
    assert_eq!(redacted["address"], "[REDACTED_ADDRESS]");
}

#[test]
fn upi_id_uses_generic_mask() {
    let (redacted, is_pii) = scan(json!({ "upi_id": "user@bank" }));

    assert!(is_pii);
    assert_eq!(redacted["upi_id"], "[REDACTED_UPI_ID]");
}

#[test]
fn unrelated_fields_are_never_pii() {
    let detector = RuleBasedDetector::new(DetectorConfig::default()).unwrap();
    let detection = detector.detect(&record(json!({
        "product_description": "Wireless mouse, contact 9876543210",
        "order_id": "123412341234",
        "customer": { "phone": "9876543210" },
        "tags": ["email", "name"]
    })));

    assert!(!detection.is_pii);
    assert!(detection.pii_fields.is_empty());
}

#[test]
fn standalone_match_is_independent_of_other_fields() {
    let (redacted, is_pii) = scan(json!({
        "phone": "9876543210",
        "name": "Madhav",
        "address": "Pune"
    }));

    assert!(is_pii);
    assert_eq!(redacted["phone"], "98XXXXXX10");
    assert_eq!(redacted["name"], "Madhav");
    assert_eq!(redacted["address"], "Pune");
}

#[test]
fn nested_values_pass_through_untouched() {
    let (redacted, is_pii) = scan(json!({
        "passport": "P1234567",
        "meta": { "source": "web", "tags": [1, 2, 3] }
    }));

    assert!(is_pii);
    assert_eq!(redacted["passport"], "PXXXXX67");
    assert_eq!(redacted["meta"], json!({ "source": "web", "tags": [1, 2, 3] }));
}
