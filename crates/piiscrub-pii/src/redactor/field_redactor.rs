//! Field-specific masking transforms

use crate::detector::PIIType;
use crate::redactor::{
    AADHAR_MASK, MALFORMED_EMAIL, PASSPORT_MASK, PHONE_MASK, PIIRedactor, fallback_mask,
};

/// Redactor dispatching on the field's category.
///
/// Phone, Aadhaar, passport, email and name have dedicated partial masks.
/// Every other field, UPI ids included, gets `[REDACTED_<FIELD>]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRedactor;

impl FieldRedactor {
    pub fn new() -> Self {
        Self
    }

    /// Whether `field` has a dedicated transform
    pub fn has_dedicated_transform(field: &str) -> bool {
        matches!(
            PIIType::from_field(field),
            Some(
                PIIType::Phone
                    | PIIType::Aadhar
                    | PIIType::Passport
                    | PIIType::Email
                    | PIIType::Name
            )
        )
    }
}

impl PIIRedactor for FieldRedactor {
    fn redact(&self, field: &str, value: &str) -> String {
        match PIIType::from_field(field) {
            Some(PIIType::Phone) => redact_phone(value),
            Some(PIIType::Aadhar) => redact_aadhar(value),
            Some(PIIType::Passport) => redact_passport(value),
            Some(PIIType::Email) => redact_email(value),
            Some(PIIType::Name) => redact_name(value),
            _ => fallback_mask(field),
        }
    }
}

/// First `n` characters
fn head(value: &str, n: usize) -> &str {
    match value.char_indices().nth(n) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Last `n` characters
fn tail(value: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match value.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &value[idx..],
        None => value,
    }
}

fn redact_phone(phone: &str) -> String {
    format!("{}{}{}", head(phone, 2), PHONE_MASK, tail(phone, 2))
}

fn redact_aadhar(aadhar: &str) -> String {
    format!("{}{}", AADHAR_MASK, tail(aadhar, 4))
}

fn redact_passport(passport: &str) -> String {
    format!("{}{}{}", head(passport, 1), PASSPORT_MASK, tail(passport, 2))
}

fn redact_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return MALFORMED_EMAIL.to_string();
    };
    if domain.contains('@') {
        return MALFORMED_EMAIL.to_string();
    }

    let (Some(first), Some(last)) = (local.chars().next(), local.chars().next_back()) else {
        return MALFORMED_EMAIL.to_string();
    };

    let hidden = local.chars().count().saturating_sub(2);
    format!("{}{}{}@{}", first, "*".repeat(hidden), last, domain)
}

fn redact_name(name: &str) -> String {
    name.split_whitespace()
        .map(|token| {
            let hidden = token.chars().count() - 1;
            format!("{}{}", head(token, 1), "*".repeat(hidden))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
