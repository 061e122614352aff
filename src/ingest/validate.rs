//! Review-time per-field validation.
//!
//! Validation is surfaced per field, independently, so a review UI can
//! localize errors next to the offending input instead of showing one
//! aggregated message. Nothing here mutates the record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::manifest::{is_non_negative_decimal, is_positive_decimal};
use super::record::NormalizedRecord;

static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid address regex"));

static COLOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid color regex"));

/// Per-field validity for one record. `None` means the field is valid;
/// `Some(message)` carries the user-facing problem description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordIssues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl RecordIssues {
    pub fn is_clean(&self) -> bool {
        self.name.is_none()
            && self.price_amount.is_none()
            && self.supply.is_none()
            && self.price_currency.is_none()
            && self.background_color.is_none()
    }
}

/// Validate a normalized record field by field.
pub fn validate_record(record: &NormalizedRecord) -> RecordIssues {
    let mut issues = RecordIssues::default();

    if record.name.trim().is_empty() {
        issues.name = Some("name is required".to_string());
    }

    if !record.price_amount.trim().is_empty() && !is_non_negative_decimal(&record.price_amount) {
        issues.price_amount = Some("price must be a number of at least 0".to_string());
    }

    if !record.supply.trim().is_empty() && !is_positive_decimal(&record.supply) {
        issues.supply = Some("supply must be a number greater than 0".to_string());
    }

    if !ADDRESS_PATTERN.is_match(&record.price_currency) {
        issues.price_currency = Some("currency must be a valid address".to_string());
    }

    if let Some(color) = record.background_color.as_deref() {
        if !COLOR_PATTERN.is_match(color) {
            issues.background_color =
                Some("background color must match #RRGGBB".to_string());
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::record::NATIVE_TOKEN_ADDRESS;

    fn record() -> NormalizedRecord {
        NormalizedRecord {
            name: "Genesis".to_string(),
            description: None,
            image: None,
            animation_url: None,
            external_url: None,
            background_color: None,
            price_amount: "1".to_string(),
            price_currency: NATIVE_TOKEN_ADDRESS.to_string(),
            supply: "1".to_string(),
            attributes: Vec::new(),
        }
    }

    #[test]
    fn test_defaulted_record_is_clean() {
        assert!(validate_record(&record()).is_clean());
    }

    #[test]
    fn test_empty_name_flagged() {
        let mut r = record();
        r.name = "  ".to_string();
        let issues = validate_record(&r);
        assert!(issues.name.is_some());
        // Other fields unaffected
        assert!(issues.price_amount.is_none());
    }

    #[test]
    fn test_zero_price_valid_zero_supply_invalid() {
        let mut r = record();
        r.price_amount = "0".to_string();
        r.supply = "0".to_string();
        let issues = validate_record(&r);
        assert!(issues.price_amount.is_none());
        assert!(issues.supply.is_some());
    }

    #[test]
    fn test_malformed_currency_flagged() {
        let mut r = record();
        r.price_currency = "not-an-address".to_string();
        assert!(validate_record(&r).price_currency.is_some());
    }

    #[test]
    fn test_background_color_pattern() {
        let mut r = record();
        r.background_color = Some("#A1B2C3".to_string());
        assert!(validate_record(&r).background_color.is_none());

        r.background_color = Some("A1B2C3".to_string());
        assert!(validate_record(&r).background_color.is_some());

        r.background_color = Some("#A1B2C".to_string());
        assert!(validate_record(&r).background_color.is_some());
    }

    #[test]
    fn test_issues_are_independent() {
        let mut r = record();
        r.name = String::new();
        r.supply = "abc".to_string();
        r.background_color = Some("red".to_string());
        let issues = validate_record(&r);
        assert!(issues.name.is_some());
        assert!(issues.supply.is_some());
        assert!(issues.background_color.is_some());
        assert!(issues.price_amount.is_none());
        assert!(issues.price_currency.is_none());
        assert!(!issues.is_clean());
    }
}
