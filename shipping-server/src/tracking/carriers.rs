//! Carrier Rule Table and Validator
//!
//! Static table of recognized shipping carriers with their tracking-number
//! patterns, plus the pure validation used by the shipping-update endpoint.
//! Aliases map onto the same rule ("Flash" and "Flash Express" share one
//! pattern). Descriptions are the Thai strings shown in the admin UI.

use crate::utils::AppError;
use regex::Regex;
use shared::models::CarrierFormat;
use std::sync::LazyLock;

/// One recognized carrier with its tracking-number format
#[derive(Debug)]
pub struct CarrierRule {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub regex: Regex,
    pub examples: &'static [&'static str],
    pub description: &'static str,
}

impl CarrierRule {
    /// Primary example, echoed back on format-mismatch errors
    pub fn example(&self) -> &'static str {
        self.examples[0]
    }

    fn matches_name(&self, candidate: &str) -> bool {
        self.name.eq_ignore_ascii_case(candidate)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(candidate))
    }
}

static RULES: LazyLock<Vec<CarrierRule>> = LazyLock::new(|| {
    // Patterns are compiled once at first use; the (?i) flag mirrors the
    // case-insensitive matching of the admin UI.
    let rule = |name: &'static str,
                aliases: &'static [&'static str],
                pattern: &str,
                examples: &'static [&'static str],
                description: &'static str| CarrierRule {
        name,
        aliases,
        regex: Regex::new(pattern).expect("carrier pattern must compile"),
        examples,
        description,
    };

    vec![
        rule(
            "Thailand Post",
            &["ไปรษณีย์ไทย"],
            r"(?i)^[A-Z]{2}[0-9]{9}TH$",
            &["EG123456789TH", "RP987654321TH"],
            "ตัวอักษร 2 ตัว + ตัวเลข 9 หลัก + ตัวอักษร 2 ตัว (TH)",
        ),
        // NOTE: the declared example is 15 alphanumeric characters and does
        // not match the declared 13-digit pattern. Both are preserved as
        // the storefront publishes them, pending product-owner clarification.
        rule(
            "Flash Express",
            &["Flash"],
            r"(?i)^[0-9]{13}$",
            &["TH1234567890123"],
            "ตัวเลข 13 หลัก",
        ),
        rule(
            "J&T Express",
            &["J&T"],
            r"(?i)^[0-9]{12}$",
            &["820000000000"],
            "ตัวเลข 12 หลัก",
        ),
        rule(
            "Kerry Express",
            &["Kerry"],
            r"(?i)^[A-Z]{2}[0-9]{9}$",
            &["SHP123456789"],
            "ตัวอักษร 2 ตัว + ตัวเลข 9 หลัก",
        ),
        rule(
            "Ninja Van",
            &["Ninjavan"],
            r"(?i)^[A-Z]{3}[0-9]{9}$",
            &["NVN123456789"],
            "ตัวอักษร 3 ตัว + ตัวเลข 9 หลัก",
        ),
        rule(
            "DHL",
            &[],
            r"(?i)(^[0-9]{10}$)|(^[A-Z][0-9]{11,14}$)",
            &["1234567890", "GM123456789012345"],
            "DHL Express: ตัวเลข 10 หลัก หรือ DHL eCommerce: ตัวอักษร+ตัวเลข (12–15 หลัก)",
        ),
        rule(
            "FedEx",
            &[],
            r"(?i)^(?:[0-9]{12}|[0-9]{15})$",
            &["123456789012", "123456789012345"],
            "ตัวเลข 12 หลัก หรือ 15 หลัก",
        ),
        rule(
            "SCG Express",
            &[],
            r"(?i)^SCG[0-9]{10,12}$",
            &["SCG1234567890"],
            "ตัวอักษร SCG + ตัวเลข 10–12 หลัก",
        ),
    ]
});

/// All carrier rules, canonical order
pub fn rules() -> &'static [CarrierRule] {
    &RULES
}

/// Look up a carrier by name or alias (case-insensitive exact match)
pub fn find_rule(carrier: &str) -> Option<&'static CarrierRule> {
    RULES.iter().find(|rule| rule.matches_name(carrier))
}

/// Validate a carrier name and an optional candidate tracking code.
///
/// Pure function of the inputs and the static table; returns the matched
/// rule so callers can persist the name as submitted.
pub fn validate(carrier: &str, tracking: Option<&str>) -> Result<&'static CarrierRule, AppError> {
    let rule =
        find_rule(carrier).ok_or_else(|| AppError::UnsupportedCarrier(carrier.to_string()))?;

    if let Some(code) = tracking
        && !rule.regex.is_match(code.trim())
    {
        return Err(AppError::FormatMismatch {
            example: rule.example().to_string(),
        });
    }

    Ok(rule)
}

/// Export of the rule table for client-side display
pub fn formats() -> Vec<CarrierFormat> {
    RULES
        .iter()
        .map(|rule| CarrierFormat {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            regex: rule.regex.as_str().to_string(),
            examples: rule.examples.iter().map(|e| e.to_string()).collect(),
        })
        .collect()
}
