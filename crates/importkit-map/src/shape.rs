//! Shape checks used to score sample data against field types.
//!
//! These are deliberately looser than the validator's checks: they decide
//! whether a cell *looks like* a type, not whether it satisfies every rule
//! on the field (bounds, sign and format specifics are ignored here).

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use importkit_model::{BooleanTemplate, FieldRules};
use regex::Regex;

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{7,15}$").expect("invalid phone regex"));

static PURE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid digits regex"));

const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y", "%d/%m/%Y"];

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Whether a sampled cell looks like the field's type.
///
/// Text accepts everything, blank cells included. Every other type treats
/// a blank cell as a non-match.
pub fn value_matches_type(value: &str, rules: &FieldRules) -> bool {
    let trimmed = value.trim();
    match rules {
        FieldRules::Text { .. } => true,
        _ if trimmed.is_empty() => false,
        FieldRules::Number { .. } => trimmed.parse::<f64>().is_ok_and(f64::is_finite),
        FieldRules::Date { .. } => looks_like_date(trimmed),
        FieldRules::Email => trimmed.contains('@') && trimmed.contains('.'),
        FieldRules::Phone => PHONE_SHAPE.is_match(trimmed),
        FieldRules::Boolean { .. } => {
            let lowered = trimmed.to_lowercase();
            BooleanTemplate::Any.vocabulary().contains(&lowered.as_str())
        }
        FieldRules::Select { options } => {
            let lowered = trimmed.to_lowercase();
            options.iter().any(|option| option.trim().to_lowercase() == lowered)
        }
        FieldRules::CustomRegex { pattern } => {
            !pattern.is_empty() && Regex::new(pattern).is_ok_and(|regex| regex.is_match(trimmed))
        }
    }
}

/// Loose date recognition: any of the common layouts, but a bare digit run
/// (a phone number, an id) is never a date.
fn looks_like_date(value: &str) -> bool {
    if PURE_DIGITS.is_match(value) {
        return false;
    }
    DateTime::parse_from_rfc3339(value).is_ok()
        || DATE_LAYOUTS.iter().any(|layout| NaiveDate::parse_from_str(value, layout).is_ok())
        || DATETIME_LAYOUTS
            .iter()
            .any(|layout| NaiveDateTime::parse_from_str(value, layout).is_ok())
}
