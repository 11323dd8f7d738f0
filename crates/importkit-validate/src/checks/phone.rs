use std::sync::LazyLock;

use regex::Regex;

/// Optional leading `+`, then 7 to 15 characters of digits, spaces,
/// hyphens and parentheses. International prefixes and local formatting
/// both pass; alphabetic vanity numbers do not.
static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{7,15}$").expect("invalid phone regex"));

pub fn check(name: &str, value: &str) -> Option<String> {
    if PHONE_SHAPE.is_match(value) {
        None
    } else {
        Some(format!("{name} must be a valid phone number"))
    }
}
