use regex::Regex;
use tracing::warn;

/// Custom pattern check: unanchored search, the way the review grid's
/// regex fields behave. A pattern that does not compile makes the rule
/// inapplicable; the broken pattern is a schema bug to surface to
/// developers, never a reason to reject user data.
pub fn check(name: &str, value: &str, pattern: &str) -> Option<String> {
    if pattern.is_empty() {
        return None;
    }
    match Regex::new(pattern) {
        Ok(regex) if regex.is_match(value) => None,
        Ok(_) => Some(format!("{name} does not match required pattern")),
        Err(error) => {
            warn!(field = name, pattern, %error, "invalid custom regex, skipping check");
            None
        }
    }
}
