use std::sync::LazyLock;

use regex::Regex;

/// One `@`, no whitespace, at least one dot in the domain part. Kept
/// deliberately loose; deliverability is not a structural property.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

pub fn check(name: &str, value: &str) -> Option<String> {
    if EMAIL_SHAPE.is_match(value) {
        None
    } else {
        Some(format!("{name} must be a valid email address"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert_eq!(check("email", "a@b.c"), None);
        assert_eq!(check("email", "first.last@sub.example.com"), None);
    }

    #[test]
    fn rejects_malformed_addresses() {
        for value in ["a.b.com", "a @b.c", "a@b", "@b.c", "a@", "a@@b.c"] {
            assert_eq!(
                check("email", value),
                Some("email must be a valid email address".to_string()),
                "{value}"
            );
        }
    }
}
