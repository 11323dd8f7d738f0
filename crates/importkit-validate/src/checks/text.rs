/// Length bounds for text fields, counted in characters.
pub fn check(
    name: &str,
    value: &str,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Option<String> {
    let length = value.chars().count();
    if let Some(min) = min_length
        && length < min
    {
        return Some(format!("{name} must be at least {min} characters"));
    }
    if let Some(max) = max_length
        && length > max
    {
        return Some(format!("{name} exceeds maximum length of {max} characters"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(check("note", "ab", Some(2), Some(4)), None);
        assert_eq!(check("note", "abcd", Some(2), Some(4)), None);
        assert_eq!(
            check("note", "a", Some(2), Some(4)),
            Some("note must be at least 2 characters".to_string())
        );
        assert_eq!(
            check("note", "abcde", Some(2), Some(4)),
            Some("note exceeds maximum length of 4 characters".to_string())
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(check("note", "héllo", None, Some(5)), None);
    }
}
