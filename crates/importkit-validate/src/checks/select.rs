/// Select check: case-insensitive membership in the configured options.
/// An empty option list means the rule is inapplicable and everything
/// passes; option sets are owned by the importer, not guessed here.
pub fn check(name: &str, value: &str, options: &[String]) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let lower = value.to_lowercase();
    if options.iter().any(|option| option.to_lowercase() == lower) {
        None
    } else {
        Some(format!("{name} must be one of: {}", options.join(", ")))
    }
}
