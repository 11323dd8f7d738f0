use importkit_model::BooleanTemplate;

/// Boolean check: case-insensitive membership in the template vocabulary.
pub fn check(name: &str, value: &str, template: BooleanTemplate) -> Option<String> {
    let lower = value.to_lowercase();
    if template.vocabulary().contains(&lower.as_str()) {
        None
    } else {
        Some(format!(
            "{name} must be a valid boolean value ({})",
            template.expected_display()
        ))
    }
}
