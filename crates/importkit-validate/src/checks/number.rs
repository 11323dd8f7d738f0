use importkit_model::NumberSign;

/// Number check: misfiled-content heuristics first, then parse, then the
/// rule knobs in the order the review grid reports them.
pub fn check(
    name: &str,
    value: &str,
    sign: NumberSign,
    integer_only: bool,
    min_value: Option<f64>,
    max_value: Option<f64>,
) -> Option<String> {
    // Common mis-mapped columns: emails and URLs landing in number fields.
    if value.contains('@') {
        return Some(format!(
            "{name} appears to contain an email address but should be a number"
        ));
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        return Some(format!(
            "{name} appears to contain a URL but should be a number"
        ));
    }

    let number: f64 = match value.parse::<f64>() {
        // f64::parse accepts "NaN" and "inf"; neither is a usable cell value.
        Ok(number) if number.is_finite() => number,
        _ => return Some(format!("{name} must be a valid number")),
    };

    if integer_only && number.fract() != 0.0 {
        return Some(format!("{name} must be a whole number"));
    }

    if let Some(min) = min_value
        && number < min
    {
        return Some(format!("{name} must be at least {min}"));
    }
    if let Some(max) = max_value
        && number > max
    {
        return Some(format!("{name} must be at most {max}"));
    }

    match sign {
        NumberSign::Positive if number <= 0.0 => Some(format!("{name} must be a positive number")),
        NumberSign::Negative if number >= 0.0 => Some(format!("{name} must be a negative number")),
        _ => None,
    }
}
