//! Text normalization for header and field name comparison.

/// Normalizes text for comparison by lowercasing and replacing separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
