pub mod checks;
mod grid;

pub use grid::{revalidate_conflicts, validate_grid};

use importkit_model::{FieldDefinition, FieldRules};

/// Validate one cell against one field definition.
///
/// Returns `None` when the value is acceptable, or a user-facing message
/// naming the field when it is not. Pure and stateless: the same inputs
/// always produce the same output.
///
/// Decision order:
/// 1. Blank handling: `None`, empty and whitespace-only values are blank.
///    A blank cell fails a required field and passes everything else,
///    regardless of type rules.
/// 2. The type's structural check, on the trimmed value.
/// 3. For text fields, the length bounds.
///
/// A configured `validation_error_message` replaces the message of a
/// failed type or length check; the required message always stays, since
/// the review grid uses it to point at empty cells.
pub fn validate_cell(value: Option<&str>, field: &FieldDefinition) -> Option<String> {
    let trimmed = value.unwrap_or("").trim();
    if trimmed.is_empty() {
        if field.required {
            return Some(format!("{} is required", field.name));
        }
        return None;
    }

    let error = match &field.rules {
        FieldRules::Text {
            min_length,
            max_length,
        } => checks::text::check(&field.name, trimmed, *min_length, *max_length),
        FieldRules::Number {
            sign,
            integer_only,
            min_value,
            max_value,
        } => checks::number::check(
            &field.name,
            trimmed,
            *sign,
            *integer_only,
            *min_value,
            *max_value,
        ),
        FieldRules::Date { format } => checks::date::check(&field.name, trimmed, *format),
        FieldRules::Email => checks::email::check(&field.name, trimmed),
        FieldRules::Phone => checks::phone::check(&field.name, trimmed),
        FieldRules::Boolean { template } => {
            checks::boolean::check(&field.name, trimmed, *template)
        }
        FieldRules::Select { options } => checks::select::check(&field.name, trimmed, options),
        FieldRules::CustomRegex { pattern } => {
            checks::pattern::check(&field.name, trimmed, pattern)
        }
    };

    match (error, &field.validation_error_message) {
        (Some(_), Some(custom)) => Some(custom.clone()),
        (error, _) => error,
    }
}
