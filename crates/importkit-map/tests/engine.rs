#![allow(missing_docs)]

use importkit_map::{MAPPING_SAMPLE_ROWS, suggest_mappings};
use importkit_model::{FieldDefinition, FieldType};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
    data.iter().map(|row| row.iter().map(|cell| (*cell).to_string()).collect()).collect()
}

fn field(name: &str, field_type: FieldType) -> FieldDefinition {
    FieldDefinition::of_type(name, field_type)
}

#[test]
fn test_exact_header_reaches_full_confidence() {
    let suggestions = suggest_mappings(
        &headers(&["email"]),
        &rows(&[&["a@b.com"], &["c@d.io"], &["e@f.co"]]),
        &[field("email", FieldType::Email)],
    );
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].csv_column, "email");
    assert_eq!(suggestions[0].target_field_name, "email");
    assert_eq!(suggestions[0].confidence, 100.0);
    assert_eq!(suggestions[0].reason, "Exact name match (100% of samples match email)");
}

#[test]
fn test_display_label_counts_as_exact_name() {
    let fields =
        [field("contact_email", FieldType::Email).with_label("Email Address")];
    let suggestions =
        suggest_mappings(&headers(&["Email Address"]), &rows(&[&["a@b.com"]]), &fields);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field_name, "contact_email");
    assert_eq!(suggestions[0].confidence, 100.0);
}

#[test]
fn test_email_address_header_maps_to_email_field() {
    let suggestions = suggest_mappings(
        &headers(&["Email Address"]),
        &rows(&[&["a@b.com"], &["c@d.io"]]),
        &[field("email", FieldType::Email)],
    );
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field_name, "email");
    assert!(suggestions[0].confidence >= 85.0);
}

#[test]
fn test_qty_header_maps_to_quantity_by_synonym() {
    let suggestions = suggest_mappings(
        &headers(&["qty"]),
        &rows(&[&["5"], &["12"], &["3"]]),
        &[field("quantity", FieldType::Number)],
    );
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field_name, "quantity");
    assert!(suggestions[0].confidence >= 70.0);
    assert!(
        suggestions[0].reason.starts_with("Semantic name match"),
        "unexpected reason: {}",
        suggestions[0].reason
    );
}

#[test]
fn test_reverse_synonym_still_matches() {
    let suggestions = suggest_mappings(
        &headers(&["last name"]),
        &rows(&[&["Smith"], &["Jones"]]),
        &[field("surname", FieldType::Text)],
    );
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field_name, "surname");
    assert!(suggestions[0].confidence >= 70.0);
    assert_eq!(suggestions[0].reason, "Semantic name match (100% of samples match text)");
}

#[test]
fn test_unrelated_header_gets_no_suggestion() {
    let suggestions = suggest_mappings(
        &headers(&["zzz_random_123"]),
        &rows(&[&["apple"], &["banana"], &["cherry"]]),
        &[field("price", FieldType::Number), field("quantity", FieldType::Number)],
    );
    assert!(suggestions.is_empty());
}

#[test]
fn test_data_evidence_alone_stays_below_threshold() {
    // A perfect type match contributes at most 18 combined points.
    let suggestions = suggest_mappings(
        &headers(&["mystery"]),
        &rows(&[&["10"], &["20"], &["30"]]),
        &[field("price", FieldType::Number)],
    );
    assert!(suggestions.is_empty());
}

#[test]
fn test_one_suggestion_per_header() {
    let fields = [
        field("email", FieldType::Email),
        field("contact_email", FieldType::Email).with_label("Email Address"),
    ];
    let suggestions = suggest_mappings(&headers(&["email"]), &rows(&[&["a@b.com"]]), &fields);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field_name, "email");
}

#[test]
fn test_tied_fields_resolve_to_first_in_schema_order() {
    let tied = [field("cost", FieldType::Number), field("amount", FieldType::Number)];
    let suggestions = suggest_mappings(&headers(&["price"]), &rows(&[&["10"]]), &tied);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field_name, "cost");

    let flipped = [field("amount", FieldType::Number), field("cost", FieldType::Number)];
    let suggestions = suggest_mappings(&headers(&["price"]), &rows(&[&["10"]]), &flipped);
    assert_eq!(suggestions[0].target_field_name, "amount");
}

#[test]
fn test_output_sorted_by_descending_confidence() {
    let fields = [field("email", FieldType::Email), field("phone", FieldType::Phone)];
    let suggestions = suggest_mappings(
        &headers(&["customer phone", "email"]),
        &rows(&[&["555-123-4567", "a@b.com"]]),
        &fields,
    );
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].csv_column, "email");
    assert_eq!(suggestions[1].csv_column, "customer phone");
    assert!(suggestions[0].confidence >= suggestions[1].confidence);
}

#[test]
fn test_confidence_stays_in_bounds() {
    let fields = [
        field("email", FieldType::Email),
        field("phone", FieldType::Phone),
        field("quantity", FieldType::Number),
        field("notes", FieldType::Text),
    ];
    let suggestions = suggest_mappings(
        &headers(&["Email Address", "tel", "qty", "notes", "unrelated"]),
        &rows(&[
            &["a@b.com", "5551234567", "5", "hello", "x"],
            &["c@d.io", "5559876543", "7", "world", "y"],
        ]),
        &fields,
    );
    assert!(!suggestions.is_empty());
    for suggestion in &suggestions {
        assert!(
            suggestion.confidence > 30.0 && suggestion.confidence <= 100.0,
            "{} out of bounds: {}",
            suggestion.csv_column,
            suggestion.confidence
        );
    }
}

#[test]
fn test_empty_inputs_yield_no_suggestions() {
    let fields = [field("email", FieldType::Email)];
    let data = rows(&[&["a@b.com"]]);
    assert!(suggest_mappings(&[], &data, &fields).is_empty());
    assert!(suggest_mappings(&headers(&["email"]), &[], &fields).is_empty());
    assert!(suggest_mappings(&headers(&["email"]), &data, &[]).is_empty());
}

#[test]
fn test_blank_headers_are_skipped() {
    let suggestions = suggest_mappings(
        &headers(&["", "email"]),
        &rows(&[&["x", "a@b.com"]]),
        &[field("email", FieldType::Email)],
    );
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].csv_column, "email");
}

#[test]
fn test_rows_beyond_the_sample_window_are_ignored() {
    let data = rows(&[&["5"], &["6"], &["7"], &["oops"]]);
    assert!(data.len() > MAPPING_SAMPLE_ROWS);
    let suggestions =
        suggest_mappings(&headers(&["qty"]), &data, &[field("quantity", FieldType::Number)]);
    assert_eq!(suggestions.len(), 1);
    assert!(
        suggestions[0].reason.contains("100% of samples match number"),
        "unexpected reason: {}",
        suggestions[0].reason
    );
}

#[test]
fn test_short_rows_read_as_blank_cells() {
    // Second column has no data in either row; blanks give no type evidence.
    let suggestions = suggest_mappings(
        &headers(&["email", "joined"]),
        &rows(&[&["a@b.com"], &[]]),
        &[field("email", FieldType::Email), field("joined", FieldType::Date)],
    );
    let joined = suggestions
        .iter()
        .find(|suggestion| suggestion.csv_column == "joined")
        .expect("exact name still matches");
    assert_eq!(joined.reason, "Exact name match");
    assert_eq!(joined.confidence, 100.0);
}

#[test]
fn test_fields_parsed_from_wire_json_drive_suggestions() {
    let fields: Vec<FieldDefinition> = serde_json::from_value(serde_json::json!([
        {
            "name": "status",
            "type": "select",
            "extra_rules": { "options": "active, inactive" }
        }
    ]))
    .expect("wire fields parse");
    let suggestions = suggest_mappings(
        &headers(&["Status"]),
        &rows(&[&["active"], &["INACTIVE"], &["active"]]),
        &fields,
    );
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field_name, "status");
    assert_eq!(suggestions[0].reason, "Exact name match (100% of samples match select)");
}
