#![allow(missing_docs)]

use importkit_model::{
    BooleanTemplate, DateFormat, FieldDefinition, FieldRules, FieldType, Importer, NumberSign,
    ValidationConflict,
};

fn parse_field(json: &str) -> FieldDefinition {
    serde_json::from_str(json).expect("field should deserialize")
}

#[test]
fn test_number_rules_from_extra_rules() {
    let field = parse_field(
        r#"{"name": "price", "type": "number",
            "extra_rules": {"sign": "positive", "min_value": 1, "max_value": "100"}}"#,
    );
    assert_eq!(field.field_type(), FieldType::Number);
    assert_eq!(
        field.rules,
        FieldRules::Number {
            sign: NumberSign::Positive,
            integer_only: false,
            min_value: Some(1.0),
            max_value: Some(100.0),
        }
    );
}

#[test]
fn test_legacy_validation_format_promotes_by_type() {
    let number = parse_field(r#"{"name": "n", "type": "number", "validation_format": "negative"}"#);
    assert!(matches!(
        number.rules,
        FieldRules::Number {
            sign: NumberSign::Negative,
            ..
        }
    ));

    let date = parse_field(r#"{"name": "d", "type": "date", "validation_format": "MM/DD/YYYY"}"#);
    assert_eq!(
        date.rules,
        FieldRules::Date {
            format: DateFormat::MonthDayYear
        }
    );

    let regex =
        parse_field(r#"{"name": "sku", "type": "custom_regex", "validation_format": "^SKU-\\d+$"}"#);
    assert_eq!(
        regex.rules,
        FieldRules::CustomRegex {
            pattern: "^SKU-\\d+$".to_string()
        }
    );

    let select = parse_field(r#"{"name": "s", "type": "select", "validation_format": "a, b , c"}"#);
    assert_eq!(
        select.rules,
        FieldRules::Select {
            options: vec!["a".to_string(), "b".to_string(), "c".to_string()]
        }
    );
}

#[test]
fn test_legacy_integer_type_becomes_number() {
    let field = parse_field(r#"{"name": "count", "type": "integer"}"#);
    assert_eq!(field.field_type(), FieldType::Number);
    assert!(matches!(
        field.rules,
        FieldRules::Number {
            integer_only: true,
            ..
        }
    ));
}

#[test]
fn test_extra_rules_as_bare_string() {
    let field = parse_field(r#"{"name": "amount", "type": "number", "extra_rules": "positive"}"#);
    assert!(matches!(
        field.rules,
        FieldRules::Number {
            sign: NumberSign::Positive,
            ..
        }
    ));
}

#[test]
fn test_extra_rules_as_encoded_json_string() {
    let field = parse_field(
        r#"{"name": "when", "type": "date", "extra_rules": "{\"format\": \"YYYY-MM-DD\"}"}"#,
    );
    assert_eq!(
        field.rules,
        FieldRules::Date {
            format: DateFormat::YearMonthDayDash
        }
    );
}

#[test]
fn test_boolean_template_spellings() {
    for template in ["true_false", "true/false", "TRUE/FALSE"] {
        let json = format!(
            r#"{{"name": "active", "type": "boolean", "extra_rules": {{"template": "{template}"}}}}"#
        );
        let field = parse_field(&json);
        assert_eq!(
            field.rules,
            FieldRules::Boolean {
                template: BooleanTemplate::TrueFalse
            },
            "template spelling {template} should normalize"
        );
    }

    // Unknown templates fall back to the permissive vocabulary.
    let field = parse_field(
        r#"{"name": "active", "type": "boolean", "extra_rules": {"template": "maybe/never"}}"#,
    );
    assert_eq!(
        field.rules,
        FieldRules::Boolean {
            template: BooleanTemplate::Any
        }
    );
}

#[test]
fn test_select_options_as_list_or_string() {
    let from_list =
        parse_field(r#"{"name": "size", "type": "select", "extra_rules": {"options": ["S", "M"]}}"#);
    let from_string = parse_field(
        r#"{"name": "size", "type": "select", "extra_rules": {"options": "S, M"}}"#,
    );
    assert_eq!(from_list.rules, from_string.rules);

    let legacy_top_level =
        parse_field(r#"{"name": "size", "type": "select", "options": ["S", "M"]}"#);
    assert_eq!(legacy_top_level.rules, from_list.rules);
}

#[test]
fn test_text_length_bounds_from_either_location() {
    let nested = parse_field(
        r#"{"name": "note", "type": "text", "extra_rules": {"min_length": 2, "max_length": 10}}"#,
    );
    let top_level =
        parse_field(r#"{"name": "note", "type": "text", "min_length": 2, "max_length": 10}"#);
    assert_eq!(nested.rules, top_level.rules);
    assert_eq!(
        nested.rules,
        FieldRules::Text {
            min_length: Some(2),
            max_length: Some(10),
        }
    );
}

#[test]
fn test_serializes_canonical_shape() {
    let field = parse_field(r#"{"name": "price", "type": "number", "validation_format": "positive"}"#);
    let json = serde_json::to_value(&field).expect("serialize field");

    assert_eq!(json["type"], "number");
    assert_eq!(json["extra_rules"]["sign"], "positive");
    // Legacy knobs are input-only.
    assert!(json.get("validation_format").is_none());

    let round: FieldDefinition = serde_json::from_value(json).expect("round-trip field");
    assert_eq!(round, field);
}

#[test]
fn test_unknown_type_is_an_error() {
    let err = serde_json::from_str::<FieldDefinition>(r#"{"name": "x", "type": "url"}"#)
        .expect_err("url is not a supported type");
    let message = err.to_string();
    assert!(message.contains("unknown field type 'url'"), "{message}");
    assert!(message.contains("custom_regex"), "{message}");
}

#[test]
fn test_display_name_round_trip() {
    let field = parse_field(r#"{"name": "email", "display_name": "Email Address", "type": "email"}"#);
    assert_eq!(field.display_label.as_deref(), Some("Email Address"));
    assert_eq!(field.label(), "Email Address");

    let json = serde_json::to_value(&field).expect("serialize field");
    assert_eq!(json["display_name"], "Email Address");
}

#[test]
fn test_importer_round_trip_and_defaults() {
    let importer = Importer::from_json(
        r#"{
            "name": "Contacts",
            "fields": [
                {"name": "email", "type": "email", "required": true},
                {"name": "age", "type": "number"}
            ]
        }"#,
    )
    .expect("importer should parse");

    assert_eq!(importer.fields.len(), 2);
    assert!(!importer.include_unmatched_columns);
    assert!(!importer.filter_invalid_rows);
    assert!(!importer.disable_on_invalid_rows);
    assert!(importer.field("email").is_some_and(|field| field.required));
    assert!(importer.field("missing").is_none());
}

#[test]
fn test_importer_rejects_duplicate_field_names() {
    let err = Importer::from_json(
        r#"{"name": "Bad", "fields": [
            {"name": "email", "type": "email"},
            {"name": "EMAIL", "type": "text"}
        ]}"#,
    )
    .expect_err("duplicate names should fail");
    assert!(err.to_string().contains("duplicate field name"));

    let err = Importer::from_json(r#"{"name": "Bad", "fields": [{"name": "  ", "type": "text"}]}"#)
        .expect_err("blank names should fail");
    assert!(err.to_string().contains("empty name"));
}

#[test]
fn test_conflict_wire_shape() {
    let conflict = ValidationConflict {
        row: 3,
        col: 1,
        field: "email".to_string(),
        csv_column: "Email Address".to_string(),
        error: "email must be a valid email address".to_string(),
        value: "not-an-email".to_string(),
    };
    let json = serde_json::to_value(&conflict).expect("serialize conflict");
    assert_eq!(json["csvColumn"], "Email Address");
    assert_eq!(json["row"], 3);

    let round: ValidationConflict = serde_json::from_value(json).expect("round-trip conflict");
    assert_eq!(round, conflict);
}
