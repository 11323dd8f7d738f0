use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The supported field types of an importer schema.
///
/// The set is closed: every field definition carries exactly one of these,
/// and the rule shape for each is fixed (see [`FieldRules`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Email,
    Phone,
    Boolean,
    Select,
    CustomRegex,
}

impl FieldType {
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Date,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Boolean,
        FieldType::Select,
        FieldType::CustomRegex,
    ];

    /// Canonical wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Boolean => "boolean",
            FieldType::Select => "select",
            FieldType::CustomRegex => "custom_regex",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ModelError;

    /// Parse a type name. Accepts the aliases older importer definitions
    /// used (`string`, `numeric`, `integer`, `datetime`, `bool`, `enum`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "string" => Ok(FieldType::Text),
            "number" | "numeric" | "integer" => Ok(FieldType::Number),
            "date" | "datetime" => Ok(FieldType::Date),
            "email" => Ok(FieldType::Email),
            "phone" => Ok(FieldType::Phone),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "select" | "enum" => Ok(FieldType::Select),
            // "customregex" is the camelCase spelling after lowercasing.
            "custom_regex" | "customregex" | "regex" => Ok(FieldType::CustomRegex),
            other => Err(ModelError::UnknownFieldType(other.to_string())),
        }
    }
}

/// Sign constraint for number fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberSign {
    #[default]
    Any,
    Positive,
    Negative,
}

impl NumberSign {
    /// Lenient parse: anything that is not `positive` or `negative` means
    /// no sign constraint, matching how the rule bag was read upstream.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "positive" => NumberSign::Positive,
            "negative" => NumberSign::Negative,
            _ => NumberSign::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberSign::Any => "any",
            NumberSign::Positive => "positive",
            NumberSign::Negative => "negative",
        }
    }
}

/// Accepted layouts for date fields.
///
/// A named format constrains both the digit-group shape of the raw string
/// and the calendar meaning of the groups; `Any` accepts every common
/// layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[default]
    Any,
    /// `MM/DD/YYYY` (also `-` or `.` as the delimiter).
    MonthDayYear,
    /// `DD/MM/YYYY` (also `-` or `.` as the delimiter).
    DayMonthYear,
    /// `YYYY/MM/DD` (also `-` or `.` as the delimiter).
    YearMonthDaySlash,
    /// `YYYY-MM-DD` (also `/` or `.` as the delimiter).
    YearMonthDayDash,
}

impl DateFormat {
    /// Lenient parse of a format name; unrecognized names fall back to
    /// `Any`, the tolerant reading the source rule bags got.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "MM/DD/YYYY" => DateFormat::MonthDayYear,
            "DD/MM/YYYY" => DateFormat::DayMonthYear,
            "YYYY/MM/DD" => DateFormat::YearMonthDaySlash,
            "YYYY-MM-DD" => DateFormat::YearMonthDayDash,
            _ => DateFormat::Any,
        }
    }

    /// Format name as shown in validation messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::Any => "Any",
            DateFormat::MonthDayYear => "MM/DD/YYYY",
            DateFormat::DayMonthYear => "DD/MM/YYYY",
            DateFormat::YearMonthDaySlash => "YYYY/MM/DD",
            DateFormat::YearMonthDayDash => "YYYY-MM-DD",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Boolean vocabulary templates. Each template accepts exactly its two
/// literals, case-insensitively; `Any` accepts the union of all four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanTemplate {
    #[default]
    Any,
    TrueFalse,
    YesNo,
    OneZero,
    OnOff,
}

impl BooleanTemplate {
    /// Lenient parse accepting both the slash and underscore spellings
    /// (`true/false`, `true_false`); unknown templates fall back to `Any`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "true/false" | "true_false" => BooleanTemplate::TrueFalse,
            "yes/no" | "yes_no" => BooleanTemplate::YesNo,
            "1/0" | "1_0" => BooleanTemplate::OneZero,
            "on/off" | "on_off" => BooleanTemplate::OnOff,
            _ => BooleanTemplate::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BooleanTemplate::Any => "any",
            BooleanTemplate::TrueFalse => "true/false",
            BooleanTemplate::YesNo => "yes/no",
            BooleanTemplate::OneZero => "1/0",
            BooleanTemplate::OnOff => "on/off",
        }
    }

    /// Accepted literals (lowercase).
    pub fn vocabulary(&self) -> &'static [&'static str] {
        match self {
            BooleanTemplate::Any => &["true", "false", "yes", "no", "1", "0", "on", "off"],
            BooleanTemplate::TrueFalse => &["true", "false"],
            BooleanTemplate::YesNo => &["yes", "no"],
            BooleanTemplate::OneZero => &["1", "0"],
            BooleanTemplate::OnOff => &["on", "off"],
        }
    }

    /// How the expected vocabulary is named inside validation messages.
    pub fn expected_display(&self) -> &'static str {
        match self {
            BooleanTemplate::Any => "any of: true/false, yes/no, 1/0, on/off",
            other => other.as_str(),
        }
    }
}

/// Per-type validation rules. The variant is the field type, so a rule
/// shape can never disagree with the type it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRules {
    Text {
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    Number {
        sign: NumberSign,
        /// Whole numbers only (the old `integer` type / `subtype` knob).
        integer_only: bool,
        min_value: Option<f64>,
        max_value: Option<f64>,
    },
    Date {
        format: DateFormat,
    },
    Email,
    Phone,
    Boolean {
        template: BooleanTemplate,
    },
    Select {
        options: Vec<String>,
    },
    CustomRegex {
        pattern: String,
    },
}

impl FieldRules {
    /// The field type this rule set belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldRules::Text { .. } => FieldType::Text,
            FieldRules::Number { .. } => FieldType::Number,
            FieldRules::Date { .. } => FieldType::Date,
            FieldRules::Email => FieldType::Email,
            FieldRules::Phone => FieldType::Phone,
            FieldRules::Boolean { .. } => FieldType::Boolean,
            FieldRules::Select { .. } => FieldType::Select,
            FieldRules::CustomRegex { .. } => FieldType::CustomRegex,
        }
    }

    /// Unconstrained rules for a type.
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => FieldRules::Text {
                min_length: None,
                max_length: None,
            },
            FieldType::Number => FieldRules::Number {
                sign: NumberSign::Any,
                integer_only: false,
                min_value: None,
                max_value: None,
            },
            FieldType::Date => FieldRules::Date {
                format: DateFormat::Any,
            },
            FieldType::Email => FieldRules::Email,
            FieldType::Phone => FieldRules::Phone,
            FieldType::Boolean => FieldRules::Boolean {
                template: BooleanTemplate::Any,
            },
            FieldType::Select => FieldRules::Select {
                options: Vec::new(),
            },
            FieldType::CustomRegex => FieldRules::CustomRegex {
                pattern: String::new(),
            },
        }
    }

    /// Build rules from the wire-side `extra_rules` bag plus the legacy
    /// top-level knobs older definitions carried (`validation_format`,
    /// `template`, bare `pattern`/`options`, value and length bounds).
    fn from_wire(field_type: FieldType, extra: Option<&Value>, legacy: &LegacyRuleKeys) -> Self {
        let bag = RuleBag::resolve(field_type, extra);

        match field_type {
            FieldType::Text => FieldRules::Text {
                min_length: bag.get_usize("min_length").or(legacy.min_length),
                max_length: bag.get_usize("max_length").or(legacy.max_length),
            },
            FieldType::Number => FieldRules::Number {
                sign: bag
                    .get_str("sign")
                    .or_else(|| bag.get_str("validation_format"))
                    .or_else(|| legacy.validation_format.clone())
                    .map(|s| NumberSign::parse_lenient(&s))
                    .unwrap_or_default(),
                integer_only: bag.get_str("subtype").is_some_and(|s| s == "integer"),
                min_value: bag.get_f64("min_value").or(legacy.min_value),
                max_value: bag.get_f64("max_value").or(legacy.max_value),
            },
            FieldType::Date => FieldRules::Date {
                format: bag
                    .get_str("format")
                    .or_else(|| bag.get_str("validation_format"))
                    .or_else(|| legacy.validation_format.clone())
                    .map(|s| DateFormat::parse_lenient(&s))
                    .unwrap_or_default(),
            },
            FieldType::Email => FieldRules::Email,
            FieldType::Phone => FieldRules::Phone,
            FieldType::Boolean => FieldRules::Boolean {
                template: bag
                    .get_str("template")
                    .or_else(|| bag.get_str("validation_format"))
                    .or_else(|| bag.get_str("format"))
                    .or_else(|| legacy.template_str())
                    .map(|s| BooleanTemplate::parse_lenient(&s))
                    .unwrap_or_default(),
            },
            FieldType::Select => {
                let options = bag
                    .get_options("options")
                    .or_else(|| legacy.options.as_ref().and_then(parse_options))
                    .or_else(|| {
                        legacy
                            .validation_format
                            .as_ref()
                            .map(|s| split_options(s))
                    })
                    .unwrap_or_default();
                FieldRules::Select { options }
            }
            FieldType::CustomRegex => FieldRules::CustomRegex {
                pattern: bag
                    .get_str("pattern")
                    .or_else(|| legacy.pattern.clone())
                    .or_else(|| legacy.validation_format.clone())
                    .unwrap_or_default(),
            },
        }
    }

    /// The canonical `extra_rules` object for this rule set. Default
    /// settings are omitted, so an unconstrained field round-trips as `{}`.
    fn extra_rules_value(&self) -> Value {
        let mut map = Map::new();
        match self {
            FieldRules::Text {
                min_length,
                max_length,
            } => {
                if let Some(n) = min_length {
                    map.insert("min_length".into(), Value::from(*n));
                }
                if let Some(n) = max_length {
                    map.insert("max_length".into(), Value::from(*n));
                }
            }
            FieldRules::Number {
                sign,
                integer_only,
                min_value,
                max_value,
            } => {
                if *sign != NumberSign::Any {
                    map.insert("sign".into(), Value::from(sign.as_str()));
                }
                if *integer_only {
                    map.insert("subtype".into(), Value::from("integer"));
                }
                if let Some(v) = min_value {
                    map.insert("min_value".into(), Value::from(*v));
                }
                if let Some(v) = max_value {
                    map.insert("max_value".into(), Value::from(*v));
                }
            }
            FieldRules::Date { format } => {
                if *format != DateFormat::Any {
                    map.insert("format".into(), Value::from(format.as_str()));
                }
            }
            FieldRules::Email | FieldRules::Phone => {}
            FieldRules::Boolean { template } => {
                if *template != BooleanTemplate::Any {
                    map.insert("template".into(), Value::from(template.as_str()));
                }
            }
            FieldRules::Select { options } => {
                if !options.is_empty() {
                    map.insert(
                        "options".into(),
                        Value::from(options.iter().map(String::as_str).collect::<Vec<_>>()),
                    );
                }
            }
            FieldRules::CustomRegex { pattern } => {
                map.insert("pattern".into(), Value::from(pattern.as_str()));
            }
        }
        Value::Object(map)
    }
}

/// A resolved rule bag: the `extra_rules` value reduced to a key/value map.
struct RuleBag(Map<String, Value>);

impl RuleBag {
    /// Older definitions stored `extra_rules` as a JSON-encoded string or
    /// even a bare keyword (`"positive"`); resolve all of those to a map.
    fn resolve(field_type: FieldType, extra: Option<&Value>) -> Self {
        let map = match extra {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::String(s)) => {
                if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(s) {
                    map
                } else {
                    bare_string_rules(field_type, s)
                }
            }
            _ => Map::new(),
        };
        RuleBag(map)
    }

    fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key)?.as_str().map(str::to_string)
    }

    /// Numeric bound, tolerating numbers stored as strings.
    fn get_f64(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn get_usize(&self, key: &str) -> Option<usize> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn get_options(&self, key: &str) -> Option<Vec<String>> {
        parse_options(self.0.get(key)?)
    }
}

/// Interpret a bare-string `extra_rules` value the way the old rule bags
/// did: the string stands for the type's primary knob.
fn bare_string_rules(field_type: FieldType, s: &str) -> Map<String, Value> {
    let mut map = Map::new();
    let key = match field_type {
        FieldType::Number => Some("sign"),
        FieldType::Date => Some("format"),
        FieldType::Boolean => Some("template"),
        FieldType::Select => Some("options"),
        FieldType::CustomRegex => Some("pattern"),
        FieldType::Text | FieldType::Email | FieldType::Phone => None,
    };
    if let Some(key) = key {
        map.insert(key.into(), Value::from(s));
    }
    map
}

/// Options given either as a JSON array or as a comma-separated string.
fn parse_options(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(s) => Some(split_options(s)),
        _ => None,
    }
}

fn split_options(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// One target field of an importer schema.
///
/// `name` is the machine key fields are addressed by (mappings, conflicts
/// and validation messages all use it); `display_label` is what the review
/// UI shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField", into = "RawField")]
pub struct FieldDefinition {
    pub name: String,
    pub display_label: Option<String>,
    pub required: bool,
    /// The mapping step must assign a column to this field.
    pub must_match: bool,
    /// Review-grid gate: cells may not be left blank. Carried for
    /// round-tripping; blank handling in validation is driven by
    /// `required` alone.
    pub not_blank: bool,
    pub description: Option<String>,
    pub example: Option<String>,
    /// Replaces the message of a failed type or length check.
    pub validation_error_message: Option<String>,
    pub rules: FieldRules,
}

impl FieldDefinition {
    /// A minimal field: optional, no label, the given rules.
    pub fn new(name: impl Into<String>, rules: FieldRules) -> Self {
        FieldDefinition {
            name: name.into(),
            display_label: None,
            required: false,
            must_match: false,
            not_blank: false,
            description: None,
            example: None,
            validation_error_message: None,
            rules,
        }
    }

    /// A minimal field with the type's default rules.
    pub fn of_type(name: impl Into<String>, field_type: FieldType) -> Self {
        FieldDefinition::new(name, FieldRules::default_for(field_type))
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.validation_error_message = Some(message.into());
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.rules.field_type()
    }

    /// Display label, falling back to the machine name.
    pub fn label(&self) -> &str {
        self.display_label.as_deref().unwrap_or(&self.name)
    }
}

/// Wire shape of a field definition. Accepts the legacy knobs older
/// importer payloads carried; always writes the canonical shape back.
#[derive(Serialize, Deserialize)]
struct RawField {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    must_match: bool,
    #[serde(default)]
    not_blank: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    validation_error_message: Option<String>,
    #[serde(default)]
    extra_rules: Option<Value>,
    // Legacy knobs: read on input, never written back.
    #[serde(default, skip_serializing)]
    validation_format: Option<String>,
    #[serde(default, skip_serializing)]
    template: Option<Value>,
    #[serde(default, skip_serializing)]
    pattern: Option<String>,
    #[serde(default, skip_serializing)]
    options: Option<Value>,
    #[serde(default, skip_serializing)]
    min_value: Option<f64>,
    #[serde(default, skip_serializing)]
    max_value: Option<f64>,
    #[serde(default, skip_serializing)]
    min_length: Option<usize>,
    #[serde(default, skip_serializing)]
    max_length: Option<usize>,
}

struct LegacyRuleKeys {
    validation_format: Option<String>,
    template: Option<Value>,
    pattern: Option<String>,
    options: Option<Value>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl LegacyRuleKeys {
    fn template_str(&self) -> Option<String> {
        self.template.as_ref()?.as_str().map(str::to_string)
    }
}

impl TryFrom<RawField> for FieldDefinition {
    type Error = ModelError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        // The retired `integer` type folds into number rules.
        let integer_type = raw.field_type.trim().eq_ignore_ascii_case("integer");
        let field_type = raw.field_type.parse::<FieldType>()?;

        let legacy = LegacyRuleKeys {
            validation_format: raw.validation_format,
            template: raw.template,
            pattern: raw.pattern,
            options: raw.options,
            min_value: raw.min_value,
            max_value: raw.max_value,
            min_length: raw.min_length,
            max_length: raw.max_length,
        };
        let mut rules = FieldRules::from_wire(field_type, raw.extra_rules.as_ref(), &legacy);
        if integer_type
            && let FieldRules::Number { integer_only, .. } = &mut rules
        {
            *integer_only = true;
        }

        Ok(FieldDefinition {
            name: raw.name,
            display_label: raw.display_name,
            required: raw.required,
            must_match: raw.must_match,
            not_blank: raw.not_blank,
            description: raw.description,
            example: raw.example,
            validation_error_message: raw.validation_error_message,
            rules,
        })
    }
}

impl From<FieldDefinition> for RawField {
    fn from(field: FieldDefinition) -> Self {
        RawField {
            name: field.name,
            display_name: field.display_label,
            field_type: field.rules.field_type().as_str().to_string(),
            required: field.required,
            must_match: field.must_match,
            not_blank: field.not_blank,
            description: field.description,
            example: field.example,
            validation_error_message: field.validation_error_message,
            extra_rules: Some(field.rules.extra_rules_value()),
            validation_format: None,
            template: None,
            pattern: None,
            options: None,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
        }
    }
}
