use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use importkit_model::DateFormat;
use regex::Regex;

/// Day-or-month-first shapes: 1-2 digit groups, 4 digit year, any of
/// `-` `/` `.` as the delimiter.
static DAY_FIRST_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[-/.](\d{1,2})[-/.](\d{4})$").expect("invalid day-first shape regex")
});

/// Year-first shape shared by YYYY/MM/DD and YYYY-MM-DD.
static YEAR_FIRST_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})$").expect("invalid year-first shape regex")
});

static PURE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid digits regex"));

/// Layouts tried under `DateFormat::Any`, besides ISO 8601 datetimes.
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date check. A named format constrains the raw shape first, then the
/// calendar meaning of the digit groups; `Any` accepts every common
/// layout. Pure digit strings never pass: Excel serial numbers and packed
/// dates like `20230101` must be fixed upstream, not imported silently.
pub fn check(name: &str, value: &str, format: DateFormat) -> Option<String> {
    match format {
        DateFormat::Any => check_any(name, value),
        named => check_named(name, value, named),
    }
}

fn check_named(name: &str, value: &str, format: DateFormat) -> Option<String> {
    let shape = match format {
        DateFormat::MonthDayYear | DateFormat::DayMonthYear => &*DAY_FIRST_SHAPE,
        _ => &*YEAR_FIRST_SHAPE,
    };
    let Some(caps) = shape.captures(value) else {
        return Some(format!("{name} must be in {format} format"));
    };

    let (year, month, day) = match format {
        DateFormat::MonthDayYear => (group(&caps, 3), group(&caps, 1), group(&caps, 2)),
        DateFormat::DayMonthYear => (group(&caps, 3), group(&caps, 2), group(&caps, 1)),
        _ => (group(&caps, 1), group(&caps, 2), group(&caps, 3)),
    };
    if calendar_date(year, month, day).is_none() {
        return Some(format!("{name} must be a valid date in {format} format"));
    }
    None
}

fn check_any(name: &str, value: &str) -> Option<String> {
    if PURE_DIGITS.is_match(value) {
        return Some(format!("{name} must be a valid date format (not just numbers)"));
    }
    if parses_common_layout(value) {
        None
    } else {
        Some(format!("{name} must be a valid date format"))
    }
}

fn parses_common_layout(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }
    if DATE_LAYOUTS
        .iter()
        .any(|layout| NaiveDate::parse_from_str(value, layout).is_ok())
    {
        return true;
    }
    DATETIME_LAYOUTS
        .iter()
        .any(|layout| NaiveDateTime::parse_from_str(value, layout).is_ok())
}

/// Digit group as a number; the shapes guarantee digits, and 0 is never a
/// valid calendar part.
fn group(caps: &regex::Captures<'_>, index: usize) -> u32 {
    caps[index].parse().unwrap_or(0)
}

fn calendar_date(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    if year == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_accepts_common_layouts() {
        for value in [
            "2023-01-01",
            "2023/01/01",
            "2023.01.01",
            "01/31/2023",
            "31/01/2023",
            "2023-01-01 10:30:00",
            "2023-01-01T10:30:00Z",
        ] {
            assert_eq!(check("when", value, DateFormat::Any), None, "{value}");
        }
    }

    #[test]
    fn any_rejects_pure_digits() {
        assert_eq!(
            check("when", "20230101", DateFormat::Any),
            Some("when must be a valid date format (not just numbers)".to_string())
        );
        assert_eq!(
            check("when", "12345", DateFormat::Any),
            Some("when must be a valid date format (not just numbers)".to_string())
        );
    }

    #[test]
    fn any_rejects_garbage() {
        assert_eq!(
            check("when", "not a date", DateFormat::Any),
            Some("when must be a valid date format".to_string())
        );
    }

    #[test]
    fn named_format_checks_shape_then_calendar() {
        let mdy = |value: &str| check("when", value, DateFormat::MonthDayYear);
        assert_eq!(mdy("12/31/2023"), None);
        assert_eq!(mdy("1/2/2023"), None);
        assert_eq!(mdy("12-31-2023"), None); // any delimiter
        assert_eq!(
            mdy("2023/12/31"),
            Some("when must be in MM/DD/YYYY format".to_string())
        );
        assert_eq!(
            mdy("13/01/2023"),
            Some("when must be a valid date in MM/DD/YYYY format".to_string())
        );
        assert_eq!(
            mdy("02/30/2023"),
            Some("when must be a valid date in MM/DD/YYYY format".to_string())
        );
    }

    #[test]
    fn day_first_format_swaps_groups() {
        let dmy = |value: &str| check("when", value, DateFormat::DayMonthYear);
        assert_eq!(dmy("31/01/2023"), None);
        assert_eq!(
            dmy("01/31/2023"),
            Some("when must be a valid date in DD/MM/YYYY format".to_string())
        );
    }

    #[test]
    fn year_first_formats_share_a_shape() {
        assert_eq!(check("when", "2024/02/29", DateFormat::YearMonthDaySlash), None);
        assert_eq!(check("when", "2024-02-29", DateFormat::YearMonthDayDash), None);
        assert_eq!(
            check("when", "2023-02-29", DateFormat::YearMonthDayDash),
            Some("when must be a valid date in YYYY-MM-DD format".to_string())
        );
        assert_eq!(
            check("when", "29/02/2024", DateFormat::YearMonthDayDash),
            Some("when must be in YYYY-MM-DD format".to_string())
        );
    }
}
