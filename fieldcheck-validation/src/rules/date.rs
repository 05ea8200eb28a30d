// Date rules

use crate::{DATE_FORMAT, MessageParams, Rule, RuleError, Value, render};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Date a comparison rule checks against.
///
/// The relative keywords are resolved exactly once, when the rule is built.
/// A rule built just before midnight keeps comparing against the old day.
#[derive(Debug, Clone, PartialEq)]
pub enum DateTarget {
    Today,
    Yesterday,
    Tomorrow,
    Date(NaiveDate),
    /// Parsed with the rule's date format
    Text(String),
}

impl DateTarget {
    /// Resolve against `today`, parsing text with `format`.
    pub fn resolve(&self, format: &str, today: NaiveDate) -> Result<NaiveDate, RuleError> {
        let resolved = match self {
            DateTarget::Today => Some(today),
            DateTarget::Yesterday => today.pred_opt(),
            DateTarget::Tomorrow => today.succ_opt(),
            DateTarget::Date(date) => Some(*date),
            DateTarget::Text(text) => NaiveDate::parse_from_str(text, format).ok(),
        };
        resolved.ok_or_else(|| RuleError::InvalidDate {
            value: self.to_string(),
            format: format.to_string(),
        })
    }
}

impl std::fmt::Display for DateTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateTarget::Today => f.write_str("today"),
            DateTarget::Yesterday => f.write_str("yesterday"),
            DateTarget::Tomorrow => f.write_str("tomorrow"),
            DateTarget::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            DateTarget::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for DateTarget {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => DateTarget::Today,
            "yesterday" => DateTarget::Yesterday,
            "tomorrow" => DateTarget::Tomorrow,
            _ => DateTarget::Text(value.to_string()),
        }
    }
}

impl From<String> for DateTarget {
    fn from(value: String) -> Self {
        DateTarget::from(value.as_str())
    }
}

impl From<NaiveDate> for DateTarget {
    fn from(value: NaiveDate) -> Self {
        DateTarget::Date(value)
    }
}

impl From<NaiveDateTime> for DateTarget {
    fn from(value: NaiveDateTime) -> Self {
        DateTarget::Date(value.date())
    }
}

fn check_format(format: &str) -> Result<(), RuleError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(RuleError::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

fn read_date(value: &Value, format: &str) -> Option<NaiveDate> {
    match value {
        Value::Date(date) => Some(*date),
        Value::Str(text) => NaiveDate::parse_from_str(text, format).ok(),
        _ => None,
    }
}

/// Value must be a date in the configured format.
///
/// Typed dates always pass. Placeholders: `field_name`, `value`,
/// `date_format`.
#[derive(Debug, Clone)]
pub struct IsDate {
    format: String,
    message: String,
}

impl IsDate {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} is not a valid date";

    pub fn new() -> Self {
        Self {
            format: DATE_FORMAT.to_string(),
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Use a `strftime` style format instead of `%Y-%m-%d`.
    pub fn with_format(mut self, format: impl Into<String>) -> Result<Self, RuleError> {
        let format = format.into();
        check_format(&format)?;
        self.format = format;
        Ok(self)
    }

    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for IsDate {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for IsDate {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        if value.is_null() || read_date(value, &self.format).is_some() {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", value)
            .with("date_format", &self.format);
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "is_date"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "date_format"]
    }
}

/// Used by the comparison rules when the value cannot be read as a date.
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format: {value}";

const COMPARISON_PLACEHOLDERS: &[&str] = &["field_name", "value", "target_date", "date_format"];

macro_rules! date_comparison_rule {
    (
        $(#[$doc:meta])*
        $rule:ident, $name:literal, $default:literal,
        |$v:ident, $t:ident| $passes:expr
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $rule {
            target: NaiveDate,
            format: String,
            message: String,
            invalid_message: String,
        }

        impl $rule {
            pub const DEFAULT_MESSAGE: &'static str = $default;

            /// Compare against `target` using the `%Y-%m-%d` format.
            pub fn new(target: impl Into<DateTarget>) -> Result<Self, RuleError> {
                Self::with_format(target, DATE_FORMAT)
            }

            /// Compare against `target`, reading values and textual targets
            /// with `format`. Relative targets resolve against the local date.
            pub fn with_format(
                target: impl Into<DateTarget>,
                format: impl Into<String>,
            ) -> Result<Self, RuleError> {
                Self::resolved_on(target, format, Local::now().date_naive())
            }

            /// Like [`with_format`](Self::with_format), with relative targets
            /// resolved against `today`.
            pub fn resolved_on(
                target: impl Into<DateTarget>,
                format: impl Into<String>,
                today: NaiveDate,
            ) -> Result<Self, RuleError> {
                let format = format.into();
                check_format(&format)?;
                let target = target.into().resolve(&format, today)?;
                Ok(Self {
                    target,
                    format,
                    message: Self::DEFAULT_MESSAGE.to_string(),
                    invalid_message: INVALID_DATE_MESSAGE.to_string(),
                })
            }

            /// Resolved target date.
            pub fn target_date(&self) -> NaiveDate {
                self.target
            }

            /// Template used when the value is not a date.
            pub fn with_invalid_message(mut self, template: impl Into<String>) -> Self {
                self.invalid_message = template.into();
                self
            }
        }

        impl Rule for $rule {
            fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
                if value.is_null() {
                    return None;
                }
                let params = MessageParams::new(field_name)
                    .with("value", value)
                    .with("target_date", self.target)
                    .with("date_format", &self.format);
                let Some($v) = read_date(value, &self.format) else {
                    return Some(render(&self.invalid_message, &params));
                };
                let $t = self.target;
                if $passes {
                    None
                } else {
                    Some(render(&self.message, &params))
                }
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn placeholders(&self) -> &'static [&'static str] {
                COMPARISON_PLACEHOLDERS
            }
        }
    };
}

date_comparison_rule!(
    /// Value must be the target date.
    ///
    /// Placeholders: `field_name`, `value`, `target_date`, `date_format`.
    DateEquals, "date_equals",
    "field {field_name} must be equal to {target_date}",
    |value, target| value == target
);

date_comparison_rule!(
    /// Value must be strictly after the target date.
    ///
    /// Placeholders: `field_name`, `value`, `target_date`, `date_format`.
    DateAfter, "date_after",
    "field {field_name} must be after {target_date}",
    |value, target| value > target
);

date_comparison_rule!(
    /// Value must be strictly before the target date.
    ///
    /// Placeholders: `field_name`, `value`, `target_date`, `date_format`.
    DateBefore, "date_before",
    "field {field_name} must be before {target_date}",
    |value, target| value < target
);

message_template!(IsDate, DateEquals, DateAfter, DateBefore);

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_date() {
        let rule = IsDate::new();
        assert_eq!(rule.validate(&Value::from("2024-12-24"), "d"), None);
        assert_eq!(rule.validate(&Value::from(ymd(2024, 1, 1)), "d"), None);
        assert_eq!(rule.validate(&Value::Null, "d"), None);
        assert_eq!(
            rule.validate(&Value::from("2024-13-01"), "d"),
            Some("field d is not a valid date".to_string())
        );
        assert!(rule.validate(&Value::from(20240101), "d").is_some());
    }

    #[test]
    fn test_is_date_custom_format() {
        let rule = IsDate::new()
            .with_format("%d/%m/%Y")
            .unwrap()
            .with_message("{value} does not match {date_format}");
        assert_eq!(rule.validate(&Value::from("24/12/2024"), "d"), None);
        assert_eq!(
            rule.validate(&Value::from("2024-12-24"), "d"),
            Some("2024-12-24 does not match %d/%m/%Y".to_string())
        );
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(matches!(
            IsDate::new().with_format("%Y-%m-%"),
            Err(RuleError::InvalidDateFormat(_))
        ));
        assert!(DateAfter::with_format("today", "%Y-%m-%").is_err());
    }

    #[test]
    fn test_target_keywords() {
        assert_eq!(DateTarget::from("Today"), DateTarget::Today);
        assert_eq!(DateTarget::from(" yesterday "), DateTarget::Yesterday);
        assert_eq!(DateTarget::from("TOMORROW".to_string()), DateTarget::Tomorrow);
        assert_eq!(
            DateTarget::from("2024-01-01"),
            DateTarget::Text("2024-01-01".to_string())
        );
    }

    #[test]
    fn test_resolution_fixed_at_construction() {
        let today = ymd(2024, 3, 1);
        let rule = DateAfter::resolved_on("yesterday", DATE_FORMAT, today).unwrap();
        assert_eq!(rule.target_date(), ymd(2024, 2, 29));
        assert_eq!(rule.validate(&Value::from(today), "d"), None);
        assert_eq!(rule.validate(&Value::from("2024-03-01"), "d"), None);
        assert_eq!(
            rule.validate(&Value::from("2024-02-29"), "d"),
            Some("field d must be after 2024-02-29".to_string())
        );

        let rule = DateBefore::resolved_on("tomorrow", DATE_FORMAT, today).unwrap();
        assert_eq!(rule.target_date(), ymd(2024, 3, 2));
    }

    #[test]
    fn test_date_after_yesterday_accepts_today() {
        let rule = DateAfter::new("yesterday").unwrap();
        let today = Local::now().date_naive();
        assert_eq!(rule.validate(&Value::from(today), "d"), None);
    }

    #[test]
    fn test_date_equals() {
        let rule = DateEquals::new(ymd(2024, 12, 12)).unwrap();
        assert_eq!(rule.validate(&Value::from("2024-12-12"), "d"), None);
        assert_eq!(
            rule.validate(&Value::from("2024-12-13"), "d"),
            Some("field d must be equal to 2024-12-12".to_string())
        );

        let rule = DateEquals::new(ymd(2024, 12, 12).and_hms_opt(23, 59, 0).unwrap()).unwrap();
        assert_eq!(rule.target_date(), ymd(2024, 12, 12));
    }

    #[test]
    fn test_date_before_with_format() {
        let rule = DateBefore::with_format("25/12/2024", "%d/%m/%Y").unwrap();
        assert_eq!(rule.validate(&Value::from("24/12/2024"), "d"), None);
        assert_eq!(
            rule.validate(&Value::from("25/12/2024"), "d"),
            Some("field d must be before 2024-12-25".to_string())
        );
        assert_eq!(
            rule.validate(&Value::from("2024-12-24"), "d"),
            Some("Invalid date format: 2024-12-24".to_string())
        );
    }

    #[test]
    fn test_invalid_target() {
        assert!(matches!(
            DateEquals::new("someday"),
            Err(RuleError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_custom_invalid_message() {
        let rule = DateAfter::new(ymd(2000, 1, 1))
            .unwrap()
            .with_invalid_message("{field_name} wants {date_format}");
        assert_eq!(
            rule.validate(&Value::from(true), "born"),
            Some("born wants %Y-%m-%d".to_string())
        );
    }
}
