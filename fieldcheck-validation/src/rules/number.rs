// Numeric rules
//
// Every rule here reads the value through `Value::as_number`, so integers,
// floats and numeric strings are all accepted. A value that cannot be read
// as a number fails with the rule's message plus `NOT_A_NUMBER_SUFFIX`.
// Null passes.

use crate::{MessageParams, Rule, RuleError, Value, render};

/// Appended to a numeric rule's message when the value is not a number.
pub const NOT_A_NUMBER_SUFFIX: &str = " and must be a number";

fn not_a_number(template: &str, params: &MessageParams) -> String {
    let mut message = render(template, params);
    message.push_str(NOT_A_NUMBER_SUFFIX);
    message
}

/// Value must be numeric.
///
/// Placeholders: `field_name`, `value`.
#[derive(Debug, Clone)]
pub struct Numeric {
    message: String,
}

impl Numeric {
    pub const DEFAULT_MESSAGE: &'static str = "{field_name} only accept numbers";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Default for Numeric {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Numeric {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        if value.is_null() || value.as_number().is_some() {
            return None;
        }
        let params = MessageParams::new(field_name).with("value", value);
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "numeric"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value"]
    }
}

const THRESHOLD_PLACEHOLDERS: &[&str] = &["field_name", "value", "threshold"];

macro_rules! threshold_rule {
    (
        $(#[$doc:meta])*
        $rule:ident, $alias:ident, $name:literal, $default:literal,
        |$n:ident, $t:ident| $passes:expr
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $rule {
            threshold: f64,
            message: String,
        }

        #[doc = concat!("Short alias for [`", stringify!($rule), "`].")]
        pub type $alias = $rule;

        impl $rule {
            pub const DEFAULT_MESSAGE: &'static str = $default;

            /// # Panics
            ///
            /// Panics if the threshold is NaN or infinite. Use
            /// [`try_new`](Self::try_new) for thresholds read at runtime.
            pub fn new(threshold: impl Into<f64>) -> Self {
                match Self::try_new(threshold) {
                    Ok(rule) => rule,
                    Err(err) => panic!("{}: {err}", $name),
                }
            }

            pub fn try_new(threshold: impl Into<f64>) -> Result<Self, RuleError> {
                Ok(Self {
                    threshold: RuleError::check_finite(threshold.into())?,
                    message: Self::DEFAULT_MESSAGE.to_string(),
                })
            }

            pub fn threshold(&self) -> f64 {
                self.threshold
            }
        }

        impl Rule for $rule {
            fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
                if value.is_null() {
                    return None;
                }
                let number = value.as_number();
                if let Some($n) = number {
                    let $t = self.threshold;
                    if $passes {
                        return None;
                    }
                }
                let params = MessageParams::new(field_name)
                    .with("value", value)
                    .with("threshold", self.threshold);
                Some(match number {
                    Some(_) => render(&self.message, &params),
                    None => not_a_number(&self.message, &params),
                })
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn placeholders(&self) -> &'static [&'static str] {
                THRESHOLD_PLACEHOLDERS
            }
        }
    };
}

threshold_rule!(
    /// Value must be strictly greater than the threshold.
    ///
    /// Placeholders: `field_name`, `value`, `threshold`.
    GreaterThan, Gt, "greater_than",
    "{field_name} should be greater then {threshold}",
    |n, t| n > t
);

threshold_rule!(
    /// Value must be greater than or equal to the threshold.
    ///
    /// Placeholders: `field_name`, `value`, `threshold`.
    GreaterThanOrEqual, Gte, "greater_than_or_equal",
    "{field_name} should be greater then or equal {threshold}",
    |n, t| n >= t
);

threshold_rule!(
    /// Value must be strictly less than the threshold.
    ///
    /// Placeholders: `field_name`, `value`, `threshold`.
    LessThan, Lt, "less_than",
    "{field_name} should be less then {threshold}",
    |n, t| n < t
);

threshold_rule!(
    /// Value must be less than or equal to the threshold.
    ///
    /// Placeholders: `field_name`, `value`, `threshold`.
    LessThanOrEqual, Lte, "less_than_or_equal",
    "{field_name} should be less then or equal {threshold}",
    |n, t| n <= t
);

/// Value must lie in `min..=max`.
///
/// Placeholders: `field_name`, `value`, `min`, `max`.
#[derive(Debug, Clone)]
pub struct NumberRange {
    min: f64,
    max: f64,
    message: String,
}

impl NumberRange {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} must be between {min} and {max}";

    pub fn new(min: impl Into<f64>, max: impl Into<f64>) -> Result<Self, RuleError> {
        let min = RuleError::check_finite(min.into())?;
        let max = RuleError::check_finite(max.into())?;
        RuleError::check_range(min, max)?;
        Ok(Self {
            min,
            max,
            message: Self::DEFAULT_MESSAGE.to_string(),
        })
    }
}

impl Rule for NumberRange {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        if value.is_null() {
            return None;
        }
        let number = value.as_number();
        if number.is_some_and(|n| n >= self.min && n <= self.max) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", value)
            .with("min", self.min)
            .with("max", self.max);
        Some(match number {
            Some(_) => render(&self.message, &params),
            None => not_a_number(&self.message, &params),
        })
    }

    fn name(&self) -> &'static str {
        "number_range"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "min", "max"]
    }
}

/// Digits after the decimal point of a numeric text, exponent excluded.
fn decimal_places(text: &str) -> usize {
    let mantissa = text.trim().split(['e', 'E']).next().unwrap_or_default();
    mantissa
        .split_once('.')
        .map(|(_, fraction)| fraction.bytes().filter(u8::is_ascii_digit).count())
        .unwrap_or(0)
}

/// Number of decimal places must lie in `min..=max`. Integers have zero
/// decimal places.
///
/// Placeholders: `field_name`, `value`, `min`, `max`.
#[derive(Debug, Clone)]
pub struct DecimalRange {
    min: usize,
    max: usize,
    message: String,
}

impl DecimalRange {
    pub const DEFAULT_MESSAGE: &'static str =
        "The decimal {field_name} should range from {min} to {max}";

    pub fn new(min: usize, max: usize) -> Result<Self, RuleError> {
        RuleError::check_range(min, max)?;
        Ok(Self {
            min,
            max,
            message: Self::DEFAULT_MESSAGE.to_string(),
        })
    }
}

impl Rule for DecimalRange {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        let numeric = value.as_number().is_some();
        if numeric {
            let places = decimal_places(&text);
            if places >= self.min && places <= self.max {
                return None;
            }
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("min", self.min)
            .with("max", self.max);
        Some(if numeric {
            render(&self.message, &params)
        } else {
            not_a_number(&self.message, &params)
        })
    }

    fn name(&self) -> &'static str {
        "decimal_range"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "min", "max"]
    }
}

/// Count of digit characters must lie in `min..=max`.
///
/// Only ASCII digits of the mantissa are counted by default, so `"1e5"` has
/// one digit. A leading sign and the decimal point can be counted as well
/// with [`count_sign`](Self::count_sign) and [`count_point`](Self::count_point).
///
/// Placeholders: `field_name`, `value`, `min`, `max`, `digits`.
#[derive(Debug, Clone)]
pub struct DigitsBetween {
    min: usize,
    max: usize,
    count_sign: bool,
    count_point: bool,
    message: String,
}

impl DigitsBetween {
    pub const DEFAULT_MESSAGE: &'static str =
        "field {field_name} must have a length between {min} and {max}";

    pub fn new(min: usize, max: usize) -> Result<Self, RuleError> {
        RuleError::check_range(min, max)?;
        Ok(Self {
            min,
            max,
            count_sign: false,
            count_point: false,
            message: Self::DEFAULT_MESSAGE.to_string(),
        })
    }

    /// Count a leading `-` or `+`.
    pub fn count_sign(mut self, yes: bool) -> Self {
        self.count_sign = yes;
        self
    }

    /// Count the decimal point.
    pub fn count_point(mut self, yes: bool) -> Self {
        self.count_point = yes;
        self
    }

    fn count(&self, text: &str) -> usize {
        let mantissa = text.trim().split(['e', 'E']).next().unwrap_or_default();
        let digits = mantissa.bytes().filter(u8::is_ascii_digit).count();
        let sign = usize::from(self.count_sign && mantissa.starts_with(['-', '+']));
        let point = if self.count_point { mantissa.matches('.').count() } else { 0 };
        digits + sign + point
    }
}

impl Rule for DigitsBetween {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        let numeric = value.as_number().is_some();
        let digits = self.count(&text);
        if numeric && digits >= self.min && digits <= self.max {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("min", self.min)
            .with("max", self.max)
            .with("digits", digits);
        Some(if numeric {
            render(&self.message, &params)
        } else {
            not_a_number(&self.message, &params)
        })
    }

    fn name(&self) -> &'static str {
        "digits_between"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "min", "max", "digits"]
    }
}

message_template!(
    Numeric,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    NumberRange,
    DecimalRange,
    DigitsBetween,
);
