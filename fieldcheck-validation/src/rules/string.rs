// String rules

use crate::{DisplayList, MessageParams, Rule, RuleError, Value, render};
use std::fmt;

/// One or more strings a value is compared against.
///
/// Built from a single value or from a list; a single candidate displays as
/// itself, a list as `[a, b]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates(Vec<String>);

impl Candidates {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn any(&self, mut predicate: impl FnMut(&str) -> bool) -> bool {
        self.0.iter().any(|candidate| predicate(candidate.as_str()))
    }
}

impl fmt::Display for Candidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => f.write_str(single),
            many => write!(f, "{}", DisplayList(many)),
        }
    }
}

impl From<&str> for Candidates {
    fn from(value: &str) -> Self {
        Candidates(vec![value.to_string()])
    }
}

impl From<String> for Candidates {
    fn from(value: String) -> Self {
        Candidates(vec![value])
    }
}

impl<T: ToString> From<Vec<T>> for Candidates {
    fn from(values: Vec<T>) -> Self {
        Candidates(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString> From<&[T]> for Candidates {
    fn from(values: &[T]) -> Self {
        Candidates(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<[T; N]> for Candidates {
    fn from(values: [T; N]) -> Self {
        Candidates(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: ToString, const N: usize> From<&[T; N]> for Candidates {
    fn from(values: &[T; N]) -> Self {
        Candidates(values.iter().map(ToString::to_string).collect())
    }
}

const LENGTH_PLACEHOLDERS: &[&str] = &["field_name", "value", "min", "max"];

/// Character count must lie in `min..=max`. Null passes.
///
/// Placeholders: `field_name`, `value`, `min`, `max`.
#[derive(Debug, Clone)]
pub struct Length {
    min: usize,
    max: usize,
    message: String,
}

impl Length {
    pub const DEFAULT_MESSAGE: &'static str =
        "field {field_name} length must be between {min} and {max}";

    pub fn new(min: usize, max: usize) -> Result<Self, RuleError> {
        RuleError::check_range(min, max)?;
        Ok(Self {
            min,
            max,
            message: Self::DEFAULT_MESSAGE.to_string(),
        })
    }
}

impl Rule for Length {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        let len = text.chars().count();
        if len < self.min || len > self.max {
            let params = MessageParams::new(field_name)
                .with("value", &text)
                .with("min", self.min)
                .with("max", self.max);
            return Some(render(&self.message, &params));
        }
        None
    }

    fn name(&self) -> &'static str {
        "length"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        LENGTH_PLACEHOLDERS
    }
}

/// At least `min` characters. Null passes.
///
/// Placeholders: `field_name`, `value`, `min`.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: String,
}

impl MinLength {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} must have a minimum length of {min}";

    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Rule for MinLength {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if text.chars().count() < self.min {
            let params = MessageParams::new(field_name)
                .with("value", &text)
                .with("min", self.min);
            return Some(render(&self.message, &params));
        }
        None
    }

    fn name(&self) -> &'static str {
        "min_length"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "min"]
    }
}

/// At most `max` characters. Null passes.
///
/// Placeholders: `field_name`, `value`, `max`.
#[derive(Debug, Clone)]
pub struct MaxLength {
    max: usize,
    message: String,
}

impl MaxLength {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} must have a maximum length of {max}";

    pub fn new(max: usize) -> Self {
        Self {
            max,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Rule for MaxLength {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if text.chars().count() > self.max {
            let params = MessageParams::new(field_name)
                .with("value", &text)
                .with("max", self.max);
            return Some(render(&self.message, &params));
        }
        None
    }

    fn name(&self) -> &'static str {
        "max_length"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "max"]
    }
}

/// Rejects null, empty and whitespace-only values.
///
/// Placeholders: `field_name`.
#[derive(Debug, Clone)]
pub struct NotBlank {
    message: String,
}

impl NotBlank {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} must not be blank";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Default for NotBlank {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NotBlank {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let blank = value
            .as_text()
            .map(|text| text.trim().is_empty())
            .unwrap_or(true);
        blank.then(|| render(&self.message, &MessageParams::new(field_name)))
    }

    fn name(&self) -> &'static str {
        "not_blank"
    }
}

/// Rejects null only. Empty strings pass.
///
/// Placeholders: `field_name`.
#[derive(Debug, Clone)]
pub struct NotNull {
    message: String,
}

impl NotNull {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} is required";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Default for NotNull {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for NotNull {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        value
            .is_null()
            .then(|| render(&self.message, &MessageParams::new(field_name)))
    }

    fn name(&self) -> &'static str {
        "not_null"
    }
}

const LIST_PLACEHOLDERS: &[&str] = &["field_name", "value", "data"];

/// Textual value must be one of `data`. Null passes.
///
/// Placeholders: `field_name`, `value`, `data`.
#[derive(Debug, Clone)]
pub struct InList {
    data: Vec<String>,
    message: String,
}

impl InList {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} must be in {data}";

    pub fn new<I, T>(data: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self {
            data: data.into_iter().map(|item| item.to_string()).collect(),
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Rule for InList {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if self.data.iter().any(|item| *item == *text) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("data", DisplayList(&self.data));
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "in_list"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        LIST_PLACEHOLDERS
    }
}

/// Textual value must not be one of `data`. Null passes.
///
/// Placeholders: `field_name`, `value`, `data`.
#[derive(Debug, Clone)]
pub struct NotInList {
    data: Vec<String>,
    message: String,
}

impl NotInList {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} must not be in {data}";

    pub fn new<I, T>(data: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self {
            data: data.into_iter().map(|item| item.to_string()).collect(),
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Rule for NotInList {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if !self.data.iter().any(|item| *item == *text) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("data", DisplayList(&self.data));
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "not_in_list"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        LIST_PLACEHOLDERS
    }
}

/// Generates a prefix/suffix rule. `$matches` decides whether one candidate
/// matches the text; `$fail_on_match` flips the rule into its negative form.
macro_rules! affix_rule {
    (
        $(#[$doc:meta])*
        $rule:ident, $name:literal, $param:literal, $default:literal,
        $matches:expr, fail_on_match = $fail_on_match:literal
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $rule {
            candidates: Candidates,
            message: String,
        }

        impl $rule {
            pub const DEFAULT_MESSAGE: &'static str = $default;

            pub fn new(candidates: impl Into<Candidates>) -> Self {
                Self {
                    candidates: candidates.into(),
                    message: Self::DEFAULT_MESSAGE.to_string(),
                }
            }

            pub fn candidates(&self) -> &Candidates {
                &self.candidates
            }
        }

        impl Rule for $rule {
            fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
                let text = value.as_text()?;
                let matched = self.candidates.any(|candidate| $matches(&*text, candidate));
                if matched != $fail_on_match {
                    return None;
                }
                let params = MessageParams::new(field_name)
                    .with("value", &text)
                    .with($param, &self.candidates);
                Some(render(&self.message, &params))
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn placeholders(&self) -> &'static [&'static str] {
                &["field_name", "value", $param]
            }
        }
    };
}

affix_rule!(
    /// Passes when the text starts with any candidate. Null passes.
    ///
    /// Placeholders: `field_name`, `value`, `prefix`.
    StartsWith, "starts_with", "prefix",
    "field {field_name} must be start with {prefix}",
    str::starts_with, fail_on_match = false
);

affix_rule!(
    /// Fails when the text starts with any candidate. Null passes.
    ///
    /// Placeholders: `field_name`, `value`, `prefix`.
    DoesntStartWith, "doesnt_start_with", "prefix",
    "field {field_name} must not be start with {prefix}",
    str::starts_with, fail_on_match = true
);

affix_rule!(
    /// Passes when the text ends with any candidate. Null passes.
    ///
    /// Placeholders: `field_name`, `value`, `suffix`.
    EndsWith, "ends_with", "suffix",
    "field {field_name} must be end with {suffix}",
    str::ends_with, fail_on_match = false
);

affix_rule!(
    /// Fails when the text ends with any candidate. Null passes.
    ///
    /// Placeholders: `field_name`, `value`, `suffix`.
    DoesntEndWith, "doesnt_end_with", "suffix",
    "field {field_name} must not be end with {suffix}",
    str::ends_with, fail_on_match = true
);

const EQUALITY_PLACEHOLDERS: &[&str] = &["field_name", "value", "another_value"];

/// Textual value must equal `another_value`'s text. Null passes.
///
/// Placeholders: `field_name`, `value`, `another_value`.
#[derive(Debug, Clone)]
pub struct Equals {
    another_value: Value,
    message: String,
}

impl Equals {
    pub const DEFAULT_MESSAGE: &'static str = "{field_name} must be equal to {another_value}";

    pub fn new(another_value: impl Into<Value>) -> Self {
        Self {
            another_value: another_value.into(),
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Rule for Equals {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if self.another_value.as_text().as_deref() == Some(&*text) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("another_value", &self.another_value);
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "equals"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        EQUALITY_PLACEHOLDERS
    }
}

/// Textual value must differ from `another_value`'s text. Null passes.
///
/// Placeholders: `field_name`, `value`, `another_value`.
#[derive(Debug, Clone)]
pub struct NotEquals {
    another_value: Value,
    message: String,
}

impl NotEquals {
    pub const DEFAULT_MESSAGE: &'static str = "{field_name} must be not same with {another_value}";

    pub fn new(another_value: impl Into<Value>) -> Self {
        Self {
            another_value: another_value.into(),
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Rule for NotEquals {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if self.another_value.as_text().as_deref() != Some(&*text) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("another_value", &self.another_value);
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "not_equals"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        EQUALITY_PLACEHOLDERS
    }
}

message_template!(
    Length,
    MinLength,
    MaxLength,
    NotBlank,
    NotNull,
    InList,
    NotInList,
    StartsWith,
    DoesntStartWith,
    EndsWith,
    DoesntEndWith,
    Equals,
    NotEquals,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn check(rule: &dyn Rule, value: impl Into<Value>) -> Option<String> {
        rule.validate(&value.into(), "data")
    }

    #[test]
    fn test_length() {
        let rule = Length::new(0, 4).unwrap();
        assert_eq!(check(&rule, "hell"), None);
        assert_eq!(
            check(&rule, "hello"),
            Some("field data length must be between 0 and 4".to_string())
        );
        assert_eq!(check(&rule, Value::Null), None);
        assert!(Length::new(5, 1).is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        let rule = Length::new(1, 3).unwrap();
        assert_eq!(check(&rule, "héé"), None);
    }

    #[test]
    fn test_min_and_max_length() {
        assert_eq!(
            check(&MinLength::new(10), "hello"),
            Some("field data must have a minimum length of 10".to_string())
        );
        assert_eq!(check(&MinLength::new(5), Value::Null), None);
        assert_eq!(
            check(&MaxLength::new(4), "hello"),
            Some("field data must have a maximum length of 4".to_string())
        );
        assert_eq!(check(&MaxLength::new(5), 12345), None);
    }

    #[test]
    fn test_not_blank() {
        let rule = NotBlank::new();
        let expected = Some("field data must not be blank".to_string());
        assert_eq!(check(&rule, ""), expected);
        assert_eq!(check(&rule, "    "), expected);
        assert_eq!(check(&rule, Value::Null), expected);
        assert_eq!(check(&rule, "x"), None);
        assert_eq!(check(&rule, 0), None);
    }

    #[test]
    fn test_not_null() {
        let rule = NotNull::new();
        assert_eq!(check(&rule, ""), None);
        assert_eq!(
            check(&rule, Value::Null),
            Some("field data is required".to_string())
        );
    }

    #[test]
    fn test_in_list() {
        let rule = InList::new(["hello", "world"]);
        assert_eq!(check(&rule, "hello"), None);
        assert_eq!(
            check(&rule, "nope"),
            Some("field data must be in [hello, world]".to_string())
        );
        assert_eq!(check(&InList::new([1, 2, 3]), 2), None);
        assert_eq!(check(&rule, Value::Null), None);
    }

    #[test]
    fn test_not_in_list() {
        let rule = NotInList::new(vec!["hello", "world"]);
        assert_eq!(check(&rule, "other"), None);
        assert_eq!(
            check(&rule, "world"),
            Some("field data must not be in [hello, world]".to_string())
        );
    }

    #[test]
    fn test_starts_with() {
        assert_eq!(check(&StartsWith::new("world"), "world peace"), None);
        assert_eq!(
            check(&StartsWith::new("world"), "hello world"),
            Some("field data must be start with world".to_string())
        );
        let rule = StartsWith::new(["world", "test"]);
        assert_eq!(check(&rule, "testing"), None);
        assert_eq!(
            check(&rule, "hello"),
            Some("field data must be start with [world, test]".to_string())
        );
        assert_eq!(check(&StartsWith::new([1, 2]), 123), None);
    }

    #[test]
    fn test_doesnt_start_with() {
        let rule = DoesntStartWith::new(["hello", "test"]);
        assert_eq!(check(&rule, "world"), None);
        assert_eq!(
            check(&rule, "testing"),
            Some("field data must not be start with [hello, test]".to_string())
        );
    }

    #[test]
    fn test_ends_with() {
        let rule = EndsWith::new(vec!["worl", "test"]);
        assert_eq!(check(&rule, "a test"), None);
        assert_eq!(
            check(&rule, "hello world"),
            Some("field data must be end with [worl, test]".to_string())
        );
        assert_eq!(
            check(&EndsWith::new("hello"), "world"),
            Some("field data must be end with hello".to_string())
        );
    }

    #[test]
    fn test_doesnt_end_with() {
        let rule = DoesntEndWith::new(["world", "test"]);
        assert_eq!(check(&rule, "world hello"), None);
        assert_eq!(
            check(&rule, "hello world"),
            Some("field data must not be end with [world, test]".to_string())
        );
    }

    #[test]
    fn test_empty_candidates() {
        let empty: Vec<String> = Vec::new();
        assert!(check(&StartsWith::new(empty.clone()), "abc").is_some());
        assert_eq!(check(&DoesntStartWith::new(empty), "abc"), None);
    }

    #[test]
    fn test_equals() {
        assert_eq!(check(&Equals::new("secret"), "secret"), None);
        assert_eq!(check(&Equals::new(5), "5"), None);
        assert_eq!(
            check(&Equals::new("secret"), "guess"),
            Some("data must be equal to secret".to_string())
        );
        assert_eq!(check(&NotEquals::new("admin"), "guest"), None);
        assert_eq!(
            check(&NotEquals::new("admin"), "admin"),
            Some("data must be not same with admin".to_string())
        );
    }

    #[test]
    fn test_custom_message() {
        let rule = MinLength::new(3).with_message("{field_name} too short ({value}, min {min}){unused}");
        assert_eq!(check(&rule, "ab"), Some("data too short (ab, min 3)".to_string()));
        assert_eq!(rule.message(), "{field_name} too short ({value}, min {min}){unused}");
    }
}
