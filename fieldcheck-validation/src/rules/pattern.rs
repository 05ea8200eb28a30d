// Pattern rules

use crate::{MessageParams, Rule, RuleError, Value, render};
use once_cell::sync::Lazy;
use regex::Regex;

/// Value text must match the pattern.
///
/// Matching is unanchored; use `^` and `$` to match the whole value.
///
/// Placeholders: `field_name`, `value`, `pattern`.
#[derive(Debug, Clone)]
pub struct MatchRegex {
    regex: Regex,
    message: String,
}

impl MatchRegex {
    pub const DEFAULT_MESSAGE: &'static str =
        "{field_name} field must match with this pattern {pattern}";

    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for MatchRegex {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if self.regex.is_match(&text) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("pattern", self.regex.as_str());
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "match_regex"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "pattern"]
    }
}

/// Value text must not match the pattern.
///
/// Placeholders: `field_name`, `value`, `pattern`.
#[derive(Debug, Clone)]
pub struct NotMatchRegex {
    regex: Regex,
    message: String,
}

impl NotMatchRegex {
    pub const DEFAULT_MESSAGE: &'static str =
        "{field_name} field must not match with this pattern {pattern}";

    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for NotMatchRegex {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if !self.regex.is_match(&text) {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("value", &text)
            .with("pattern", self.regex.as_str());
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "not_match_regex"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value", "pattern"]
    }
}

/// Password strength check.
///
/// Every character class is required by default, with a minimum length of
/// 8 characters. `{requirements}` lists every configured requirement and
/// `{unmet}` only the failed ones.
///
/// ```
/// use fieldcheck_validation::{Password, Rule, Value};
///
/// let rule = Password::new().symbols(false).min_length(6);
/// assert_eq!(rule.validate(&Value::from("Secret1"), "pw"), None);
/// assert_eq!(
///     rule.validate(&Value::from("secret1"), "pw"),
///     Some("pw field must include at least one uppercase letter".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Password {
    uppercase: bool,
    lowercase: bool,
    digits: bool,
    symbols: bool,
    symbol_set: String,
    min_length: usize,
    message: String,
}

impl Password {
    pub const DEFAULT_MESSAGE: &'static str = "{field_name} field must include at least {unmet}";
    pub const DEFAULT_SYMBOLS: &'static str = "#?!@_$%^&*-";
    pub const DEFAULT_MIN_LENGTH: usize = 8;

    pub fn new() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
            symbol_set: Self::DEFAULT_SYMBOLS.to_string(),
            min_length: Self::DEFAULT_MIN_LENGTH,
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn uppercase(mut self, required: bool) -> Self {
        self.uppercase = required;
        self
    }

    pub fn lowercase(mut self, required: bool) -> Self {
        self.lowercase = required;
        self
    }

    pub fn digits(mut self, required: bool) -> Self {
        self.digits = required;
        self
    }

    pub fn symbols(mut self, required: bool) -> Self {
        self.symbols = required;
        self
    }

    /// Characters that count as symbols.
    pub fn symbol_set(mut self, symbols: impl Into<String>) -> Self {
        self.symbol_set = symbols.into();
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }

    fn requirements(&self, password: Option<&str>) -> Vec<String> {
        let has = |check: &dyn Fn(char) -> bool| password.is_some_and(|p| p.chars().any(check));
        let mut out = Vec::new();

        if self.uppercase && !has(&|c: char| c.is_ascii_uppercase()) {
            out.push("one uppercase letter".to_string());
        }
        if self.lowercase && !has(&|c: char| c.is_ascii_lowercase()) {
            out.push("one lowercase letter".to_string());
        }
        if self.digits && !has(&|c: char| c.is_ascii_digit()) {
            out.push("one digit".to_string());
        }
        if self.symbols && !has(&|c: char| self.symbol_set.contains(c)) {
            out.push("one symbol".to_string());
        }
        if self.min_length > 0 && password.is_none_or(|p| p.chars().count() < self.min_length) {
            out.push(format!("{} characters", self.min_length));
        }
        out
    }

    /// Equivalent lookahead pattern, for clients whose regex engine
    /// supports lookaround.
    pub fn pattern(&self) -> String {
        let mut pattern = String::from("^");
        if self.uppercase {
            pattern.push_str("(?=.*?[A-Z])");
        }
        if self.lowercase {
            pattern.push_str("(?=.*?[a-z])");
        }
        if self.digits {
            pattern.push_str("(?=.*?[0-9])");
        }
        if self.symbols {
            pattern.push_str(&format!("(?=.*?[{}])", regex::escape(&self.symbol_set)));
        }
        pattern.push_str(&format!(".{{{},}}$", self.min_length));
        pattern
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Password {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        let unmet = self.requirements(Some(&text));
        if unmet.is_empty() {
            return None;
        }
        let params = MessageParams::new(field_name)
            .with("requirements", self.requirements(None).join(", "))
            .with("unmet", unmet.join(", "))
            .with("min_length", self.min_length)
            .with("symbols", &self.symbol_set);
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "password"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "requirements", "unmet", "min_length", "symbols"]
    }
}

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Value must look like `local@domain.tld`.
///
/// Placeholders: `field_name`, `value`.
#[derive(Debug, Clone)]
pub struct Email {
    message: String,
}

impl Email {
    pub const DEFAULT_MESSAGE: &'static str = "field {field_name} is not a valid email address";

    pub fn new() -> Self {
        Self {
            message: Self::DEFAULT_MESSAGE.to_string(),
        }
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Email {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        let text = value.as_text()?;
        if EMAIL_REGEX.is_match(&text) {
            return None;
        }
        let params = MessageParams::new(field_name).with("value", &text);
        Some(render(&self.message, &params))
    }

    fn name(&self) -> &'static str {
        "email"
    }

    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name", "value"]
    }
}

message_template!(MatchRegex, NotMatchRegex, Password, Email);
