// Declarative schema definitions

use crate::{ConfigError, Result};
use fieldcheck_log::warn;
use fieldcheck_validation::{
    AllowedFile, Candidates, DATE_FORMAT, DateAfter, DateBefore, DateEquals, DecimalRange,
    DigitsBetween, DoesntEndWith, DoesntStartWith, Email, EndsWith, Equals, GreaterThan,
    GreaterThanOrEqual, InList, IsDate, Length, LessThan, LessThanOrEqual, MatchRegex, MaxLength,
    MinLength, NotBlank, NotEquals, NotInList, NotMatchRegex, NotNull, NumberRange, Numeric,
    Password, RuleError, Schema, SharedRule, StartsWith, Value, placeholders,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const LOG_TARGET: &str = "fieldcheck::config";

/// A whole schema: fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// One field and its rules, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// One rule plus an optional message template override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    #[serde(flatten)]
    pub kind: RuleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A single text or a list of texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    One(String),
    Many(Vec<String>),
}

impl From<TextOrList> for Candidates {
    fn from(value: TextOrList) -> Self {
        match value {
            TextOrList::One(text) => Candidates::from(text),
            TextOrList::Many(list) => Candidates::from(list),
        }
    }
}

/// Built-in rules by name, with their parameters.
///
/// Names match [`Rule::name`](fieldcheck_validation::Rule::name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleKind {
    Length {
        min: usize,
        max: usize,
    },
    MinLength {
        min: usize,
    },
    MaxLength {
        max: usize,
    },
    NotBlank,
    NotNull,
    InList {
        data: Vec<serde_json::Value>,
    },
    NotInList {
        data: Vec<serde_json::Value>,
    },
    StartsWith {
        prefix: TextOrList,
    },
    DoesntStartWith {
        prefix: TextOrList,
    },
    EndsWith {
        suffix: TextOrList,
    },
    DoesntEndWith {
        suffix: TextOrList,
    },
    Equals {
        another_value: serde_json::Value,
    },
    NotEquals {
        another_value: serde_json::Value,
    },
    Numeric,
    GreaterThan {
        threshold: f64,
    },
    GreaterThanOrEqual {
        threshold: f64,
    },
    LessThan {
        threshold: f64,
    },
    LessThanOrEqual {
        threshold: f64,
    },
    NumberRange {
        min: f64,
        max: f64,
    },
    DecimalRange {
        min: usize,
        max: usize,
    },
    DigitsBetween {
        min: usize,
        max: usize,
        #[serde(default)]
        count_sign: bool,
        #[serde(default)]
        count_point: bool,
    },
    IsDate {
        #[serde(default)]
        date_format: Option<String>,
    },
    DateEquals {
        target_date: String,
        #[serde(default)]
        date_format: Option<String>,
        #[serde(default)]
        invalid_message: Option<String>,
    },
    DateAfter {
        target_date: String,
        #[serde(default)]
        date_format: Option<String>,
        #[serde(default)]
        invalid_message: Option<String>,
    },
    DateBefore {
        target_date: String,
        #[serde(default)]
        date_format: Option<String>,
        #[serde(default)]
        invalid_message: Option<String>,
    },
    MatchRegex {
        pattern: String,
    },
    NotMatchRegex {
        pattern: String,
    },
    Password {
        #[serde(default)]
        uppercase: Option<bool>,
        #[serde(default)]
        lowercase: Option<bool>,
        #[serde(default)]
        digits: Option<bool>,
        #[serde(default)]
        symbols: Option<bool>,
        #[serde(default)]
        symbol_set: Option<String>,
        #[serde(default)]
        min_length: Option<usize>,
    },
    AllowedFile {
        #[serde(default)]
        allowed_extensions: Option<Vec<String>>,
    },
    Email,
}

impl RuleKind {
    /// Rule name as written in definitions.
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Length { .. } => "length",
            RuleKind::MinLength { .. } => "min_length",
            RuleKind::MaxLength { .. } => "max_length",
            RuleKind::NotBlank => "not_blank",
            RuleKind::NotNull => "not_null",
            RuleKind::InList { .. } => "in_list",
            RuleKind::NotInList { .. } => "not_in_list",
            RuleKind::StartsWith { .. } => "starts_with",
            RuleKind::DoesntStartWith { .. } => "doesnt_start_with",
            RuleKind::EndsWith { .. } => "ends_with",
            RuleKind::DoesntEndWith { .. } => "doesnt_end_with",
            RuleKind::Equals { .. } => "equals",
            RuleKind::NotEquals { .. } => "not_equals",
            RuleKind::Numeric => "numeric",
            RuleKind::GreaterThan { .. } => "greater_than",
            RuleKind::GreaterThanOrEqual { .. } => "greater_than_or_equal",
            RuleKind::LessThan { .. } => "less_than",
            RuleKind::LessThanOrEqual { .. } => "less_than_or_equal",
            RuleKind::NumberRange { .. } => "number_range",
            RuleKind::DecimalRange { .. } => "decimal_range",
            RuleKind::DigitsBetween { .. } => "digits_between",
            RuleKind::IsDate { .. } => "is_date",
            RuleKind::DateEquals { .. } => "date_equals",
            RuleKind::DateAfter { .. } => "date_after",
            RuleKind::DateBefore { .. } => "date_before",
            RuleKind::MatchRegex { .. } => "match_regex",
            RuleKind::NotMatchRegex { .. } => "not_match_regex",
            RuleKind::Password { .. } => "password",
            RuleKind::AllowedFile { .. } => "allowed_file",
            RuleKind::Email => "email",
        }
    }
}

fn list_text(data: &[serde_json::Value]) -> Vec<String> {
    data.iter()
        .map(|item| Value::from(item.clone()).to_string())
        .collect()
}

fn date_format(format: &Option<String>) -> &str {
    format.as_deref().unwrap_or(DATE_FORMAT)
}

/// Applies the optional message override and shares the rule.
macro_rules! finish {
    ($rule:expr, $message:expr) => {{
        let rule = $rule;
        let rule = match $message {
            Some(template) => rule.with_message(template.clone()),
            None => rule,
        };
        Arc::new(rule) as SharedRule
    }};
}

/// Builds a date comparison rule with its optional templates.
macro_rules! finish_date {
    ($ty:ident, $target:expr, $format:expr, $invalid:expr, $message:expr) => {{
        let rule = $ty::with_format($target.as_str(), date_format($format))?;
        let rule = match $invalid {
            Some(template) => rule.with_invalid_message(template.clone()),
            None => rule,
        };
        finish!(rule, $message)
    }};
}

impl RuleDefinition {
    pub fn new(kind: RuleKind) -> Self {
        Self { kind, message: None }
    }

    pub fn with_message(mut self, template: impl Into<String>) -> Self {
        self.message = Some(template.into());
        self
    }

    /// Build the rule. Relative date targets resolve against today's local
    /// date at this point.
    pub fn build(&self) -> std::result::Result<SharedRule, RuleError> {
        let message = self.message.as_ref();

        let rule = match &self.kind {
            RuleKind::Length { min, max } => finish!(Length::new(*min, *max)?, message),
            RuleKind::MinLength { min } => finish!(MinLength::new(*min), message),
            RuleKind::MaxLength { max } => finish!(MaxLength::new(*max), message),
            RuleKind::NotBlank => finish!(NotBlank::new(), message),
            RuleKind::NotNull => finish!(NotNull::new(), message),
            RuleKind::InList { data } => finish!(InList::new(list_text(data)), message),
            RuleKind::NotInList { data } => finish!(NotInList::new(list_text(data)), message),
            RuleKind::StartsWith { prefix } => finish!(StartsWith::new(prefix.clone()), message),
            RuleKind::DoesntStartWith { prefix } => {
                finish!(DoesntStartWith::new(prefix.clone()), message)
            }
            RuleKind::EndsWith { suffix } => finish!(EndsWith::new(suffix.clone()), message),
            RuleKind::DoesntEndWith { suffix } => {
                finish!(DoesntEndWith::new(suffix.clone()), message)
            }
            RuleKind::Equals { another_value } => {
                finish!(Equals::new(another_value.clone()), message)
            }
            RuleKind::NotEquals { another_value } => {
                finish!(NotEquals::new(another_value.clone()), message)
            }
            RuleKind::Numeric => finish!(Numeric::new(), message),
            RuleKind::GreaterThan { threshold } => {
                finish!(GreaterThan::try_new(*threshold)?, message)
            }
            RuleKind::GreaterThanOrEqual { threshold } => {
                finish!(GreaterThanOrEqual::try_new(*threshold)?, message)
            }
            RuleKind::LessThan { threshold } => finish!(LessThan::try_new(*threshold)?, message),
            RuleKind::LessThanOrEqual { threshold } => {
                finish!(LessThanOrEqual::try_new(*threshold)?, message)
            }
            RuleKind::NumberRange { min, max } => finish!(NumberRange::new(*min, *max)?, message),
            RuleKind::DecimalRange { min, max } => {
                finish!(DecimalRange::new(*min, *max)?, message)
            }
            RuleKind::DigitsBetween {
                min,
                max,
                count_sign,
                count_point,
            } => finish!(
                DigitsBetween::new(*min, *max)?
                    .count_sign(*count_sign)
                    .count_point(*count_point),
                message
            ),
            RuleKind::IsDate { date_format: format } => {
                finish!(IsDate::new().with_format(date_format(format))?, message)
            }
            RuleKind::DateEquals {
                target_date,
                date_format: format,
                invalid_message,
            } => finish_date!(DateEquals, target_date, format, invalid_message, message),
            RuleKind::DateAfter {
                target_date,
                date_format: format,
                invalid_message,
            } => finish_date!(DateAfter, target_date, format, invalid_message, message),
            RuleKind::DateBefore {
                target_date,
                date_format: format,
                invalid_message,
            } => finish_date!(DateBefore, target_date, format, invalid_message, message),
            RuleKind::MatchRegex { pattern } => finish!(MatchRegex::new(pattern)?, message),
            RuleKind::NotMatchRegex { pattern } => finish!(NotMatchRegex::new(pattern)?, message),
            RuleKind::Password {
                uppercase,
                lowercase,
                digits,
                symbols,
                symbol_set,
                min_length,
            } => {
                let mut rule = Password::new();
                if let Some(required) = uppercase {
                    rule = rule.uppercase(*required);
                }
                if let Some(required) = lowercase {
                    rule = rule.lowercase(*required);
                }
                if let Some(required) = digits {
                    rule = rule.digits(*required);
                }
                if let Some(required) = symbols {
                    rule = rule.symbols(*required);
                }
                if let Some(set) = symbol_set {
                    rule = rule.symbol_set(set.clone());
                }
                if let Some(length) = min_length {
                    rule = rule.min_length(*length);
                }
                finish!(rule, message)
            }
            RuleKind::AllowedFile { allowed_extensions } => {
                let rule = match allowed_extensions {
                    Some(extensions) => AllowedFile::with_extensions(extensions),
                    None => AllowedFile::new(),
                };
                finish!(rule, message)
            }
            RuleKind::Email => finish!(Email::new(), message),
        };

        Ok(rule)
    }
}

impl From<RuleKind> for RuleDefinition {
    fn from(kind: RuleKind) -> Self {
        RuleDefinition::new(kind)
    }
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: impl Into<RuleDefinition>) -> Self {
        self.rules.push(rule.into());
        self
    }
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Build a [`Schema`], failing on the first misconfigured rule.
    ///
    /// Fields without rules are still declared so their values are passed
    /// through. A field listed twice gets the rules of both entries.
    pub fn build(&self) -> Result<Schema> {
        let mut schema = Schema::new();

        for field in &self.fields {
            schema.declare(field.name.as_str());

            for definition in &field.rules {
                let rule = definition.build().map_err(|source| {
                    warn!(
                        target: LOG_TARGET,
                        "field {}: cannot build rule {}: {}",
                        field.name,
                        definition.kind.name(),
                        source
                    );
                    ConfigError::InvalidRule {
                        field: field.name.clone(),
                        rule: definition.kind.name(),
                        source,
                    }
                })?;

                if let Some(template) = &definition.message {
                    warn_unknown_placeholders(&field.name, &rule, template);
                }

                schema.insert(field.name.as_str(), rule);
            }
        }

        Ok(schema)
    }
}

// Unknown placeholders render empty; usually a typo in the template.
fn warn_unknown_placeholders(field: &str, rule: &SharedRule, template: &str) {
    let known = rule.placeholders();
    for name in placeholders(template) {
        if !known.iter().any(|known| *known == name) {
            warn!(
                target: LOG_TARGET,
                "field {}: rule {} has no placeholder {{{}}}",
                field,
                rule.name(),
                name
            );
        }
    }
}
