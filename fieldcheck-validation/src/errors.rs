// Validation errors

use indexmap::IndexMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Misconfigured rule, reported when the rule is built.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: String, max: String },

    #[error("invalid target date {value:?} for format {format:?}")]
    InvalidDate { value: String, format: String },

    #[error("invalid date format {0:?}")]
    InvalidDateFormat(String),

    #[error("invalid bound: {0} is not a finite number")]
    NonFiniteBound(f64),
}

impl RuleError {
    /// Bounds that cannot be ordered (NaN) are rejected along with inverted ones.
    pub(crate) fn check_range<T: PartialOrd + fmt::Display>(min: T, max: T) -> Result<(), Self> {
        match min.partial_cmp(&max) {
            Some(Ordering::Less | Ordering::Equal) => Ok(()),
            _ => Err(RuleError::InvalidRange {
                min: min.to_string(),
                max: max.to_string(),
            }),
        }
    }

    pub(crate) fn check_finite(bound: f64) -> Result<f64, Self> {
        if bound.is_finite() {
            Ok(bound)
        } else {
            Err(RuleError::NonFiniteBound(bound))
        }
    }
}

/// Error messages collected during one validation run, grouped by field.
///
/// Fields keep the order in which they first received a message, and
/// messages keep the order in which they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorMessages {
    fields: IndexMap<String, Vec<String>>,
}

impl ErrorMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    /// Append a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Append several messages for `field`. Nothing is recorded when
    /// `messages` is empty.
    pub fn extend_field<I>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut messages = messages.into_iter().peekable();
        if messages.peek().is_none() {
            return;
        }
        match self.fields.get_mut(field) {
            Some(existing) => existing.extend(messages),
            None => {
                self.fields.insert(field.to_string(), messages.collect());
            }
        }
    }

    /// Messages for one field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Fields that have at least one message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// All messages in field order, then insertion order.
    pub fn flatten(&self) -> Vec<String> {
        self.fields.values().flatten().cloned().collect()
    }

    pub fn into_grouped(self) -> IndexMap<String, Vec<String>> {
        self.fields
    }

    /// JSON body suitable for a 400 response.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self.fields })
    }
}

impl fmt::Display for ErrorMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, messages) in &self.fields {
            for message in messages {
                writeln!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorMessages {}

impl From<IndexMap<String, Vec<String>>> for ErrorMessages {
    fn from(mut fields: IndexMap<String, Vec<String>>) -> Self {
        fields.retain(|_, messages| !messages.is_empty());
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_and_flatten() {
        let mut errors = ErrorMessages::new();
        errors.add("username", "Username is required");
        errors.add("email", "Email is invalid");
        errors.add("username", "Username must be at least 3 characters");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["username", "email"]);
        assert_eq!(
            errors.flatten(),
            vec![
                "Username is required",
                "Username must be at least 3 characters",
                "Email is invalid",
            ]
        );
    }

    #[test]
    fn test_extend_field_skips_empty() {
        let mut errors = ErrorMessages::new();
        errors.extend_field("a", Vec::new());
        assert!(errors.is_empty());

        errors.extend_field("a", vec!["one".to_string()]);
        errors.extend_field("a", vec!["two".to_string()]);
        assert_eq!(errors.get("a"), Some(&["one".to_string(), "two".to_string()][..]));
    }

    #[test]
    fn test_to_json_and_display() {
        let mut errors = ErrorMessages::new();
        errors.add("age", "age should be greater then 18");

        assert_eq!(
            errors.to_json(),
            serde_json::json!({ "errors": { "age": ["age should be greater then 18"] } })
        );
        assert_eq!(errors.to_string(), "age: age should be greater then 18\n");
    }

    #[test]
    fn test_range_check() {
        assert!(RuleError::check_range(1, 2).is_ok());
        assert!(RuleError::check_range(2, 2).is_ok());
        let err = RuleError::check_range(3.5, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid range: min 3.5 is greater than max 1");
    }

    #[test]
    fn test_nan_bounds_rejected() {
        assert!(RuleError::check_range(f64::NAN, 1.0).is_err());
        assert!(RuleError::check_range(0.0, f64::NAN).is_err());
        assert!(RuleError::check_finite(f64::INFINITY).is_err());
        assert_eq!(RuleError::check_finite(2.5).unwrap(), 2.5);
        assert_eq!(
            RuleError::check_finite(f64::NAN).unwrap_err().to_string(),
            "invalid bound: NaN is not a finite number"
        );
    }
}
