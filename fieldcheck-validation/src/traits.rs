// Rule contract

use crate::Value;
use std::sync::Arc;

/// A single, reusable validation check.
///
/// Rules are configured once and then invoked any number of times, possibly
/// from several threads at once. `validate` must depend only on the rule's
/// configuration and its arguments.
///
/// Returning `None` means the value passed; `Some` carries the fully
/// rendered error message. Bad input data is never a panic or an `Err`,
/// it is a message.
pub trait Rule: Send + Sync {
    /// Check `value`. `field_name` is used for message interpolation only.
    fn validate(&self, value: &Value, field_name: &str) -> Option<String>;

    /// Rule name, e.g. `"min_length"`.
    fn name(&self) -> &'static str;

    /// Placeholder names this rule supplies to its message template.
    fn placeholders(&self) -> &'static [&'static str] {
        &["field_name"]
    }
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        (**self).validate(value, field_name)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn placeholders(&self) -> &'static [&'static str] {
        (**self).placeholders()
    }
}

impl<R: Rule + ?Sized> Rule for Arc<R> {
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        (**self).validate(value, field_name)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn placeholders(&self) -> &'static [&'static str] {
        (**self).placeholders()
    }
}

/// A rule backed by a closure.
///
/// ```
/// use fieldcheck_validation::{from_fn, Rule, Value};
///
/// let even = from_fn("even", |value: &Value, field: &str| match value.as_number() {
///     Some(n) if n % 2.0 != 0.0 => Some(format!("{} must be even", field)),
///     _ => None,
/// });
/// assert_eq!(even.validate(&Value::from(3), "n"), Some("n must be even".to_string()));
/// ```
pub struct FnRule<F> {
    name: &'static str,
    check: F,
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&Value, &str) -> Option<String> + Send + Sync,
{
    fn validate(&self, value: &Value, field_name: &str) -> Option<String> {
        (self.check)(value, field_name)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Wrap a closure as a [`Rule`].
pub fn from_fn<F>(name: &'static str, check: F) -> FnRule<F>
where
    F: Fn(&Value, &str) -> Option<String> + Send + Sync,
{
    FnRule { name, check }
}
