//! Field-level validation for untyped input
//!
//! A [`Schema`] maps field names to ordered lists of [`Rule`]s. Validating a
//! map of raw [`Value`]s runs every rule of every field and collects the
//! rendered error messages, either grouped by field or as one flat list.
//!
//! # Examples
//!
//! ## Schema validation
//!
//! ```
//! use fieldcheck_validation::{
//!     validate, Email, Errors, FieldRules, GreaterThanOrEqual, MinLength, NotBlank, Schema,
//!     values,
//! };
//!
//! let schema = Schema::new()
//!     .field(FieldRules::for_field("username").add(NotBlank::new()).add(MinLength::new(3)))
//!     .field(FieldRules::for_field("email").add(Email::new()))
//!     .field(FieldRules::for_field("age").add(GreaterThanOrEqual::new(18)));
//!
//! let input = values! {
//!     "username" => "jo",
//!     "email" => "jo@example.com",
//!     "age" => "17",
//! };
//!
//! let result = validate(&schema, &input, false);
//! let Errors::Grouped(errors) = &result.errors else { unreachable!() };
//! assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["username", "age"]);
//! assert_eq!(
//!     errors.get("age").unwrap(),
//!     &["age should be greater then or equal 18"]
//! );
//! ```
//!
//! ## Custom messages
//!
//! ```
//! use fieldcheck_validation::{Length, Rule, Value};
//!
//! let rule = Length::new(3, 20)
//!     .unwrap()
//!     .with_message("{field_name} needs {min} to {max} characters, got {value}");
//!
//! assert_eq!(
//!     rule.validate(&Value::from("ab"), "username"),
//!     Some("username needs 3 to 20 characters, got ab".to_string())
//! );
//! ```
//!
//! ## Custom rules
//!
//! ```
//! use fieldcheck_validation::{from_fn, Schema, Value, values};
//!
//! let schema = Schema::new().rule(
//!     "code",
//!     from_fn("uppercase", |value: &Value, field: &str| {
//!         let text = value.as_text()?;
//!         (text.to_uppercase() != text).then(|| format!("{} must be uppercase", field))
//!     }),
//! );
//!
//! let result = schema.validate_flat(&values! { "code" => "abc" });
//! assert_eq!(result.errors.into_flat(), vec!["code must be uppercase"]);
//! ```

mod errors;
mod message;
mod rules;
mod schema;
mod traits;
mod value;

pub use errors::*;
pub use message::*;
pub use rules::*;
pub use schema::*;
pub use traits::*;
pub use value::*;

/// Build a [`Values`] map from `key => value` pairs.
///
/// ```
/// use fieldcheck_validation::{values, Value};
///
/// let input = values! { "name" => "Ada", "age" => 36, "nickname" => None::<&str> };
/// assert_eq!(input["age"], Value::Int(36));
/// assert_eq!(input["nickname"], Value::Null);
/// ```
#[macro_export]
macro_rules! values {
    () => {
        $crate::Values::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Values::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        map
    }};
}
