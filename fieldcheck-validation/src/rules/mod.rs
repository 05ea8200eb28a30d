// Built-in rules

/// Adds `with_message` / `message` accessors to rules that keep their
/// template in a `message: String` field.
macro_rules! message_template {
    ($($rule:ty),+ $(,)?) => {
        $(
            impl $rule {
                /// Replace the default message template.
                pub fn with_message(mut self, template: impl Into<String>) -> Self {
                    self.message = template.into();
                    self
                }

                /// Current message template.
                pub fn message(&self) -> &str {
                    &self.message
                }
            }
        )+
    };
}

mod date;
mod file;
mod number;
mod pattern;
mod string;

pub use date::*;
pub use file::*;
pub use number::*;
pub use pattern::*;
pub use string::*;
