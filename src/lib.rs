// fieldcheck - schema-driven field validation
//
// Rules check one raw value each and render their own error messages; a
// schema runs them over a map of input values and collects the results.

// Re-export the validation engine
pub use fieldcheck_validation::*;

// Re-export logging
pub use fieldcheck_log as log;

// Re-export optional crates
#[cfg(feature = "config")]
pub use fieldcheck_config as config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AllowedFile,
        DateAfter,
        DateBefore,
        DateEquals,
        DecimalRange,
        DigitsBetween,
        DoesntEndWith,
        DoesntStartWith,
        Email,
        EndsWith,
        Equals,
        ErrorMessages,
        Errors,
        FieldRules,
        GreaterThan,
        GreaterThanOrEqual,
        InList,
        IsDate,
        Length,
        LessThan,
        LessThanOrEqual,
        MatchRegex,
        MaxLength,
        MinLength,
        NotBlank,
        NotEquals,
        NotInList,
        NotMatchRegex,
        NotNull,
        NumberRange,
        Numeric,
        Password,
        Rule,
        RuleError,
        Schema,
        StartsWith,
        ValidationResult,
        Value,
        Values,
        from_fn,
        validate,
        values,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{SchemaLoader, load_schema};
}
