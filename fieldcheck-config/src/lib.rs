//! Declarative schema definitions for fieldcheck
//!
//! Schemas can be written as TOML or JSON and built into a
//! [`Schema`](fieldcheck_validation::Schema) at startup.
//!
//! ```
//! use fieldcheck_config::{FileFormat, SchemaLoader};
//! use fieldcheck_validation::values;
//!
//! let schema = SchemaLoader::new(FileFormat::Toml)
//!     .parse(r#"
//!         [[fields]]
//!         name = "username"
//!         rules = [
//!             { rule = "not_blank" },
//!             { rule = "length", min = 3, max = 20, message = "{field_name}: {min}-{max} chars" },
//!         ]
//!     "#)
//!     .unwrap();
//!
//! let result = schema.validate_flat(&values! { "username" => "jo" });
//! assert_eq!(result.errors.into_flat(), vec!["username: 3-20 chars"]);
//! ```

pub mod definition;
pub mod env;
pub mod error;
pub mod loader;

pub use definition::{FieldDefinition, RuleDefinition, RuleKind, SchemaDefinition, TextOrList};
pub use env::{EnvLoader, SCHEMA_ENV_VAR};
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, SchemaLoader, load_schema};
