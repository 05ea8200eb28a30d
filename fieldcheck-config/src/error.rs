// Error types for schema configuration

use fieldcheck_validation::RuleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load schema: {0}")]
    LoadError(String),

    #[error("Failed to parse schema: {0}")]
    ParseError(String),

    #[error("Invalid rule `{rule}` for field `{field}`: {source}")]
    InvalidRule {
        field: String,
        rule: &'static str,
        #[source]
        source: RuleError,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
