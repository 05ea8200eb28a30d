// Schema location from the environment

use crate::{ConfigError, Result, load_schema};
use fieldcheck_validation::Schema;
use std::env;
use std::path::PathBuf;

/// Default variable holding the schema file path.
pub const SCHEMA_ENV_VAR: &str = "FIELDCHECK_SCHEMA";

/// Loads a schema from the file named by an environment variable
pub struct EnvLoader {
    var: String,
}

impl EnvLoader {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }

    /// Path named by the variable
    pub fn schema_path(&self) -> Result<PathBuf> {
        let path = env::var(&self.var).map_err(ConfigError::EnvError)?;
        if path.trim().is_empty() {
            return Err(ConfigError::LoadError(format!("{} is empty", self.var)));
        }
        Ok(PathBuf::from(path))
    }

    /// Load the schema named by the variable
    pub fn load(&self) -> Result<Schema> {
        load_schema(self.schema_path()?)
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(SCHEMA_ENV_VAR)
    }
}
