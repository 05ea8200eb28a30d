// Schema file loaders

use crate::{ConfigError, Result, SchemaDefinition};
use fieldcheck_log::debug;
use fieldcheck_validation::Schema;
use std::fs;
use std::path::Path;

/// Supported schema file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Schema definition loader
#[derive(Debug, Clone, Copy)]
pub struct SchemaLoader {
    format: FileFormat,
}

impl SchemaLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load and build a schema from a file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Schema> {
        let path = path.as_ref();
        debug!(target: "fieldcheck::config", "loading schema from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse(&content)
    }

    /// Parse and build a schema from a string
    pub fn parse(&self, content: &str) -> Result<Schema> {
        self.parse_definition(content)?.build()
    }

    /// Parse a schema definition without building its rules
    pub fn parse_definition(&self, content: &str) -> Result<SchemaDefinition> {
        match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e))),
        }
    }
}

/// Load a schema, picking the format from the file extension.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    SchemaLoader::auto(path)?.load_file(path)
}
