//! Catalog configuration files.
//!
//! A catalog file lists root command specs in matching order. Files ending in
//! `.yml`/`.yaml` are read as YAML, everything else as JSON.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! commands:
//!   - name: view task
//!     help_text: "View a task: `view task <task number>`"
//!     value_type: int
//!     pattern: '\d+'
//!   - name: view tasks
//!     help_text: View all tasks in this group
//!     no_args: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use command_match_core::CommandSpec;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Current catalog file format version.
pub const CATALOG_FORMAT_VERSION: &str = "1.0";

fn default_version() -> String {
    CATALOG_FORMAT_VERSION.to_string()
}

/// Serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_match_catalog::ConfigFormat;
    ///
    /// assert_eq!(ConfigFormat::from_path("commands.yml"), ConfigFormat::Yaml);
    /// assert_eq!(ConfigFormat::from_path("commands.YAML"), ConfigFormat::Yaml);
    /// assert_eq!(ConfigFormat::from_path("commands.json"), ConfigFormat::Json);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yml" | "yaml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Top-level catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Configuration format version (e.g., `"1.0"`).
    #[serde(default = "default_version")]
    pub version: String,
    /// Root commands in matching order.
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            commands: Vec::new(),
        }
    }
}

impl CatalogConfig {
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        Self {
            commands,
            ..Default::default()
        }
    }

    /// Loads configuration from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::CatalogError::IoError) if the file cannot
    /// be read, or a [`YamlError`](crate::CatalogError::YamlError) /
    /// [`JsonError`](crate::CatalogError::JsonError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let config = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml::from_reader(reader)?,
            ConfigFormat::Json => serde_json::from_reader(reader)?,
        };
        Ok(config)
    }

    /// Saves the configuration in the format implied by `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::CatalogError::IoError) if the file cannot
    /// be written, or a serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml::to_writer(writer, self)?,
            ConfigFormat::Json => serde_json::to_writer_pretty(writer, self)?,
        }
        Ok(())
    }

    /// Renders the configuration as a string.
    ///
    /// # Errors
    ///
    /// Returns a serialization error.
    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        Ok(match format {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }
}
