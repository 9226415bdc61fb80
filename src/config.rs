//! Reorder configuration and its TOML file format
//!
//! ```toml
//! strategy = "centroid"
//!
//! [output]
//! physical = true
//! unit = "mm"
//! precision = 4
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::reorder::{Strategy, UnknownStrategy};
use crate::renderer::OutputConfig;

/// Errors that can occur when loading or parsing a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Strategy(#[from] UnknownStrategy),
}

/// Configuration for the complete reorder pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReorderConfig {
    /// Which path feature the ordering minimizes travel between
    pub strategy: Strategy,
    /// Serializer configuration
    pub output: OutputConfig,
}

/// TOML structure for deserializing configuration files
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    strategy: Option<String>,
    output: Option<OutputConfig>,
}

impl ReorderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Keys that are left out keep their default values.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let strategy = match parsed.strategy {
            Some(name) => name.parse()?,
            None => Strategy::default(),
        };
        Ok(ReorderConfig {
            strategy,
            output: parsed.output.unwrap_or_default(),
        })
    }

    /// Set the reordering strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the output configuration
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Enable or disable rescaling to physical units
    pub fn with_physical(mut self, physical: bool) -> Self {
        self.output.physical = physical;
        self
    }
}
