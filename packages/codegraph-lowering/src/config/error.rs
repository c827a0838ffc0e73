//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load, parse or validate a `LoweringConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting is below its minimum
    #[error("'{field}' must be at least {min}, got {value}. {hint}")]
    BelowMinimum {
        field: &'static str,
        value: usize,
        min: usize,
        hint: &'static str,
    },

    /// The YAML document has no `version` key
    #[error("lowering config has no 'version' key; start the file with 'version: 1'")]
    MissingVersion,

    /// The YAML document targets a schema this build does not read
    #[error("lowering config version {found} is not supported (supported: {supported:?})")]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// The config file could not be read
    #[error("cannot read lowering config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML or an unknown key
    #[error("invalid lowering config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub fn below_minimum(field: &'static str, value: usize, min: usize, hint: &'static str) -> Self {
        Self::BelowMinimum {
            field,
            value,
            min,
            hint,
        }
    }
}
