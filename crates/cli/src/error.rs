//! CLI error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the command layer itself
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be read
    #[error("Failed to read configuration '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema
    #[error("Invalid configuration '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A model directory holds no model files
    #[error("No model files found under '{0}'")]
    NoModels(PathBuf),

    /// Some annotated types failed to generate
    #[error("{0} type(s) failed to generate")]
    GenerationFailed(usize),
}

/// Result type for CLI operations
pub type CliResult<T> = anyhow::Result<T>;
