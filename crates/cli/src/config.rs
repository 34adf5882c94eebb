//! Configuration file loading
//!
//! ```toml
//! [generator]
//! output_dir = "build/generated-fixtures"
//! max_depth = 16
//! populate_containers = false
//! emit_generated_annotation = true
//!
//! [providers]
//! "java.time.Instant" = "java.time.Instant.EPOCH"
//!
//! [callbacks]
//! "com.acme.Email" = "'new com.acme.Email(' + quote(field.name + '@example.com') + ')'"
//! ```

use fixturegen_codegen::GeneratorConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "fixturegen.toml";

/// `[generator]` table; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSection {
    pub output_dir: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub populate_containers: Option<bool>,
    pub emit_generated_annotation: Option<bool>,
}

/// The whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub generator: GeneratorSection,
    pub providers: BTreeMap<String, String>,
    pub callbacks: BTreeMap<String, String>,
}

impl ConfigFile {
    pub fn parse(text: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Load the explicit path, else `fixturegen.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(CONFIG_FILE_NAME);
                if default.is_file() {
                    tracing::debug!(path = %default.display(), "using configuration file");
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply file values over the defaults
    pub fn into_generator_config(self) -> GeneratorConfig {
        let defaults = GeneratorConfig::default();
        let section = self.generator;
        GeneratorConfig {
            output_dir: section.output_dir.unwrap_or(defaults.output_dir),
            max_depth: section.max_depth.unwrap_or(defaults.max_depth),
            populate_containers: section
                .populate_containers
                .unwrap_or(defaults.populate_containers),
            emit_generated_annotation: section
                .emit_generated_annotation
                .unwrap_or(defaults.emit_generated_annotation),
            providers: self.providers,
            callbacks: self.callbacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_file() {
        let text = r#"
            [generator]
            output_dir = "out"
            max_depth = 4
            populate_containers = true

            [providers]
            "java.time.Instant" = "java.time.Instant.EPOCH"

            [callbacks]
            "com.acme.Email" = "quote(field.name)"
        "#;
        let config = ConfigFile::parse(text, Path::new("fixturegen.toml"))
            .unwrap()
            .into_generator_config();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_depth, 4);
        assert!(config.populate_containers);
        assert!(config.emit_generated_annotation);
        assert_eq!(config.providers["java.time.Instant"], "java.time.Instant.EPOCH");
        assert_eq!(config.callbacks["com.acme.Email"], "quote(field.name)");
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let config = ConfigFile::parse("", Path::new("fixturegen.toml"))
            .unwrap()
            .into_generator_config();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ConfigFile::parse("[generator]\nmax_dept = 3\n", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = ConfigFile::discover(Some(Path::new("/nonexistent/fixturegen.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }
}
