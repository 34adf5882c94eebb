//! Serialization and deserialization of model files
//!
//! A model file is the JSON snapshot of the declared types a compilation
//! round hands to the generator. It carries a schema version so older files
//! can be migrated on load.

use crate::{SCHEMA_VERSION, TypeElement, TypeUniverse};
use fixturegen_core::{FixtureError, FixtureResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File extension for model files
pub const MODEL_EXTENSION: &str = "json";

// ============================================================================
// Model File Wrapper
// ============================================================================

/// Wrapper for model files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    /// Schema version for migration purposes
    #[serde(default)]
    pub schema_version: u32,

    /// Declared types
    #[serde(default)]
    pub types: Vec<TypeElement>,
}

impl ModelFile {
    /// Create a model file at the current schema version
    pub fn new(types: Vec<TypeElement>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            types,
        }
    }

    /// Check if migration is needed
    pub fn needs_migration(&self) -> bool {
        self.schema_version < SCHEMA_VERSION
    }

    /// Migrate to the latest schema version
    pub fn migrate(&mut self) -> FixtureResult<()> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(FixtureError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        while self.needs_migration() {
            self.migrate_one_version();
        }
        Ok(())
    }

    fn migrate_one_version(&mut self) {
        match self.schema_version {
            // Version 0 files predate the version field; the layout is identical.
            0 => self.schema_version = 1,
            _ => self.schema_version = SCHEMA_VERSION,
        }
    }

    /// Migrate and index into a universe
    pub fn into_universe(mut self) -> FixtureResult<TypeUniverse> {
        self.migrate()?;
        TypeUniverse::from_elements(self.types)
    }
}

// ============================================================================
// Load / Save
// ============================================================================

/// Parse a model from JSON text
pub fn parse_model(json: &str) -> FixtureResult<TypeUniverse> {
    let file: ModelFile = serde_json::from_str(json)?;
    file.into_universe()
}

/// Load a model from a file
pub fn load_model(path: impl AsRef<Path>) -> FixtureResult<TypeUniverse> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| FixtureError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let universe = parse_model(&json)?;
    tracing::debug!(path = %path.display(), types = universe.len(), "model loaded");
    Ok(universe)
}

/// Serialize a universe to pretty JSON
pub fn model_to_json(universe: &TypeUniverse) -> FixtureResult<String> {
    let file = ModelFile::new(universe.elements().to_vec());
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Save a universe to a file
pub fn save_model(universe: &TypeUniverse, path: impl AsRef<Path>) -> FixtureResult<()> {
    let path = path.as_ref();
    let json = model_to_json(universe)?;
    std::fs::write(path, json).map_err(|e| FixtureError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
