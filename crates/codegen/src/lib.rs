//! # Fixture Generator Codegen
//!
//! Fixture generation engine.
//!
//! For every type carrying the `Fixture` marker this crate generates a
//! companion `<Type>Fixture` Java class holding ready-made test constants
//! and factory methods.
//!
//! ## Features
//!
//! - **Metadata**: type descriptors with generic argument mapping
//! - **Value Resolution**: provider registry plus an ordered fallback chain
//!   for declared types, with a recursion guard
//! - **Constants**: one constant per field or per explicit constant annotation
//! - **Creation Methods**: constructor-style and builder-style factories
//! - **Placeholders**: `${Type}` / `#{Type}` expansion in explicit values
//! - **Script Callbacks**: custom providers given as one-line expressions
//!

// ============================================================================
// Modules
// ============================================================================

pub mod constants;
pub mod context;
pub mod creation;
pub mod generator;
pub mod metadata;
pub mod naming;
pub mod placeholder;
pub mod provider;
pub mod render;
pub mod resolve;
pub mod script;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{Constant, ConstantTable, generate_constants};
pub use context::GenerationContext;
pub use creation::{CreationMethod, CreationStrategy, generate_creation_methods};
pub use generator::{
    CompiledCallbacks, Diagnostic, Fixture, FixtureGenerator, generate, generate_to_dir,
};
pub use metadata::{TypeDescriptor, describe, describe_with_impls};
pub use naming::{NamingStrategy, ScreamingSnakeNaming};
pub use provider::{ProviderRegistry, ValueProvider, ValueRequest};
pub use resolve::{
    DEFAULT_MAX_DEPTH, FallbackChain, NULL_VALUE, ResolutionScope, ResolverSettings,
    ValueResolver,
};
pub use script::{ExprEngine, FieldInfo, ScriptEngine, TypeInfo, ValueCallback};

use fixturegen_core::{FixtureError, FixtureResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the fixture generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output directory for generated sources
    pub output_dir: PathBuf,

    /// Maximum nesting of declared types during value resolution
    pub max_depth: usize,

    /// Fill container constants of the annotated type with one resolved element
    pub populate_containers: bool,

    /// Add `@javax.annotation.processing.Generated` with a timestamp
    pub emit_generated_annotation: bool,

    /// Type name → value template (placeholders allowed)
    pub providers: BTreeMap<String, String>,

    /// Type name → script callback expression
    pub callbacks: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./generated"),
            max_depth: DEFAULT_MAX_DEPTH,
            populate_containers: false,
            emit_generated_annotation: true,
            providers: BTreeMap::new(),
            callbacks: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the resolution depth limit
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Populate container constants
    pub fn populate_containers(mut self) -> Self {
        self.populate_containers = true;
        self
    }

    /// Leave out the `@Generated` annotation
    pub fn without_generated_annotation(mut self) -> Self {
        self.emit_generated_annotation = false;
        self
    }

    /// Add a value template for a type
    pub fn with_provider(mut self, type_name: impl Into<String>, template: impl Into<String>) -> Self {
        self.providers.insert(type_name.into(), template.into());
        self
    }

    /// Add a script callback for a type
    pub fn with_callback(
        mut self,
        type_name: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        self.callbacks.insert(type_name.into(), expression.into());
        self
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,

    /// File content
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// A Java source file
    pub fn java(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content)
    }

    /// File extension of the path
    pub fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
    }
}

// ============================================================================
// GeneratedFixtures
// ============================================================================

/// All files and diagnostics of one generation run
#[derive(Debug, Clone, Default)]
pub struct GeneratedFixtures {
    /// Generated fixture sources
    pub files: Vec<GeneratedFile>,

    /// Types that failed to generate
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedFixtures {
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Find a file by its relative path
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    /// Write all files to disk
    pub fn write_to_disk(&self, base_dir: impl AsRef<Path>) -> FixtureResult<()> {
        let base_dir = base_dir.as_ref();

        for file in &self.files {
            let full_path = base_dir.join(&file.path);

            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| FixtureError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(&full_path, &file.content).map_err(|e| FixtureError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;
            tracing::debug!(path = %full_path.display(), "wrote fixture");
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
