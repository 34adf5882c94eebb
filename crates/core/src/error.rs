//! Error types for the fixture generator
//!
//! Every failure the generator can raise is a variant of [`FixtureError`].
//! The host-facing behaviour is one "generation failed" category with a
//! descriptive message; the variants exist so callers and tests can tell the
//! configuration, resolution and I/O families apart.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the fixture generator
#[derive(Debug, Error)]
pub enum FixtureError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A type name could not be resolved against the type model
    #[error("Cannot resolve type '{0}'")]
    UnresolvedType(String),

    /// Explicit generic arguments do not match the declared parameter count
    #[error(
        "Generic argument count mismatch for '{type_name}': declared {expected} parameter(s), got {found}"
    )]
    GenericArityMismatch {
        type_name: String,
        expected: usize,
        found: usize,
    },

    /// A field name does not follow the multi-word lowerCamelCase convention
    #[error("Invalid field name '{0}': expected a multi-word lowerCamelCase identifier")]
    InvalidFieldName(String),

    /// Two constants of one fixture share a key or a name
    #[error("Duplicate constant '{key}' in fixture for '{type_name}'")]
    DuplicateConstant { type_name: String, key: String },

    /// A creation-method annotation references a constant that does not exist
    #[error("Unknown constant '{key}' referenced by {annotation} on '{type_name}'")]
    UnknownConstant {
        type_name: String,
        annotation: String,
        key: String,
    },

    /// A placeholder token names a type that cannot be resolved
    #[error("Unresolvable placeholder '{placeholder}' in value '{value}'")]
    UnresolvedPlaceholder { placeholder: String, value: String },

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    /// A type graph refers back to a type that is still being resolved
    #[error("Recursive type detected: {}", chain.join(" -> "))]
    RecursiveType { chain: Vec<String> },

    /// Nested resolution went deeper than the configured limit
    #[error("Resolution depth limit of {limit} exceeded while resolving '{type_name}'")]
    DepthExceeded { type_name: String, limit: usize },

    // ========================================================================
    // Scripting Errors
    // ========================================================================
    /// A callback expression failed to compile
    #[error("Failed to compile callback expression '{expression}': {message}")]
    ScriptCompile { expression: String, message: String },

    /// A compiled callback failed while producing a value
    #[error("Callback evaluation failed: {0}")]
    ScriptEval(String),

    // ========================================================================
    // Model Errors
    // ========================================================================
    /// The type model is malformed
    #[error("Invalid type model: {0}")]
    InvalidModel(String),

    /// A type reference could not be parsed
    #[error("Invalid type reference '{text}': {message}")]
    InvalidTypeRef { text: String, message: String },

    /// Model schema version mismatch
    #[error("Schema version mismatch: expected at most {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl FixtureError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        FixtureError::InvalidConfig(msg.into())
    }

    /// Create an invalid model error
    pub fn model(msg: impl Into<String>) -> Self {
        FixtureError::InvalidModel(msg.into())
    }

    /// Create an unresolved type error
    pub fn unresolved(type_name: impl Into<String>) -> Self {
        FixtureError::UnresolvedType(type_name.into())
    }

    /// Create a type reference parse error
    pub fn type_ref(text: impl Into<String>, msg: impl Into<String>) -> Self {
        FixtureError::InvalidTypeRef {
            text: text.into(),
            message: msg.into(),
        }
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        FixtureError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a configuration error
    ///
    /// Configuration errors abort the current annotated type but never the
    /// whole run.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FixtureError::InvalidConfig(_)
                | FixtureError::UnresolvedType(_)
                | FixtureError::GenericArityMismatch { .. }
                | FixtureError::InvalidFieldName(_)
                | FixtureError::DuplicateConstant { .. }
                | FixtureError::UnknownConstant { .. }
                | FixtureError::UnresolvedPlaceholder { .. }
                | FixtureError::ScriptCompile { .. }
        )
    }

    /// Check if this error was raised by the recursion guard
    pub fn is_recursion(&self) -> bool {
        matches!(
            self,
            FixtureError::RecursiveType { .. } | FixtureError::DepthExceeded { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            FixtureError::Io(_)
                | FixtureError::FileRead { .. }
                | FixtureError::FileWrite { .. }
                | FixtureError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using FixtureError
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> FixtureResult<T>;
}

impl<T, E: Into<FixtureError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> FixtureResult<T> {
        self.map_err(|e| {
            let err: FixtureError = e.into();
            FixtureError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_error() {
        let err = FixtureError::config("bad callback");
        assert!(err.is_configuration());
        assert!(!err.is_io());
        assert_eq!(err.to_string(), "Invalid configuration: bad callback");
    }

    #[test]
    fn test_duplicate_constant_message() {
        let err = FixtureError::DuplicateConstant {
            type_name: "com.acme.Order".to_string(),
            key: "orderId".to_string(),
        };
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Duplicate constant 'orderId' in fixture for 'com.acme.Order'"
        );
    }

    #[test]
    fn test_unknown_constant_names_key() {
        let err = FixtureError::UnknownConstant {
            type_name: "com.acme.Order".to_string(),
            annotation: "@FixtureConstructor(methodName = \"createOrder\")".to_string(),
            key: "missing".to_string(),
        };
        assert!(err.to_string().contains("'missing'"));
        assert!(err.to_string().contains("createOrder"));
    }

    #[test]
    fn test_recursive_type_chain() {
        let err = FixtureError::RecursiveType {
            chain: vec![
                "com.acme.Node".to_string(),
                "com.acme.Edge".to_string(),
                "com.acme.Node".to_string(),
            ],
        };
        assert!(err.is_recursion());
        assert!(!err.is_configuration());
        assert_eq!(
            err.to_string(),
            "Recursive type detected: com.acme.Node -> com.acme.Edge -> com.acme.Node"
        );
    }

    #[test]
    fn test_arity_mismatch_message() {
        let err = FixtureError::GenericArityMismatch {
            type_name: "com.acme.Pair".to_string(),
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Generic argument count mismatch for 'com.acme.Pair': declared 2 parameter(s), got 1"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = FixtureError::with_context("Loading model", "file is empty");
        assert_eq!(err.to_string(), "Loading model: file is empty");
    }

    #[test]
    fn test_result_ext_wraps_io_error() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.with_context("Reading model").unwrap_err();
        assert_eq!(err.to_string(), "Reading model: IO error: missing");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FixtureError = io_err.into();
        assert!(err.is_io());
    }
}
