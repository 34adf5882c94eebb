//! Core traits for the fixture generator

use crate::error::FixtureResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use fixturegen_core::{FixtureError, FixtureResult, Validatable};
///
/// struct Field {
///     name: String,
/// }
///
/// impl Validatable for Field {
///     fn validate(&self) -> FixtureResult<()> {
///         if self.name.is_empty() {
///             return Err(FixtureError::model("field name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `FixtureError` describing the problem.
    fn validate(&self) -> FixtureResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}
