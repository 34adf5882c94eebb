//! # Fixture Generator Core
//!
//! Core types, traits, and error handling for the fixture generator.
//!
//! - **Types**: primitive kinds, element kinds, declaration modifiers
//! - **Traits**: `Validatable`
//! - **Errors**: unified error handling with `FixtureError` and `FixtureResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{FixtureError, FixtureResult, ResultExt};
pub use traits::Validatable;
pub use types::{ElementKind, Modifier, PrimitiveKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
