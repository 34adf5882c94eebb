//! # Fixture Generator IR
//!
//! The compile-time type model the generator works on. It stands in for the
//! host compiler's element and type mirrors.
//!
//! ## Core Concepts
//!
//! - **TypeRef**: a type at a point of use (`java.util.List<T>`, `int[]`)
//! - **TypeElement**: a declared class, record, interface or enum
//! - **FieldElement**: a field with modifiers, constant value and annotations
//! - **ExecutableElement**: a constructor or method signature
//! - **Annotation**: the fixture annotation schemas and convention markers
//! - **TypeUniverse**: the indexed set of declared elements
//!

// Module declarations
pub mod annotation;
pub mod element;
pub mod serialization;
pub mod type_ref;
pub mod universe;
pub mod validation;

// Re-export commonly used types at crate root
pub use annotation::{Annotation, BuilderFixture, BuilderSetter, ConstructorFixture};
pub use element::{ExecutableElement, FieldElement, Parameter, TypeElement};
pub use serialization::{ModelFile, load_model, model_to_json, parse_model, save_model};
pub use type_ref::TypeRef;
pub use universe::TypeUniverse;

// Re-export core types that are commonly used with IR
pub use fixturegen_core::{
    ElementKind, FixtureError, FixtureResult, Modifier, PrimitiveKind, Validatable,
};

/// Current schema version for model files
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
