//! # Value Providers
//!
//! A value provider renders a source-level default expression for one
//! field of one type. Some are context-free (`0`, `false`), others recurse
//! back into the [`ValueResolver`] for nested types.
//!
//! Providers are looked up in the [`ProviderRegistry`] by qualified type
//! name; caller overrides are consulted before the built-in defaults.

mod builtin;
mod registry;

pub use builtin::{
    ArrayProvider, ContainerKind, ContainerProvider, EnumProvider, LiteralProvider,
    StringProvider, TemplateProvider, UuidProvider,
};
pub use registry::ProviderRegistry;

use fixturegen_core::FixtureResult;
use fixturegen_ir::TypeRef;
use std::fmt;

use crate::metadata::TypeDescriptor;
use crate::resolve::{ResolutionScope, ValueResolver};

/// Everything a provider knows about the value it is asked for
#[derive(Debug, Clone, Copy)]
pub struct ValueRequest<'r> {
    /// Qualified name of the type declaring the field
    pub owner: &'r str,

    /// Field or parameter name the value is for
    pub field: &'r str,

    /// The field's type, already specialized through the owner's generic map
    pub ty: &'r TypeRef,

    pub descriptor: &'r TypeDescriptor,

    /// Set for constants of the annotated type itself, unset inside nested
    /// resolution
    pub top_level: bool,
}

/// Renders a default value expression for a type
pub trait ValueProvider: fmt::Debug + Send + Sync {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String>;

    /// Whether rendering may resolve arbitrary other types, including the
    /// requested one; such providers run inside the recursion guard
    fn reenters_resolver(&self) -> bool {
        false
    }
}
