//! # Value Resolution
//!
//! The [`ValueResolver`] decides what expression to emit as the default for
//! a field of an arbitrary type. Lookup order:
//!
//! 1. registry provider for the exact qualified name (generics included)
//! 2. registry provider for the erased name
//! 3. structural dispatch: arrays, enums, then the [`FallbackChain`] for
//!    instantiable declared types
//! 4. the `null` token
//!
//! Nested declared types recurse back through the resolver, and so do
//! provider templates with placeholders. A [`ResolutionScope`] travels with
//! the recursion and stops it with an error when a type re-enters itself or
//! the depth limit is reached. Types are tracked by their full name with
//! generic arguments, so `Box<Box<String>>` is not a cycle.

mod fallback;

pub use fallback::{
    ConventionBuilderStrategy, ConventionConstructorStrategy, ExplicitFixtureStrategy,
    FallbackChain, InstanceStrategy, InstanceTarget, ManualBuilderStrategy,
    PublicConstructorStrategy,
};

use fixturegen_core::{ElementKind, FixtureError, FixtureResult};
use fixturegen_ir::{TypeRef, TypeUniverse};

use crate::metadata::{self, TypeDescriptor};
use crate::provider::{ArrayProvider, EnumProvider, ProviderRegistry, ValueProvider, ValueRequest};

/// Rendered when no way to construct a value exists
pub const NULL_VALUE: &str = "null";

/// Default nesting limit for declared-type recursion
pub const DEFAULT_MAX_DEPTH: usize = 16;

// ============================================================================
// Resolution
// ============================================================================

/// Outcome of one construction strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The strategy produced an expression
    Resolved(String),

    /// The strategy does not apply to this type
    NotApplicable,
}

impl Resolution {
    /// The expression, or the `null` token
    pub fn into_value(self) -> String {
        match self {
            Resolution::Resolved(value) => value,
            Resolution::NotApplicable => NULL_VALUE.to_string(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

// ============================================================================
// ResolutionScope
// ============================================================================

/// Declared types currently being constructed, outermost first
#[derive(Debug, Clone)]
pub struct ResolutionScope {
    in_progress: Vec<String>,
    max_depth: usize,
}

impl ResolutionScope {
    pub fn new(max_depth: usize) -> Self {
        Self {
            in_progress: Vec::new(),
            max_depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.in_progress.len()
    }

    /// Run `f` with `type_name` marked as in progress
    pub fn within<T>(
        &mut self,
        type_name: &str,
        f: impl FnOnce(&mut Self) -> FixtureResult<T>,
    ) -> FixtureResult<T> {
        if self.in_progress.iter().any(|t| t == type_name) {
            let mut chain = self.in_progress.clone();
            chain.push(type_name.to_string());
            return Err(FixtureError::RecursiveType { chain });
        }
        if self.in_progress.len() >= self.max_depth {
            return Err(FixtureError::DepthExceeded {
                type_name: type_name.to_string(),
                limit: self.max_depth,
            });
        }

        self.in_progress.push(type_name.to_string());
        let result = f(self);
        self.in_progress.pop();
        result
    }
}

// ============================================================================
// ValueResolver
// ============================================================================

/// Knobs that change what the resolver renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Maximum nesting of declared types
    pub max_depth: usize,

    /// Put one resolved element into container constants of the annotated type
    pub populate_containers: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            populate_containers: false,
        }
    }
}

/// Resolves default value expressions through the registry and fallback chain
#[derive(Debug)]
pub struct ValueResolver<'u> {
    universe: &'u TypeUniverse,
    registry: ProviderRegistry,
    chain: FallbackChain,
    settings: ResolverSettings,
}

impl<'u> ValueResolver<'u> {
    pub fn new(
        universe: &'u TypeUniverse,
        registry: ProviderRegistry,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            universe,
            registry,
            chain: FallbackChain::standard(),
            settings,
        }
    }

    /// Replace the fallback chain
    pub fn with_chain(mut self, chain: FallbackChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn universe(&self) -> &'u TypeUniverse {
        self.universe
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// A fresh scope with the configured depth limit
    pub fn new_scope(&self) -> ResolutionScope {
        ResolutionScope::new(self.settings.max_depth)
    }

    /// Resolve the value of a constant of the annotated type
    pub fn resolve_constant(&self, owner: &str, field: &str, ty: &TypeRef) -> FixtureResult<String> {
        let mut scope = self.new_scope();
        self.resolve_with(owner, field, ty, true, &mut scope)
    }

    /// Resolve a nested value inside an ongoing resolution
    pub fn resolve(
        &self,
        owner: &str,
        field: &str,
        ty: &TypeRef,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        self.resolve_with(owner, field, ty, false, scope)
    }

    /// Resolve the default for a type given by name
    pub fn resolve_named(
        &self,
        owner: &str,
        field: &str,
        type_name: &str,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        let ty = self.universe.resolve(type_name)?;
        self.resolve(owner, field, &ty, scope)
    }

    fn resolve_with(
        &self,
        owner: &str,
        field: &str,
        ty: &TypeRef,
        top_level: bool,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        if let TypeRef::Wildcard { bound, .. } = ty {
            return match bound {
                Some(bound) => self.resolve_with(owner, field, bound, top_level, scope),
                None => Ok(NULL_VALUE.to_string()),
            };
        }

        let descriptor = metadata::describe(ty, self.universe)?;
        let request = ValueRequest {
            owner,
            field,
            ty,
            descriptor: &descriptor,
            top_level,
        };

        if let Some(provider) = self.registry.lookup(&descriptor) {
            if provider.reenters_resolver() {
                return scope.within(&descriptor.qualified_name, |scope| {
                    provider.provide(&request, self, scope)
                });
            }
            return provider.provide(&request, self, scope);
        }

        match ty {
            TypeRef::Array(_) => ArrayProvider.provide(&request, self, scope),
            TypeRef::Declared { name, .. } => self.resolve_declared(name, &descriptor, &request, scope),
            _ => Ok(NULL_VALUE.to_string()),
        }
    }

    fn resolve_declared(
        &self,
        name: &str,
        descriptor: &TypeDescriptor,
        request: &ValueRequest<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        let Some(element) = self.universe.get(name) else {
            tracing::debug!(type_name = %name, "type not in model, rendering null");
            return Ok(NULL_VALUE.to_string());
        };

        match element.kind {
            ElementKind::Enum => EnumProvider.provide(request, self, scope),
            kind if kind.is_instantiable() => {
                let resolution = scope.within(&descriptor.qualified_name, |scope| {
                    self.chain.resolve(element, descriptor, self, scope)
                })?;
                Ok(resolution.into_value())
            }
            _ => Ok(NULL_VALUE.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
