//! # Generation Context
//!
//! The `GenerationContext` holds everything needed to generate the fixture
//! of one annotated type:
//!
//! - the element and its descriptor (with any explicit generic arguments)
//! - the value resolver, carrying the provider registry built for this type
//! - the naming strategy for derived constant names
//!
//! It also provides helpers shared by the constant and creation-method
//! strategies: specialized field types, rendered type names and placeholder
//! expansion.

use fixturegen_core::FixtureResult;
use fixturegen_ir::{FieldElement, TypeElement, TypeRef};

use crate::metadata::TypeDescriptor;
use crate::naming::NamingStrategy;
use crate::placeholder;
use crate::resolve::ValueResolver;

/// Stands in for type variables left unbound by a raw fixture
const OBJECT_TYPE: &str = "java.lang.Object";

// ============================================================================
// GenerationContext
// ============================================================================

/// Context for generating one fixture class
#[derive(Debug)]
pub struct GenerationContext<'a> {
    element: &'a TypeElement,
    descriptor: TypeDescriptor,
    resolver: ValueResolver<'a>,
    naming: &'a dyn NamingStrategy,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        element: &'a TypeElement,
        descriptor: TypeDescriptor,
        resolver: ValueResolver<'a>,
        naming: &'a dyn NamingStrategy,
    ) -> Self {
        Self {
            element,
            descriptor,
            resolver,
            naming,
        }
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    pub fn element(&self) -> &'a TypeElement {
        self.element
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn resolver(&self) -> &ValueResolver<'a> {
        &self.resolver
    }

    pub fn naming(&self) -> &dyn NamingStrategy {
        self.naming
    }

    /// Qualified name of the annotated type
    pub fn type_name(&self) -> &str {
        &self.element.name
    }

    // ====================================================================
    // Fields
    // ====================================================================

    /// Instance fields with their types specialized through the generic
    /// arguments, in declaration order
    pub fn fields(&self) -> Vec<(&'a FieldElement, TypeRef)> {
        self.element
            .instance_fields()
            .map(|f| (f, self.field_type(f)))
            .collect()
    }

    /// The concrete type of a field of the annotated type
    pub fn field_type(&self, field: &FieldElement) -> TypeRef {
        self.concrete(&field.ty)
    }

    /// Specialize a member type; variables left unbound become `Object`
    pub fn concrete(&self, declared: &TypeRef) -> TypeRef {
        erase_variables(&self.descriptor.specialize(declared))
    }

    // ====================================================================
    // Rendering helpers
    // ====================================================================

    /// Type name used in creation-method signatures (`Box<String>`)
    pub fn return_type(&self) -> String {
        self.descriptor.short_simple_name()
    }

    /// `new Order(..)`, with a diamond for generic fixtures
    pub fn constructor_call(&self, args: &[String]) -> String {
        let diamond = if self.descriptor.is_generic() { "<>" } else { "" };
        format!(
            "new {}{}({})",
            self.descriptor.simple_name_without_generic,
            diamond,
            args.join(", ")
        )
    }

    /// `Order.builder()`, with a type witness for generic fixtures
    pub fn static_call(&self, method: &str) -> String {
        format!(
            "{}.{}{}()",
            self.descriptor.simple_name_without_generic,
            self.descriptor.short_generic_text(),
            method
        )
    }

    /// Drop the fixture's own package from a qualified name
    pub fn relative_name(&self, qualified: &str) -> String {
        let package = &self.descriptor.package_name;
        if package.is_empty() {
            return qualified.to_string();
        }
        qualified
            .strip_prefix(package.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(qualified)
            .to_string()
    }

    /// Expand placeholders in an explicit value string
    pub fn expand(&self, value: &str, field: &str) -> FixtureResult<String> {
        let mut scope = self.resolver.new_scope();
        placeholder::expand(value, self.type_name(), field, &self.resolver, &mut scope)
    }
}

/// Replace type variables that survived specialization with `Object`
fn erase_variables(ty: &TypeRef) -> TypeRef {
    match ty {
        TypeRef::Variable(_) => TypeRef::declared(OBJECT_TYPE),
        TypeRef::Declared { name, args } => TypeRef::Declared {
            name: name.clone(),
            args: args.iter().map(erase_variables).collect(),
        },
        TypeRef::Array(component) => TypeRef::Array(Box::new(erase_variables(component))),
        TypeRef::Wildcard { bound, upper } => TypeRef::Wildcard {
            bound: bound.as_ref().map(|b| Box::new(erase_variables(b))),
            upper: *upper,
        },
        TypeRef::Primitive(_) => ty.clone(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{describe, describe_with_impls};
    use crate::naming::ScreamingSnakeNaming;
    use crate::provider::ProviderRegistry;
    use crate::resolve::ResolverSettings;
    use fixturegen_ir::TypeUniverse;
    use pretty_assertions::assert_eq;

    fn universe() -> TypeUniverse {
        TypeUniverse::from_elements(vec![
            TypeElement::class("com.acme.Box")
                .with_type_params(&["T"])
                .with_field(FieldElement::parse("boxedValue", "T").unwrap())
                .with_field(FieldElement::parse("history", "java.util.List<T>").unwrap()),
            TypeElement::class("com.acme.Order"),
        ])
        .unwrap()
    }

    #[test]
    fn test_generic_fixture_rendering() {
        let universe = universe();
        let element = universe.get("com.acme.Box").unwrap();
        let descriptor =
            describe_with_impls(element, &["java.lang.String".to_string()], &universe).unwrap();
        let resolver =
            ValueResolver::new(&universe, ProviderRegistry::new(), ResolverSettings::default());
        let ctx = GenerationContext::new(element, descriptor, resolver, &ScreamingSnakeNaming);

        assert_eq!(ctx.return_type(), "Box<String>");
        assert_eq!(ctx.constructor_call(&["A".to_string()]), "new Box<>(A)");
        assert_eq!(ctx.static_call("builder"), "Box.<String>builder()");

        let types: Vec<String> = ctx.fields().iter().map(|(_, t)| t.to_string()).collect();
        assert_eq!(types, vec!["java.lang.String", "java.util.List<java.lang.String>"]);
    }

    #[test]
    fn test_raw_fixture_erases_variables() {
        let universe = universe();
        let element = universe.get("com.acme.Box").unwrap();
        let descriptor = describe(&TypeRef::declared("com.acme.Box"), &universe).unwrap();
        let resolver =
            ValueResolver::new(&universe, ProviderRegistry::new(), ResolverSettings::default());
        let ctx = GenerationContext::new(element, descriptor, resolver, &ScreamingSnakeNaming);

        assert_eq!(ctx.return_type(), "Box");
        assert_eq!(ctx.constructor_call(&[]), "new Box()");
        let types: Vec<String> = ctx.fields().iter().map(|(_, t)| t.to_string()).collect();
        assert_eq!(types, vec!["java.lang.Object", "java.util.List<java.lang.Object>"]);
    }

    #[test]
    fn test_relative_name() {
        let universe = universe();
        let element = universe.get("com.acme.Order").unwrap();
        let descriptor = describe(&TypeRef::declared("com.acme.Order"), &universe).unwrap();
        let resolver =
            ValueResolver::new(&universe, ProviderRegistry::new(), ResolverSettings::default());
        let ctx = GenerationContext::new(element, descriptor, resolver, &ScreamingSnakeNaming);

        assert_eq!(ctx.relative_name("com.acme.Order.OrderBuilder"), "Order.OrderBuilder");
        assert_eq!(ctx.relative_name("com.acmecorp.Thing"), "com.acmecorp.Thing");
        assert_eq!(ctx.relative_name("org.other.Builder"), "org.other.Builder");
    }
}
