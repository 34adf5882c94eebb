//! Fallback construction strategies for declared class types
//!
//! Each strategy either renders an instance expression or reports that it
//! does not apply. [`FallbackChain`] tries them in order and stops at the
//! first one that resolves.

use fixturegen_core::FixtureResult;
use fixturegen_ir::{
    Annotation, ExecutableElement, FieldElement, TypeElement, TypeRef,
};
use std::fmt;

use super::{Resolution, ResolutionScope, ValueResolver};
use crate::metadata::TypeDescriptor;

// ============================================================================
// InstanceTarget
// ============================================================================

/// The declared type a strategy is asked to construct
#[derive(Debug, Clone, Copy)]
pub struct InstanceTarget<'t> {
    pub element: &'t TypeElement,
    pub descriptor: &'t TypeDescriptor,
}

impl<'t> InstanceTarget<'t> {
    /// Resolve the value for one member of the target, specialized through
    /// the target's generic arguments
    pub fn value_for(
        &self,
        name: &str,
        declared: &TypeRef,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        let ty = self.descriptor.specialize(declared);
        resolver.resolve(&self.element.name, name, &ty, scope)
    }

    /// Resolve values for a list of fields, in order
    fn values_for<'f>(
        &self,
        fields: impl IntoIterator<Item = &'f FieldElement>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<Vec<String>> {
        fields
            .into_iter()
            .map(|f| self.value_for(&f.name, &f.ty, resolver, scope))
            .collect()
    }

    /// `new com.acme.Point(a, b)`, with a diamond for generic targets
    pub fn constructor_call(&self, args: &[String]) -> String {
        let diamond = if self.descriptor.is_generic() { "<>" } else { "" };
        format!(
            "new {}{}({})",
            self.descriptor.qualified_name_without_generic,
            diamond,
            args.join(", ")
        )
    }

    /// `com.acme.Box.<java.lang.String>builder()`, with an explicit type
    /// witness for generic targets
    pub fn static_call(&self, method: &str) -> String {
        format!(
            "{}.{}{}()",
            self.descriptor.qualified_name_without_generic, self.descriptor.generic_text, method
        )
    }
}

// ============================================================================
// InstanceStrategy
// ============================================================================

/// One way of constructing a default instance of a declared type
pub trait InstanceStrategy: fmt::Debug + Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn try_resolve(
        &self,
        target: &InstanceTarget<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<Resolution>;
}

/// Keep the first item with the greatest width
fn widest<T>(items: impl IntoIterator<Item = T>, width: impl Fn(&T) -> usize) -> Option<T> {
    let mut best: Option<(usize, T)> = None;
    for item in items {
        let w = width(&item);
        if best.as_ref().is_none_or(|(best_width, _)| w > *best_width) {
            best = Some((w, item));
        }
    }
    best.map(|(_, item)| item)
}

// ============================================================================
// 1. Explicit fixture annotations
// ============================================================================

/// Delegates to a creation method of the target's own fixture class
///
/// Constructor-style annotations are considered before builder-style ones.
/// Within a kind the annotation with the most constants or setters wins;
/// ties go to the one declared first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitFixtureStrategy;

impl InstanceStrategy for ExplicitFixtureStrategy {
    fn name(&self) -> &'static str {
        "explicit-fixture"
    }

    fn try_resolve(
        &self,
        target: &InstanceTarget<'_>,
        _resolver: &ValueResolver<'_>,
        _scope: &mut ResolutionScope,
    ) -> FixtureResult<Resolution> {
        let fixture = &target.descriptor.fixture_name;

        if let Some(chosen) = widest(target.element.constructor_fixtures(), |c| c.arity()) {
            return Ok(Resolution::Resolved(format!(
                "{}.{}()",
                fixture, chosen.method_name
            )));
        }

        let field_count = target.element.instance_fields().count();
        let chosen = widest(target.element.builder_fixtures(), |b| {
            if b.setters.is_empty() {
                field_count
            } else {
                b.setters.len()
            }
        });

        Ok(match chosen {
            Some(builder) if builder.as_builder => Resolution::Resolved(format!(
                "{}.{}().{}()",
                fixture, builder.method_name, builder.build_method
            )),
            Some(builder) => {
                Resolution::Resolved(format!("{}.{}()", fixture, builder.method_name))
            }
            None => Resolution::NotApplicable,
        })
    }
}

// ============================================================================
// 2. Generated builder convention
// ============================================================================

/// `Type.builder().a(..).b(..).build()` for types marked with a generated
/// builder
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionBuilderStrategy;

impl InstanceStrategy for ConventionBuilderStrategy {
    fn name(&self) -> &'static str {
        "convention-builder"
    }

    fn try_resolve(
        &self,
        target: &InstanceTarget<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<Resolution> {
        if !target.element.has_annotation(Annotation::GeneratedBuilder.name()) {
            return Ok(Resolution::NotApplicable);
        }

        let mut expression = target.static_call("builder");
        for field in target.element.instance_fields() {
            let value = target.value_for(&field.name, &field.ty, resolver, scope)?;
            expression.push_str(&format!(".{}({})", field.name, value));
        }
        expression.push_str(".build()");
        Ok(Resolution::Resolved(expression))
    }
}

// ============================================================================
// 3. Constructor conventions
// ============================================================================

/// `new Type(..)` for types marked with an all-args, required-args or
/// no-args constructor, checked in that order
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionConstructorStrategy;

impl InstanceStrategy for ConventionConstructorStrategy {
    fn name(&self) -> &'static str {
        "convention-constructor"
    }

    fn try_resolve(
        &self,
        target: &InstanceTarget<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<Resolution> {
        let element = target.element;

        let args = if element.has_annotation(Annotation::AllArgsConstructor.name()) {
            target.values_for(element.instance_fields(), resolver, scope)?
        } else if element.has_annotation(Annotation::RequiredArgsConstructor.name()) {
            let required = element.instance_fields().filter(|f| f.is_required());
            target.values_for(required, resolver, scope)?
        } else if element.has_annotation(Annotation::NoArgsConstructor.name()) {
            Vec::new()
        } else {
            return Ok(Resolution::NotApplicable);
        };

        Ok(Resolution::Resolved(target.constructor_call(&args)))
    }
}

// ============================================================================
// 4. Public constructors
// ============================================================================

/// `new Type(..)` through the widest public constructor (first on a tie)
///
/// A class without declared constructors uses its implicit no-arg one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicConstructorStrategy;

impl InstanceStrategy for PublicConstructorStrategy {
    fn name(&self) -> &'static str {
        "public-constructor"
    }

    fn try_resolve(
        &self,
        target: &InstanceTarget<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<Resolution> {
        let Some(constructor) = widest(target.element.public_constructors(), |c| c.params.len())
        else {
            if target.element.has_implicit_constructor() {
                return Ok(Resolution::Resolved(target.constructor_call(&[])));
            }
            return Ok(Resolution::NotApplicable);
        };

        let args = constructor
            .params
            .iter()
            .map(|p| target.value_for(&p.name, &p.ty, resolver, scope))
            .collect::<FixtureResult<Vec<_>>>()?;
        Ok(Resolution::Resolved(target.constructor_call(&args)))
    }
}

// ============================================================================
// 5. Hand-written builders
// ============================================================================

/// Detects a hand-written builder from method signatures
///
/// Needs a public static no-arg method on the target returning another
/// declared type, and a public no-arg instance method on that type returning
/// the target. Each target field is then matched to a one-argument builder
/// method named like it; unmatched fields are left out of the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualBuilderStrategy;

impl ManualBuilderStrategy {
    fn find_setter<'b>(
        builder: &'b TypeElement,
        field: &str,
        build: &ExecutableElement,
    ) -> Option<&'b ExecutableElement> {
        let field = field.to_lowercase();
        let candidates: Vec<&ExecutableElement> = builder
            .instance_methods()
            .filter(|m| m.params.len() == 1 && m.name != build.name)
            .collect();

        candidates
            .iter()
            .find(|m| m.name.to_lowercase() == field)
            .or_else(|| {
                candidates
                    .iter()
                    .find(|m| m.name.to_lowercase().ends_with(&field))
            })
            .copied()
    }
}

impl InstanceStrategy for ManualBuilderStrategy {
    fn name(&self) -> &'static str {
        "manual-builder"
    }

    fn try_resolve(
        &self,
        target: &InstanceTarget<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<Resolution> {
        let element = target.element;

        for entry in element.static_methods().filter(|m| m.params.is_empty()) {
            let Some(builder_name) = entry.returns() else {
                continue;
            };
            if builder_name == element.name {
                continue;
            }
            let Some(builder) = resolver.universe().get(&builder_name) else {
                continue;
            };
            let Some(build) = builder.instance_methods().find(|m| {
                m.params.is_empty() && m.returns().as_deref() == Some(element.name.as_str())
            }) else {
                continue;
            };

            let mut expression = target.static_call(&entry.name);
            for field in element.instance_fields() {
                let Some(setter) = Self::find_setter(builder, &field.name, build) else {
                    continue;
                };
                let value = target.value_for(&field.name, &field.ty, resolver, scope)?;
                expression.push_str(&format!(".{}({})", setter.name, value));
            }
            expression.push_str(&format!(".{}()", build.name));
            return Ok(Resolution::Resolved(expression));
        }

        Ok(Resolution::NotApplicable)
    }
}

// ============================================================================
// FallbackChain
// ============================================================================

/// Ordered list of construction strategies
#[derive(Debug)]
pub struct FallbackChain {
    strategies: Vec<Box<dyn InstanceStrategy>>,
}

impl FallbackChain {
    pub fn new(strategies: Vec<Box<dyn InstanceStrategy>>) -> Self {
        Self { strategies }
    }

    /// explicit → generated builder → constructor conventions → public
    /// constructor → hand-written builder
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ExplicitFixtureStrategy),
            Box::new(ConventionBuilderStrategy),
            Box::new(ConventionConstructorStrategy),
            Box::new(PublicConstructorStrategy),
            Box::new(ManualBuilderStrategy),
        ])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// First resolution produced by a strategy, or not-applicable
    pub fn resolve(
        &self,
        element: &TypeElement,
        descriptor: &TypeDescriptor,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<Resolution> {
        let target = InstanceTarget {
            element,
            descriptor,
        };

        for strategy in &self.strategies {
            let resolution = strategy.try_resolve(&target, resolver, scope)?;
            if resolution.is_resolved() {
                tracing::debug!(
                    type_name = %descriptor.qualified_name,
                    strategy = strategy.name(),
                    "resolved instance"
                );
                return Ok(resolution);
            }
        }

        tracing::debug!(
            type_name = %descriptor.qualified_name,
            "no construction strategy applies"
        );
        Ok(Resolution::NotApplicable)
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================
