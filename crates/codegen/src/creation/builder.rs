//! Builder-style creation methods: `Order.builder().orderId(ORDER_ID).build()`

use fixturegen_core::FixtureResult;
use fixturegen_ir::BuilderFixture;

use super::{CreationMethod, CreationStrategy, matching_constants};
use crate::constants::ConstantTable;
use crate::context::GenerationContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderCreation;

impl BuilderCreation {
    /// `(setter, value)` pairs of one annotation
    ///
    /// With no explicit setters every constant is used, named after its
    /// field. Constant keys are all checked before any literal is expanded.
    fn setter_calls(
        ctx: &GenerationContext<'_>,
        constants: &ConstantTable,
        annotation: &BuilderFixture,
    ) -> FixtureResult<Vec<(String, String)>> {
        if annotation.setters.is_empty() {
            return Ok(constants
                .constants()
                .map(|c| (c.field_name.clone(), c.name.clone()))
                .collect());
        }

        let keys = annotation
            .setters
            .iter()
            .filter(|s| !s.literal)
            .map(|s| s.value.as_str());
        let mut matched = matching_constants(ctx, constants, &annotation.describe(), keys)?
            .into_iter();

        annotation
            .setters
            .iter()
            .map(|setter| -> FixtureResult<(String, String)> {
                let value = if setter.literal {
                    ctx.expand(&setter.value, &setter.setter)?
                } else {
                    // One matched constant per non-literal setter, same order.
                    matched
                        .next()
                        .map(|c| c.name.clone())
                        .unwrap_or_default()
                };
                Ok((setter.setter.clone(), value))
            })
            .collect()
    }

    /// Builder type returned by the entry method
    ///
    /// Taken from the declared entry method when the model has it, otherwise
    /// the generated-builder naming convention `Order.OrderBuilder`.
    fn builder_type(ctx: &GenerationContext<'_>, annotation: &BuilderFixture) -> String {
        let declared = ctx
            .element()
            .static_methods()
            .find(|m| m.name == annotation.builder_method && m.params.is_empty())
            .and_then(|m| m.return_type.as_ref());

        match declared {
            Some(ty) => ctx.relative_name(&ctx.concrete(ty).short_display()),
            None => {
                let descriptor = ctx.descriptor();
                format!(
                    "{0}.{0}Builder{1}",
                    descriptor.simple_name_without_generic,
                    descriptor.short_generic_text()
                )
            }
        }
    }
}

impl CreationStrategy for BuilderCreation {
    fn name(&self) -> &'static str {
        "builder"
    }

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        constants: &ConstantTable,
    ) -> FixtureResult<Vec<CreationMethod>> {
        ctx.element()
            .builder_fixtures()
            .map(|annotation| -> FixtureResult<CreationMethod> {
                let mut expression = ctx.static_call(&annotation.builder_method);
                for (setter, value) in Self::setter_calls(ctx, constants, annotation)? {
                    expression.push_str(&format!(".{}({})", setter, value));
                }

                let return_type = if annotation.as_builder {
                    Self::builder_type(ctx, annotation)
                } else {
                    expression.push_str(&format!(".{}()", annotation.build_method));
                    ctx.return_type()
                };

                Ok(CreationMethod {
                    return_type,
                    name: annotation.method_name.clone(),
                    expression,
                })
            })
            .collect()
    }
}
