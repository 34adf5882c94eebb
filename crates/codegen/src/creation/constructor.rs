//! Constructor-style creation methods: `new Order(ORDER_ID, TOTAL)`

use fixturegen_core::FixtureResult;

use super::{CreationMethod, CreationStrategy, matching_constants};
use crate::constants::ConstantTable;
use crate::context::GenerationContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructorCreation;

impl CreationStrategy for ConstructorCreation {
    fn name(&self) -> &'static str {
        "constructor"
    }

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        constants: &ConstantTable,
    ) -> FixtureResult<Vec<CreationMethod>> {
        ctx.element()
            .constructor_fixtures()
            .map(|annotation| -> FixtureResult<CreationMethod> {
                let args: Vec<String> = matching_constants(
                    ctx,
                    constants,
                    &annotation.describe(),
                    annotation.constants.iter().map(String::as_str),
                )?
                .into_iter()
                .map(|c| c.name.clone())
                .collect();

                Ok(CreationMethod {
                    return_type: ctx.return_type(),
                    name: annotation.method_name.clone(),
                    expression: ctx.constructor_call(&args),
                })
            })
            .collect()
    }
}
