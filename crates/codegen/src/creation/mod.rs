//! # Creation Methods
//!
//! Factory methods of a fixture class, one per constructor-style or
//! builder-style annotation on the annotated type. Constructor-style methods
//! come first, then builder-style ones, each in declaration order.
//!
//! Every constant key an annotation references is checked before anything
//! is rendered; one unknown key fails the whole annotation.

mod builder;
mod constructor;

pub use builder::BuilderCreation;
pub use constructor::ConstructorCreation;

use fixturegen_core::{FixtureError, FixtureResult};
use std::collections::HashSet;

use crate::constants::{Constant, ConstantTable};
use crate::context::GenerationContext;

/// One generated `public static` factory method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationMethod {
    /// Rendered return type (`Order`, `Box<String>`, `Order.OrderBuilder`)
    pub return_type: String,

    pub name: String,

    /// Expression after `return`
    pub expression: String,
}

/// Produces the creation methods for one annotation kind
pub trait CreationStrategy {
    fn name(&self) -> &'static str;

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
        constants: &ConstantTable,
    ) -> FixtureResult<Vec<CreationMethod>>;
}

/// Look up every key before rendering
pub(crate) fn matching_constants<'t>(
    ctx: &GenerationContext<'_>,
    constants: &'t ConstantTable,
    annotation: &str,
    keys: impl IntoIterator<Item = &'t str>,
) -> FixtureResult<Vec<&'t Constant>> {
    keys.into_iter()
        .map(|key| {
            constants
                .get(key)
                .ok_or_else(|| FixtureError::UnknownConstant {
                    type_name: ctx.type_name().to_string(),
                    annotation: annotation.to_string(),
                    key: key.to_string(),
                })
        })
        .collect()
}

/// Run the standard strategies and check method names are unique
pub fn generate_creation_methods(
    ctx: &GenerationContext<'_>,
    constants: &ConstantTable,
) -> FixtureResult<Vec<CreationMethod>> {
    let strategies: [&dyn CreationStrategy; 2] = [&ConstructorCreation, &BuilderCreation];

    let mut methods = Vec::new();
    for strategy in strategies {
        let generated = strategy.generate(ctx, constants)?;
        tracing::debug!(
            type_name = %ctx.type_name(),
            strategy = strategy.name(),
            count = generated.len(),
            "creation methods"
        );
        methods.extend(generated);
    }

    let mut seen = HashSet::new();
    for method in &methods {
        if !seen.insert(method.name.as_str()) {
            return Err(FixtureError::config(format!(
                "Duplicate creation method '{}' on '{}'",
                method.name,
                ctx.type_name()
            )));
        }
    }

    Ok(methods)
}
