//! Structural validation of the type model
//!
//! These checks catch malformed models before generation starts. They do not
//! look at whether a fixture can actually be generated; that is decided per
//! type by the generator.

use crate::{Annotation, TypeElement, TypeUniverse};
use fixturegen_core::{FixtureError, FixtureResult, Validatable};
use std::collections::HashSet;

impl Validatable for TypeElement {
    fn validate(&self) -> FixtureResult<()> {
        if self.name.trim().is_empty() {
            return Err(FixtureError::model("type name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(FixtureError::model(format!(
                    "type '{}' declares a field with an empty name",
                    self.name
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(FixtureError::model(format!(
                    "field '{}' is declared more than once in '{}'",
                    field.name, self.name
                )));
            }
        }

        let mut params = HashSet::new();
        for param in &self.type_params {
            if !params.insert(param.as_str()) {
                return Err(FixtureError::model(format!(
                    "type parameter '{}' is declared more than once in '{}'",
                    param, self.name
                )));
            }
        }

        for annotation in &self.annotations {
            let method_name = match annotation {
                Annotation::FixtureConstructor(c) => Some(&c.method_name),
                Annotation::FixtureBuilder(b) => Some(&b.method_name),
                _ => None,
            };
            if method_name.is_some_and(|m| m.trim().is_empty()) {
                return Err(FixtureError::model(format!(
                    "@{} on '{}' has an empty method name",
                    annotation.name(),
                    self.name
                )));
            }
        }

        Ok(())
    }
}

impl Validatable for TypeUniverse {
    fn validate(&self) -> FixtureResult<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(FixtureError::model(errors.join("; ")))
        }
    }

    fn validation_errors(&self) -> Vec<String> {
        self.elements()
            .iter()
            .filter_map(|e| e.validate().err())
            .map(|e| e.to_string())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
