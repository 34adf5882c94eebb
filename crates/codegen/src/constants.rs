//! # Constant Generation
//!
//! Builds the ordered table of constants for one fixture class. Every
//! instance field of the annotated type contributes either one derived
//! constant or one constant per `FixtureConstant` annotation on it.
//!
//! The table keeps insertion order: creation methods that use "all
//! constants" render their setters in this order.

use fixturegen_core::{FixtureError, FixtureResult};
use std::collections::HashMap;

use crate::context::GenerationContext;

// ============================================================================
// Constant
// ============================================================================

/// One `public static final` field of a fixture class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    /// Declared Java type, fully qualified
    pub ty: String,

    /// Identifier of the constant
    pub name: String,

    /// Source-level value expression
    pub value: String,

    /// Field of the annotated type the constant came from
    pub field_name: String,
}

// ============================================================================
// ConstantTable
// ============================================================================

/// Constants of one fixture, keyed by logical key, in insertion order
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    type_name: String,
    entries: Vec<(String, Constant)>,
    by_key: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl ConstantTable {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Add a constant; a repeated key or constant name is an error
    pub fn insert(&mut self, key: impl Into<String>, constant: Constant) -> FixtureResult<()> {
        let key = key.into();
        if self.by_key.contains_key(&key) {
            return Err(self.duplicate(key));
        }
        if self.by_name.contains_key(&constant.name) {
            return Err(self.duplicate(constant.name));
        }

        let index = self.entries.len();
        self.by_key.insert(key.clone(), index);
        self.by_name.insert(constant.name.clone(), index);
        self.entries.push((key, constant));
        Ok(())
    }

    fn duplicate(&self, key: String) -> FixtureError {
        FixtureError::DuplicateConstant {
            type_name: self.type_name.clone(),
            key,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Constant> {
        self.by_key.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// `(key, constant)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Constant)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn constants(&self) -> impl Iterator<Item = &Constant> {
        self.entries.iter().map(|(_, c)| c)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Build the constant table of the annotated type
pub fn generate_constants(ctx: &GenerationContext<'_>) -> FixtureResult<ConstantTable> {
    let owner = ctx.type_name();
    let resolver = ctx.resolver();
    let mut table = ConstantTable::new(owner);

    for (field, ty) in ctx.fields() {
        let explicit = field.constant_annotations();

        if explicit.is_empty() {
            let constant = Constant {
                ty: ty.to_string(),
                name: ctx.naming().rename(&field.name)?,
                value: resolver.resolve_constant(owner, &field.name, &ty)?,
                field_name: field.name.clone(),
            };
            tracing::debug!(field = %field.name, constant = %constant.name, "derived constant");
            table.insert(field.name.clone(), constant)?;
            continue;
        }

        for (name, value) in explicit {
            let value = match value {
                Some(value) => ctx.expand(value, &field.name)?,
                None => resolver.resolve_constant(owner, &field.name, &ty)?,
            };
            tracing::debug!(field = %field.name, constant = %name, "explicit constant");
            table.insert(
                name,
                Constant {
                    ty: ty.to_string(),
                    name: name.to_string(),
                    value,
                    field_name: field.name.clone(),
                },
            )?;
        }
    }

    Ok(table)
}

// ============================================================================
// Tests
// ============================================================================
