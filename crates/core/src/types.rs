//! Core types used throughout the fixture generator
//!
//! These enums describe the small closed vocabularies of the host language's
//! type system that every other crate needs to agree on.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PrimitiveKind
// ============================================================================

/// A primitive type of the host language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// All primitive kinds in declaration order
    pub fn all() -> &'static [PrimitiveKind] {
        &[
            PrimitiveKind::Boolean,
            PrimitiveKind::Byte,
            PrimitiveKind::Char,
            PrimitiveKind::Short,
            PrimitiveKind::Int,
            PrimitiveKind::Long,
            PrimitiveKind::Float,
            PrimitiveKind::Double,
        ]
    }

    /// Source keyword (`int`, `boolean`, ...)
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    /// Qualified name of the boxed counterpart
    pub fn boxed_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "java.lang.Boolean",
            PrimitiveKind::Byte => "java.lang.Byte",
            PrimitiveKind::Char => "java.lang.Character",
            PrimitiveKind::Short => "java.lang.Short",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Double => "java.lang.Double",
        }
    }

    /// Parse a source keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.keyword() == keyword)
    }

    /// Find the primitive whose boxed counterpart has the given qualified name
    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.boxed_name() == name)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ============================================================================
// ElementKind
// ============================================================================

/// Kind of a declared type element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Class,
    Record,
    Interface,
    Enum,
}

impl ElementKind {
    /// Whether instances can be produced with `new` or a builder
    pub fn is_instantiable(&self) -> bool {
        matches!(self, ElementKind::Class | ElementKind::Record)
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Class => "class",
            ElementKind::Record => "record",
            ElementKind::Interface => "interface",
            ElementKind::Enum => "enum",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Modifier
// ============================================================================

/// Declaration modifier on a field, constructor or method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Transient,
    Volatile,
}

impl Modifier {
    /// Source keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ============================================================================
// Tests
// ============================================================================
