//! Type universe
//!
//! The [`TypeUniverse`] is the generator's window onto compile-time type
//! information: every declared element of the model, indexed by qualified
//! name, plus a catalogue of platform types that are always resolvable.

use fixturegen_core::{FixtureError, FixtureResult, PrimitiveKind};
use std::collections::HashMap;

use crate::element::TypeElement;
use crate::type_ref::TypeRef;

// ============================================================================
// Platform catalogue
// ============================================================================

/// Platform types known without being declared in the model, with their
/// generic parameter names
const PLATFORM_TYPES: &[(&str, &[&str])] = &[
    ("java.lang.Object", &[]),
    ("java.lang.String", &[]),
    ("java.lang.CharSequence", &[]),
    ("java.lang.Number", &[]),
    ("java.lang.Boolean", &[]),
    ("java.lang.Byte", &[]),
    ("java.lang.Character", &[]),
    ("java.lang.Short", &[]),
    ("java.lang.Integer", &[]),
    ("java.lang.Long", &[]),
    ("java.lang.Float", &[]),
    ("java.lang.Double", &[]),
    ("java.math.BigDecimal", &[]),
    ("java.math.BigInteger", &[]),
    ("java.time.Instant", &[]),
    ("java.time.Duration", &[]),
    ("java.time.LocalDate", &[]),
    ("java.time.LocalDateTime", &[]),
    ("java.time.LocalTime", &[]),
    ("java.time.OffsetDateTime", &[]),
    ("java.time.ZonedDateTime", &[]),
    ("java.util.Date", &[]),
    ("java.util.UUID", &[]),
    ("java.util.Optional", &["T"]),
    ("java.util.Collection", &["E"]),
    ("java.util.List", &["E"]),
    ("java.util.Set", &["E"]),
    ("java.util.Queue", &["E"]),
    ("java.util.Map", &["K", "V"]),
    ("java.util.ArrayList", &["E"]),
    ("java.util.HashSet", &["E"]),
    ("java.util.HashMap", &["K", "V"]),
    ("java.util.PriorityQueue", &["E"]),
];

fn platform_params(name: &str) -> Option<&'static [&'static str]> {
    PLATFORM_TYPES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, params)| *params)
}

// ============================================================================
// TypeUniverse
// ============================================================================

/// All declared elements of a model, indexed by qualified name
#[derive(Debug, Clone, Default)]
pub struct TypeUniverse {
    /// Elements in insertion order
    elements: Vec<TypeElement>,

    /// Lookup: qualified name → index into `elements`
    index: HashMap<String, usize>,
}

impl TypeUniverse {
    /// Create an empty universe
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a universe from elements, rejecting duplicate names
    pub fn from_elements(elements: Vec<TypeElement>) -> FixtureResult<Self> {
        let mut universe = Self::new();
        for element in elements {
            universe.insert(element)?;
        }
        Ok(universe)
    }

    /// Add an element
    ///
    /// Names of the element's type parameters used in member signatures are
    /// bound to type variables on the way in.
    pub fn insert(&mut self, mut element: TypeElement) -> FixtureResult<()> {
        if self.index.contains_key(&element.name) {
            return Err(FixtureError::model(format!(
                "type '{}' is declared more than once",
                element.name
            )));
        }
        element.bind_type_variables();
        self.index.insert(element.name.clone(), self.elements.len());
        self.elements.push(element);
        Ok(())
    }

    /// Builder-style insert for tests and programmatic models
    pub fn with(mut self, element: TypeElement) -> FixtureResult<Self> {
        self.insert(element)?;
        Ok(self)
    }

    // ====================================================================
    // Lookup
    // ====================================================================

    /// All elements in insertion order
    pub fn elements(&self) -> &[TypeElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get a declared element; generic arguments in `name` are ignored
    pub fn get(&self, name: &str) -> Option<&TypeElement> {
        let erased = name.split('<').next().unwrap_or(name).trim();
        self.index.get(erased).map(|&i| &self.elements[i])
    }

    /// Elements carrying the `Fixture` marker, in insertion order
    pub fn fixture_elements(&self) -> impl Iterator<Item = &TypeElement> {
        self.elements.iter().filter(|e| e.is_fixture())
    }

    /// Declared generic parameter names of a type
    ///
    /// `None` if the type is neither declared nor a known platform type.
    pub fn type_params(&self, name: &str) -> Option<Vec<String>> {
        if let Some(element) = self.get(name) {
            return Some(element.type_params.clone());
        }
        platform_params(name).map(|params| params.iter().map(|p| p.to_string()).collect())
    }

    /// Whether a qualified name (without generics) can be resolved
    pub fn is_known(&self, name: &str) -> bool {
        PrimitiveKind::from_keyword(name).is_some()
            || self.index.contains_key(name)
            || platform_params(name).is_some()
    }

    /// Parse type text and check every named type resolves
    pub fn resolve(&self, text: &str) -> FixtureResult<TypeRef> {
        let ty = TypeRef::parse(text)?;
        if let Some(unknown) = ty.declared_names().into_iter().find(|n| !self.is_known(n)) {
            return Err(FixtureError::unresolved(unknown));
        }
        Ok(ty)
    }
}

// ============================================================================
// Tests
// ============================================================================
