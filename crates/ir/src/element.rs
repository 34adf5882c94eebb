//! Declared elements
//!
//! [`TypeElement`], [`FieldElement`] and [`ExecutableElement`] are the
//! compile-time view of a declared type: what fields it has, which
//! constructors and methods it exposes, and which annotations sit on it.

use fixturegen_core::{ElementKind, FixtureResult, Modifier};
use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, BuilderFixture, ConstructorFixture};
use crate::type_ref::TypeRef;

// ============================================================================
// TypeElement
// ============================================================================

/// A declared class, record, interface or enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeElement {
    /// Fully qualified name without generic parameters
    pub name: String,

    #[serde(default)]
    pub kind: ElementKind,

    /// Declared generic parameter names, in order
    #[serde(default)]
    pub type_params: Vec<String>,

    #[serde(default)]
    pub fields: Vec<FieldElement>,

    #[serde(default)]
    pub constructors: Vec<ExecutableElement>,

    #[serde(default)]
    pub methods: Vec<ExecutableElement>,

    /// Enum constants in declaration order (enums only)
    #[serde(default)]
    pub enum_constants: Vec<String>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl TypeElement {
    /// Create an empty element
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            enum_constants: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Create an empty class
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, ElementKind::Class)
    }

    /// Create an enum with the given constants
    pub fn enumeration(name: impl Into<String>, constants: &[&str]) -> Self {
        let mut element = Self::new(name, ElementKind::Enum);
        element.enum_constants = constants.iter().map(|c| c.to_string()).collect();
        element
    }

    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_field(mut self, field: FieldElement) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_constructor(mut self, constructor: ExecutableElement) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_method(mut self, method: ExecutableElement) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    // ====================================================================
    // Names
    // ====================================================================

    /// Name after the last `.`
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Name before the last `.` (empty for the default package)
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('.').map(|(p, _)| p).unwrap_or("")
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    // ====================================================================
    // Members
    // ====================================================================

    /// Non-static fields in declaration order
    pub fn instance_fields(&self) -> impl Iterator<Item = &FieldElement> {
        self.fields.iter().filter(|f| !f.is_static())
    }

    pub fn field(&self, name: &str) -> Option<&FieldElement> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Public constructors in declaration order
    pub fn public_constructors(&self) -> impl Iterator<Item = &ExecutableElement> {
        self.constructors.iter().filter(|c| c.is_public())
    }

    /// A class declaring no constructor gets the default public no-arg one
    pub fn has_implicit_constructor(&self) -> bool {
        self.kind == ElementKind::Class && self.constructors.is_empty()
    }

    /// Public static methods in declaration order
    pub fn static_methods(&self) -> impl Iterator<Item = &ExecutableElement> {
        self.methods.iter().filter(|m| m.is_public() && m.is_static())
    }

    /// Public instance methods in declaration order
    pub fn instance_methods(&self) -> impl Iterator<Item = &ExecutableElement> {
        self.methods.iter().filter(|m| m.is_public() && !m.is_static())
    }

    // ====================================================================
    // Annotations
    // ====================================================================

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name() == name)
    }

    /// Generic implementation list of the `Fixture` marker, if present
    pub fn fixture_marker(&self) -> Option<&[String]> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::Fixture { generic_impls } => Some(generic_impls.as_slice()),
            _ => None,
        })
    }

    pub fn is_fixture(&self) -> bool {
        self.fixture_marker().is_some()
    }

    /// Constructor-style fixture annotations in declaration order
    pub fn constructor_fixtures(&self) -> impl Iterator<Item = &ConstructorFixture> {
        self.annotations.iter().filter_map(|a| match a {
            Annotation::FixtureConstructor(c) => Some(c),
            _ => None,
        })
    }

    /// Builder-style fixture annotations in declaration order
    pub fn builder_fixtures(&self) -> impl Iterator<Item = &BuilderFixture> {
        self.annotations.iter().filter_map(|a| match a {
            Annotation::FixtureBuilder(b) => Some(b),
            _ => None,
        })
    }

    /// `(target, expression)` pairs of the custom value provider annotations
    pub fn value_providers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.annotations.iter().filter_map(|a| match a {
            Annotation::FixtureValueProvider { target, expression } => {
                Some((target.as_str(), expression.as_str()))
            }
            _ => None,
        })
    }

    /// Bind names of declared type parameters to type variables in every
    /// member signature
    pub(crate) fn bind_type_variables(&mut self) {
        if self.type_params.is_empty() {
            return;
        }
        let params = self.type_params.clone();
        for field in &mut self.fields {
            field.ty = field.ty.bind_variables(&params);
        }
        for exec in self.constructors.iter_mut().chain(self.methods.iter_mut()) {
            for param in &mut exec.params {
                param.ty = param.ty.bind_variables(&params);
            }
            if let Some(ret) = exec.return_type.take() {
                exec.return_type = Some(ret.bind_variables(&params));
            }
        }
    }
}

// ============================================================================
// FieldElement
// ============================================================================

/// A field declared on a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldElement {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default)]
    pub modifiers: Vec<Modifier>,

    /// Source text of the compile-time constant initialiser, if any
    #[serde(default)]
    pub constant_value: Option<String>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FieldElement {
    /// Create a private field
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: vec![Modifier::Private],
            constant_value: None,
            annotations: Vec::new(),
        }
    }

    /// Create a private field from type text
    pub fn parse(name: impl Into<String>, ty: &str) -> FixtureResult<Self> {
        Ok(Self::new(name, TypeRef::parse(ty)?))
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        if !self.modifiers.contains(&modifier) {
            self.modifiers.push(modifier);
        }
        self
    }

    pub fn with_constant_value(mut self, value: impl Into<String>) -> Self {
        self.constant_value = Some(value.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(&Modifier::Final)
    }

    /// Final and not initialised with a compile-time constant
    pub fn is_required(&self) -> bool {
        self.is_final() && self.constant_value.is_none()
    }

    /// `(name, value)` pairs of the `FixtureConstant` annotations, in order
    pub fn constant_annotations(&self) -> Vec<(&str, Option<&str>)> {
        self.annotations
            .iter()
            .filter_map(|a| match a {
                Annotation::FixtureConstant { name, value } => {
                    Some((name.as_str(), value.as_deref()))
                }
                _ => None,
            })
            .collect()
    }
}

// ============================================================================
// ExecutableElement
// ============================================================================

/// A constructor or method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutableElement {
    pub name: String,

    #[serde(default)]
    pub modifiers: Vec<Modifier>,

    #[serde(default)]
    pub params: Vec<Parameter>,

    /// `None` for constructors and `void` methods
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

impl ExecutableElement {
    /// A public constructor
    pub fn constructor(params: Vec<Parameter>) -> Self {
        Self {
            name: "<init>".to_string(),
            modifiers: vec![Modifier::Public],
            params,
            return_type: None,
        }
    }

    /// A public instance method
    pub fn method(name: impl Into<String>, params: Vec<Parameter>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            modifiers: vec![Modifier::Public],
            params,
            return_type: Some(return_type),
        }
    }

    /// A public static method
    pub fn static_method(
        name: impl Into<String>,
        params: Vec<Parameter>,
        return_type: TypeRef,
    ) -> Self {
        let mut method = Self::method(name, params, return_type);
        method.modifiers.push(Modifier::Static);
        method
    }

    /// Replace the modifiers
    pub fn with_modifiers(mut self, modifiers: &[Modifier]) -> Self {
        self.modifiers = modifiers.to_vec();
        self
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.contains(&Modifier::Public)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    /// Erased name of the return type, if any
    pub fn returns(&self) -> Option<String> {
        self.return_type.as_ref().map(|t| t.erasure())
    }
}

/// A constructor or method parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
