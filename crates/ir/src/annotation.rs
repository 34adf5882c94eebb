//! Annotation schemas
//!
//! These are the annotations the generator reads from declared types and
//! fields. Only their data is modelled here; what each one means for value
//! resolution and method generation lives in the codegen crate.

use serde::{Deserialize, Serialize};

// ============================================================================
// Annotation
// ============================================================================

/// An annotation occurrence on a type or a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "annotation")]
pub enum Annotation {
    /// Marks a type for fixture generation
    ///
    /// `generic_impls` lists concrete type names for the type's own generic
    /// parameters, positionally.
    Fixture {
        #[serde(default)]
        generic_impls: Vec<String>,
    },

    /// Emit a named constant from the annotated field (repeatable)
    FixtureConstant {
        name: String,
        #[serde(default)]
        value: Option<String>,
    },

    /// Custom value callback for one exact type (repeatable, type level)
    FixtureValueProvider { target: String, expression: String },

    /// Generate a constructor-style creation method (repeatable)
    FixtureConstructor(ConstructorFixture),

    /// Generate a builder-style creation method (repeatable)
    FixtureBuilder(BuilderFixture),

    /// Convention marker: a no-arg `builder()` over all fields is generated
    GeneratedBuilder,

    /// Convention marker: a constructor over all fields is generated
    AllArgsConstructor,

    /// Convention marker: a constructor over uninitialised final fields is generated
    RequiredArgsConstructor,

    /// Convention marker: a no-argument constructor is generated
    NoArgsConstructor,
}

impl Annotation {
    /// Short name used in log lines and diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Annotation::Fixture { .. } => "Fixture",
            Annotation::FixtureConstant { .. } => "FixtureConstant",
            Annotation::FixtureValueProvider { .. } => "FixtureValueProvider",
            Annotation::FixtureConstructor(_) => "FixtureConstructor",
            Annotation::FixtureBuilder(_) => "FixtureBuilder",
            Annotation::GeneratedBuilder => "GeneratedBuilder",
            Annotation::AllArgsConstructor => "AllArgsConstructor",
            Annotation::RequiredArgsConstructor => "RequiredArgsConstructor",
            Annotation::NoArgsConstructor => "NoArgsConstructor",
        }
    }
}

// ============================================================================
// ConstructorFixture
// ============================================================================

/// Constructor-style creation method: `new Type(c1, c2, ...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorFixture {
    /// Name of the generated method
    pub method_name: String,

    /// Constant keys passed as constructor arguments, in order
    #[serde(default)]
    pub constants: Vec<String>,
}

impl ConstructorFixture {
    pub fn new(method_name: impl Into<String>, constants: &[&str]) -> Self {
        Self {
            method_name: method_name.into(),
            constants: constants.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Number of constructor arguments
    pub fn arity(&self) -> usize {
        self.constants.len()
    }

    /// Source-like rendering for diagnostics
    pub fn describe(&self) -> String {
        format!("@FixtureConstructor(methodName = \"{}\")", self.method_name)
    }
}

// ============================================================================
// BuilderFixture
// ============================================================================

fn default_builder_method() -> String {
    "builder".to_string()
}

fn default_build_method() -> String {
    "build".to_string()
}

/// Builder-style creation method: `Type.builder().a(A).b(B).build()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderFixture {
    /// Name of the generated method
    pub method_name: String,

    /// Static entry point on the target type
    #[serde(default = "default_builder_method")]
    pub builder_method: String,

    /// Terminal method on the builder
    #[serde(default = "default_build_method")]
    pub build_method: String,

    /// Setter calls in order; empty means one setter per constant
    #[serde(default)]
    pub setters: Vec<BuilderSetter>,

    /// Return the builder itself instead of calling the build method
    #[serde(default)]
    pub as_builder: bool,
}

impl BuilderFixture {
    /// A builder fixture using `builder()` / `build()` over every constant
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            builder_method: default_builder_method(),
            build_method: default_build_method(),
            setters: Vec::new(),
            as_builder: false,
        }
    }

    pub fn with_setter(mut self, setter: BuilderSetter) -> Self {
        self.setters.push(setter);
        self
    }

    pub fn with_builder_method(mut self, name: impl Into<String>) -> Self {
        self.builder_method = name.into();
        self
    }

    pub fn with_build_method(mut self, name: impl Into<String>) -> Self {
        self.build_method = name.into();
        self
    }

    pub fn as_builder(mut self) -> Self {
        self.as_builder = true;
        self
    }

    /// Source-like rendering for diagnostics
    pub fn describe(&self) -> String {
        format!("@FixtureBuilder(methodName = \"{}\")", self.method_name)
    }
}

/// One setter call of a builder-style creation method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSetter {
    /// Setter method name on the builder
    pub setter: String,

    /// Constant key, or a literal expression when `literal` is set
    pub value: String,

    /// Use `value` verbatim (after placeholder resolution) instead of a constant
    #[serde(default)]
    pub literal: bool,
}

impl BuilderSetter {
    /// Setter fed by a constant of the fixture
    pub fn constant(setter: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            setter: setter.into(),
            value: key.into(),
            literal: false,
        }
    }

    /// Setter fed by an explicit value
    pub fn literal(setter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            setter: setter.into(),
            value: value.into(),
            literal: true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
