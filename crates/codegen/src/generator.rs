//! # Fixture Generator Orchestrator
//!
//! The `FixtureGenerator` is the top-level entry point. It takes a
//! [`TypeUniverse`] and a [`GeneratorConfig`] and produces one fixture class
//! per type carrying the `Fixture` marker.
//!
//! ## Pipeline
//!
//! ```text
//! TypeUniverse + GeneratorConfig
//!         │
//!         ├──► validate model                     (hard error)
//!         ├──► compile script callbacks           (hard error)
//!         │
//!         ▼  for each annotated type
//!   describe_with_impls() → registry → GenerationContext
//!         │
//!         ├──► constants::generate_constants()
//!         ├──► creation::generate_creation_methods()
//!         ├──► render::render_fixture()
//!         │
//!         ▼
//!   GeneratedFixtures { files, diagnostics }
//! ```
//!
//! An error while generating one type becomes a [`Diagnostic`] for that type
//! and generation continues with the next one.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fixturegen_codegen::{FixtureGenerator, GeneratorConfig};
//! use fixturegen_ir::load_model;
//!
//! let universe = load_model("model.json")?.into_universe()?;
//! let result = FixtureGenerator::new(GeneratorConfig::default()).generate(&universe)?;
//!
//! println!("Generated {} files", result.file_count());
//! result.write_to_disk("/path/to/output")?;
//! ```

use chrono::Utc;
use fixturegen_core::{FixtureError, FixtureResult, ResultExt, Validatable};
use fixturegen_ir::{TypeElement, TypeUniverse};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::constants::{ConstantTable, generate_constants};
use crate::context::GenerationContext;
use crate::creation::{CreationMethod, generate_creation_methods};
use crate::metadata::{TypeDescriptor, describe_with_impls};
use crate::naming::{NamingStrategy, ScreamingSnakeNaming};
use crate::provider::{ProviderRegistry, TemplateProvider, ValueProvider};
use crate::render::{fixture_path, render_fixture};
use crate::resolve::{ResolverSettings, ValueResolver};
use crate::script::{CallbackProvider, ExprEngine, ScriptEngine};
use crate::{GeneratedFile, GeneratedFixtures, GeneratorConfig};

// ============================================================================
// Fixture
// ============================================================================

/// Everything generated for one annotated type, before rendering
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Qualified name of the annotated type
    pub type_name: String,
    pub descriptor: TypeDescriptor,
    pub constants: ConstantTable,
    pub methods: Vec<CreationMethod>,
}

/// A generation failure attached to one annotated type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Qualified name of the annotated type
    pub element: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.element, self.message)
    }
}

// ============================================================================
// CompiledCallbacks
// ============================================================================

type CompiledEntry = (String, Arc<dyn ValueProvider>);

/// Script callbacks compiled once per run
#[derive(Debug, Clone, Default)]
pub struct CompiledCallbacks {
    /// From configuration, applied to every type
    global: Vec<CompiledEntry>,

    /// From `FixtureValueProvider` annotations, keyed by declaring type
    per_type: HashMap<String, Vec<CompiledEntry>>,
}

impl CompiledCallbacks {
    /// Compile every configured and annotated callback
    pub fn compile(
        engine: &dyn ScriptEngine,
        config: &GeneratorConfig,
        universe: &TypeUniverse,
    ) -> FixtureResult<Self> {
        let mut compiled = Self::default();

        for (target, source) in &config.callbacks {
            let provider = CallbackProvider::compile(engine, source)?;
            compiled.global.push((target.clone(), Arc::new(provider)));
        }

        for element in universe.elements() {
            for (target, source) in element.value_providers() {
                let provider = CallbackProvider::compile(engine, source)?;
                compiled
                    .per_type
                    .entry(element.name.clone())
                    .or_default()
                    .push((target.to_string(), Arc::new(provider)));
            }
        }

        tracing::debug!(
            engine = engine.name(),
            global = compiled.global.len(),
            per_type = compiled.per_type.values().map(Vec::len).sum::<usize>(),
            "compiled callbacks"
        );
        Ok(compiled)
    }

    pub fn len(&self) -> usize {
        self.global.len() + self.per_type.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn for_type(&self, type_name: &str) -> impl Iterator<Item = &CompiledEntry> {
        self.global
            .iter()
            .chain(self.per_type.get(type_name).into_iter().flatten())
    }
}

// ============================================================================
// FixtureGenerator
// ============================================================================

/// Top-level fixture generator
///
/// Stateless aside from its configuration, naming strategy and script
/// engine. Every call to [`generate`](FixtureGenerator::generate) compiles
/// callbacks afresh.
pub struct FixtureGenerator {
    config: GeneratorConfig,
    naming: Box<dyn NamingStrategy>,
    engine: Box<dyn ScriptEngine>,
}

impl FixtureGenerator {
    // ====================================================================
    // Construction
    // ====================================================================

    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            naming: Box::new(ScreamingSnakeNaming),
            engine: Box::new(ExprEngine),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Replace the script engine used for callbacks
    pub fn with_engine(mut self, engine: Box<dyn ScriptEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the constant naming strategy
    pub fn with_naming(mut self, naming: Box<dyn NamingStrategy>) -> Self {
        self.naming = naming;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Generate the fixture classes of every annotated type
    ///
    /// # Errors
    ///
    /// An invalid model or a callback that fails to compile stops the run.
    /// Failures of individual types are reported as diagnostics instead.
    pub fn generate(&self, universe: &TypeUniverse) -> FixtureResult<GeneratedFixtures> {
        universe.validate()?;
        let callbacks = CompiledCallbacks::compile(self.engine.as_ref(), &self.config, universe)?;

        let mut result = GeneratedFixtures::default();
        for element in universe.fixture_elements() {
            match self.build_fixture(element, universe, &callbacks) {
                Ok(fixture) => {
                    tracing::info!(
                        type_name = %fixture.type_name,
                        constants = fixture.constants.len(),
                        methods = fixture.methods.len(),
                        "generated fixture"
                    );
                    result.add_file(self.render(&fixture));
                }
                Err(e) => {
                    tracing::warn!(type_name = %element.name, error = %e, "fixture generation failed");
                    result.add_diagnostic(Diagnostic {
                        element: element.name.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            files = result.file_count(),
            diagnostics = result.diagnostics.len(),
            "generation complete"
        );
        Ok(result)
    }

    /// Build the fixture of one type without rendering it
    ///
    /// The type does not need the `Fixture` marker; without one it is
    /// described as written.
    pub fn inspect(&self, universe: &TypeUniverse, type_name: &str) -> FixtureResult<Fixture> {
        let element = universe
            .get(type_name)
            .ok_or_else(|| FixtureError::unresolved(type_name))?;
        let callbacks = CompiledCallbacks::compile(self.engine.as_ref(), &self.config, universe)?;
        self.build_fixture(element, universe, &callbacks)
    }

    /// Generate and write every file under the configured output directory
    pub fn generate_and_write(&self, universe: &TypeUniverse) -> FixtureResult<GeneratedFixtures> {
        let result = self.generate(universe)?;
        result.write_to_disk(&self.config.output_dir)?;
        Ok(result)
    }

    fn build_fixture(
        &self,
        element: &TypeElement,
        universe: &TypeUniverse,
        callbacks: &CompiledCallbacks,
    ) -> FixtureResult<Fixture> {
        let impls = element.fixture_marker().unwrap_or_default();
        let descriptor = describe_with_impls(element, impls, universe)?;

        let settings = ResolverSettings {
            max_depth: self.config.max_depth,
            populate_containers: self.config.populate_containers,
        };
        let resolver = ValueResolver::new(universe, self.registry_for(element, callbacks), settings);
        let ctx = GenerationContext::new(element, descriptor, resolver, self.naming.as_ref());

        let constants = generate_constants(&ctx)?;
        let methods = generate_creation_methods(&ctx, &constants)?;

        Ok(Fixture {
            type_name: element.name.clone(),
            descriptor: ctx.descriptor().clone(),
            constants,
            methods,
        })
    }

    /// Overrides for one type: templates, then global callbacks, then the
    /// type's own callbacks, later entries replacing earlier ones
    fn registry_for(&self, element: &TypeElement, callbacks: &CompiledCallbacks) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        for (type_name, template) in &self.config.providers {
            registry.insert_override(type_name, Arc::new(TemplateProvider::new(template.clone())));
        }
        for (type_name, provider) in callbacks.for_type(&element.name) {
            registry.insert_override(type_name, Arc::clone(provider));
        }
        registry
    }

    fn render(&self, fixture: &Fixture) -> GeneratedFile {
        let generated_at = self.config.emit_generated_annotation.then(Utc::now);
        GeneratedFile::java(
            fixture_path(&fixture.descriptor),
            render_fixture(fixture, generated_at),
        )
    }
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for FixtureGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureGenerator")
            .field("config", &self.config)
            .field("naming", &self.naming)
            .field("engine", &self.engine.name())
            .finish()
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Generate with the default configuration
pub fn generate(universe: &TypeUniverse) -> FixtureResult<GeneratedFixtures> {
    FixtureGenerator::with_defaults().generate(universe)
}

/// Generate with the default configuration and write to `output_dir`
pub fn generate_to_dir(
    universe: &TypeUniverse,
    output_dir: impl Into<std::path::PathBuf>,
) -> FixtureResult<GeneratedFixtures> {
    let output_dir = output_dir.into();
    let config = GeneratorConfig::default().with_output_dir(&output_dir);
    FixtureGenerator::new(config)
        .generate_and_write(universe)
        .with_context(format!("Generating fixtures into {}", output_dir.display()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fixturegen_ir::{Annotation, ConstructorFixture, FieldElement};
    use pretty_assertions::assert_eq;

    fn fixture_marker() -> Annotation {
        Annotation::Fixture {
            generic_impls: vec![],
        }
    }

    fn universe() -> TypeUniverse {
        TypeUniverse::from_elements(vec![
            TypeElement::class("com.acme.Customer")
                .with_annotation(fixture_marker())
                .with_field(FieldElement::parse("customerName", "java.lang.String").unwrap())
                .with_field(FieldElement::parse("contactEmail", "com.acme.Email").unwrap())
                .with_annotation(Annotation::FixtureConstructor(ConstructorFixture::new(
                    "defaultCustomer",
                    &["customerName", "contactEmail"],
                ))),
            TypeElement::class("com.acme.Broken")
                .with_annotation(fixture_marker())
                .with_field(FieldElement::parse("name", "java.lang.String").unwrap()),
            TypeElement::class("com.acme.Email"),
        ])
        .unwrap()
    }

    #[test]
    fn test_failed_type_becomes_diagnostic() {
        let result = generate(&universe()).unwrap();
        assert_eq!(result.file_count(), 1);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].element, "com.acme.Broken");
        assert!(result.diagnostics[0].message.contains("'name'"));
        assert!(result.has_diagnostics());
    }

    #[test]
    fn test_config_template_overrides_default() {
        let config = GeneratorConfig::default()
            .with_provider("com.acme.Email", "new com.acme.Email(${java.lang.String})");
        let fixture = FixtureGenerator::new(config)
            .inspect(&universe(), "com.acme.Customer")
            .unwrap();
        assert_eq!(
            fixture.constants.get("contactEmail").unwrap().value,
            "new com.acme.Email(\"CONTACT_EMAIL_VALUE\")"
        );
    }

    #[test]
    fn test_type_callback_beats_global_callback() {
        let universe = universe()
            .with(
                TypeElement::class("com.acme.Account")
                    .with_annotation(fixture_marker())
                    .with_annotation(Annotation::FixtureValueProvider {
                        target: "java.lang.String".to_string(),
                        expression: "quote(lower(field.name))".to_string(),
                    })
                    .with_field(FieldElement::parse("accountName", "java.lang.String").unwrap()),
            )
            .unwrap();
        let config =
            GeneratorConfig::default().with_callback("java.lang.String", "quote(upper(field.name))");
        let generator = FixtureGenerator::new(config);

        let account = generator.inspect(&universe, "com.acme.Account").unwrap();
        assert_eq!(account.constants.get("accountName").unwrap().value, "\"accountname\"");

        let customer = generator.inspect(&universe, "com.acme.Customer").unwrap();
        assert_eq!(customer.constants.get("customerName").unwrap().value, "\"CUSTOMERNAME\"");
    }

    #[test]
    fn test_bad_callback_aborts_run() {
        let config = GeneratorConfig::default().with_callback("java.lang.String", "upper(");
        let err = FixtureGenerator::new(config).generate(&universe()).unwrap_err();
        assert!(matches!(err, FixtureError::ScriptCompile { .. }));
    }

    #[test]
    fn test_inspect_unknown_type() {
        let err = FixtureGenerator::with_defaults()
            .inspect(&universe(), "com.acme.Nope")
            .unwrap_err();
        assert!(matches!(err, FixtureError::UnresolvedType(ref n) if n == "com.acme.Nope"));
    }

    #[test]
    fn test_generated_annotation_toggle() {
        let config = GeneratorConfig::default().without_generated_annotation();
        let result = FixtureGenerator::new(config).generate(&universe()).unwrap();
        assert!(!result.files[0].content.contains("@javax.annotation.processing.Generated"));

        let result = generate(&universe()).unwrap();
        assert!(result.files[0].content.contains("@javax.annotation.processing.Generated"));
    }
}
