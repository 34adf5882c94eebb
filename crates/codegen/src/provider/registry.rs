//! Provider registry
//!
//! Two layers: caller overrides, then the built-in defaults. The defaults
//! are built once per process and shared by every registry; overrides live
//! on the registry instance and always win.

use fixturegen_core::PrimitiveKind;
use fixturegen_ir::TypeRef;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use super::ValueProvider;
use super::builtin::{
    ContainerKind, ContainerProvider, LiteralProvider, StringProvider, UuidProvider,
};
use crate::metadata::TypeDescriptor;

type ProviderTable = HashMap<&'static str, Arc<dyn ValueProvider>>;

static DEFAULTS: LazyLock<ProviderTable> = LazyLock::new(default_table);

fn primitive_default(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "false",
        PrimitiveKind::Byte => "0",
        PrimitiveKind::Char => "' '",
        PrimitiveKind::Short => "Short.valueOf((short)0)",
        PrimitiveKind::Int => "0",
        PrimitiveKind::Long => "0L",
        PrimitiveKind::Float => "0.0F",
        PrimitiveKind::Double => "0.0",
    }
}

fn put(table: &mut ProviderTable, names: &[&'static str], provider: Arc<dyn ValueProvider>) {
    for name in names {
        table.insert(*name, Arc::clone(&provider));
    }
}

fn default_table() -> ProviderTable {
    let mut table = ProviderTable::new();

    for kind in PrimitiveKind::all() {
        put(
            &mut table,
            &[kind.keyword(), kind.boxed_name()],
            Arc::new(LiteralProvider(primitive_default(*kind))),
        );
    }

    put(&mut table, &["java.lang.String"], Arc::new(StringProvider));
    put(&mut table, &["java.util.UUID"], Arc::new(UuidProvider));

    let values: &[(&'static str, &'static str)] = &[
        ("java.math.BigDecimal", "java.math.BigDecimal.ZERO"),
        ("java.math.BigInteger", "java.math.BigInteger.ZERO"),
        ("java.time.Instant", "java.time.Instant.now()"),
        ("java.time.Duration", "java.time.Duration.ZERO"),
        ("java.time.LocalDate", "java.time.LocalDate.now()"),
        ("java.time.LocalDateTime", "java.time.LocalDateTime.now()"),
        ("java.time.LocalTime", "java.time.LocalTime.now()"),
        ("java.util.Date", "new java.util.Date()"),
    ];
    for &(name, value) in values {
        put(&mut table, &[name], Arc::new(LiteralProvider(value)));
    }

    let containers: &[(&'static str, ContainerKind)] = &[
        ("java.util.List", ContainerKind::List),
        ("java.util.Set", ContainerKind::Set),
        ("java.util.Collection", ContainerKind::Collection),
        ("java.util.Map", ContainerKind::Map),
        ("java.util.Queue", ContainerKind::Queue),
    ];
    for &(name, kind) in containers {
        put(&mut table, &[name], Arc::new(ContainerProvider::new(kind)));
    }

    table
}

/// Normalize a type name so overrides match rendered descriptor names
fn normalize(type_name: &str) -> String {
    TypeRef::parse(type_name)
        .map(|t| t.to_string())
        .unwrap_or_else(|_| type_name.trim().to_string())
}

// ============================================================================
// ProviderRegistry
// ============================================================================

/// Type name → value provider, overrides first
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    overrides: HashMap<String, Arc<dyn ValueProvider>>,
}

impl ProviderRegistry {
    /// A registry holding only the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a caller override (builder style)
    pub fn with_override(
        mut self,
        type_name: impl AsRef<str>,
        provider: Arc<dyn ValueProvider>,
    ) -> Self {
        self.insert_override(type_name, provider);
        self
    }

    /// Add or replace a caller override
    pub fn insert_override(&mut self, type_name: impl AsRef<str>, provider: Arc<dyn ValueProvider>) {
        self.overrides.insert(normalize(type_name.as_ref()), provider);
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Whether any layer has a provider for exactly this name
    pub fn contains_key(&self, type_name: &str) -> bool {
        self.get(type_name).is_some()
    }

    /// Provider for exactly this name, override layer first
    pub fn get(&self, type_name: &str) -> Option<&Arc<dyn ValueProvider>> {
        let key = normalize(type_name);
        self.overrides
            .get(&key)
            .or_else(|| DEFAULTS.get(key.as_str()))
    }

    /// Find the provider for a type use
    ///
    /// Overrides are checked with the full name and then the erased name
    /// before the defaults are checked the same way.
    pub fn lookup(&self, descriptor: &TypeDescriptor) -> Option<&Arc<dyn ValueProvider>> {
        let exact = descriptor.qualified_name.as_str();
        let erased = descriptor.qualified_name_without_generic.as_str();

        self.overrides
            .get(exact)
            .or_else(|| self.overrides.get(erased))
            .or_else(|| DEFAULTS.get(exact))
            .or_else(|| DEFAULTS.get(erased))
    }

    /// Names covered by the built-in layer, sorted
    pub fn default_keys() -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = DEFAULTS.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

// ============================================================================
// Tests
// ============================================================================
