//! Built-in value providers

use fixturegen_core::FixtureResult;
use heck::ToShoutySnakeCase;
use uuid::Uuid;

use super::{ValueProvider, ValueRequest};
use crate::placeholder;
use crate::resolve::{NULL_VALUE, ResolutionScope, ValueResolver};

// ============================================================================
// LiteralProvider
// ============================================================================

/// A fixed expression, independent of the field
#[derive(Debug, Clone)]
pub struct LiteralProvider(pub &'static str);

impl ValueProvider for LiteralProvider {
    fn provide(
        &self,
        _request: &ValueRequest<'_>,
        _resolver: &ValueResolver<'_>,
        _scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        Ok(self.0.to_string())
    }
}

// ============================================================================
// StringProvider
// ============================================================================

/// `"<FIELD_NAME>_VALUE"`
#[derive(Debug, Clone, Default)]
pub struct StringProvider;

impl ValueProvider for StringProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        _resolver: &ValueResolver<'_>,
        _scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        Ok(format!("\"{}_VALUE\"", request.field.to_shouty_snake_case()))
    }
}

// ============================================================================
// UuidProvider
// ============================================================================

/// `java.util.UUID.fromString("...")` with a name-based UUID
///
/// The UUID is derived from the owning type and field so repeated runs
/// render the same constant.
#[derive(Debug, Clone, Default)]
pub struct UuidProvider;

impl UuidProvider {
    pub fn uuid_for(owner: &str, field: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{}#{}", owner, field).as_bytes())
    }
}

impl ValueProvider for UuidProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        _resolver: &ValueResolver<'_>,
        _scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        Ok(format!(
            "java.util.UUID.fromString(\"{}\")",
            Self::uuid_for(request.owner, request.field)
        ))
    }
}

// ============================================================================
// ContainerProvider
// ============================================================================

/// The standard container shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    List,
    Set,
    Collection,
    Map,
    Queue,
}

impl ContainerKind {
    /// Empty literal of this shape
    pub fn empty(&self) -> &'static str {
        match self {
            ContainerKind::List | ContainerKind::Collection => "java.util.List.of()",
            ContainerKind::Set => "java.util.Set.of()",
            ContainerKind::Map => "java.util.Map.of()",
            ContainerKind::Queue => "new java.util.PriorityQueue<>()",
        }
    }

    /// Literal holding the given elements (for maps, one key and one value)
    pub fn populated(&self, values: &[String]) -> String {
        let values = values.join(", ");
        match self {
            ContainerKind::List | ContainerKind::Collection => {
                format!("java.util.List.of({})", values)
            }
            ContainerKind::Set => format!("java.util.Set.of({})", values),
            ContainerKind::Map => format!("java.util.Map.of({})", values),
            // Queue has no static factory; wrap a list.
            ContainerKind::Queue => {
                format!("new java.util.PriorityQueue<>(java.util.List.of({}))", values)
            }
        }
    }
}

/// Container default
///
/// Renders the empty literal unless populating is enabled and the value is
/// for a constant of the annotated type; then one value per generic
/// argument is resolved and placed in the container.
#[derive(Debug, Clone)]
pub struct ContainerProvider {
    pub kind: ContainerKind,
}

impl ContainerProvider {
    pub fn new(kind: ContainerKind) -> Self {
        Self { kind }
    }
}

impl ValueProvider for ContainerProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        let args = request.ty.args();
        if !(resolver.settings().populate_containers && request.top_level) || args.is_empty() {
            return Ok(self.kind.empty().to_string());
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            let value = resolver.resolve(request.owner, request.field, arg, scope)?;
            // Immutable factories reject null elements at runtime.
            if value == NULL_VALUE {
                return Ok(self.kind.empty().to_string());
            }
            values.push(value);
        }
        Ok(self.kind.populated(&values))
    }
}

// ============================================================================
// EnumProvider
// ============================================================================

/// First declared constant, `com.acme.Color.RED`; `null` for an empty enum
#[derive(Debug, Clone, Default)]
pub struct EnumProvider;

impl ValueProvider for EnumProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        resolver: &ValueResolver<'_>,
        _scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        let erased = &request.descriptor.qualified_name_without_generic;
        let first = resolver
            .universe()
            .get(erased)
            .and_then(|e| e.enum_constants.first());
        Ok(match first {
            Some(constant) => format!("{}.{}", erased, constant),
            None => NULL_VALUE.to_string(),
        })
    }
}

// ============================================================================
// ArrayProvider
// ============================================================================

/// Always an empty array: `new com.acme.Item[] {}`
#[derive(Debug, Clone, Default)]
pub struct ArrayProvider;

impl ValueProvider for ArrayProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        _resolver: &ValueResolver<'_>,
        _scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        Ok(match request.ty.component() {
            Some(component) => format!("new {}[] {{}}", component.erasure()),
            None => NULL_VALUE.to_string(),
        })
    }
}

// ============================================================================
// TemplateProvider
// ============================================================================

/// A caller-supplied expression, with `${Type}` / `#{Type}` placeholders
/// expanded through the resolver
#[derive(Debug, Clone)]
pub struct TemplateProvider {
    pub template: String,
}

impl TemplateProvider {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl ValueProvider for TemplateProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        resolver: &ValueResolver<'_>,
        scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        placeholder::expand(&self.template, request.owner, request.field, resolver, scope)
    }

    fn reenters_resolver(&self) -> bool {
        placeholder::has_placeholders(&self.template)
    }
}

// ============================================================================
// Tests
// ============================================================================
