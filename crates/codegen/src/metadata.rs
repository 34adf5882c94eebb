//! # Type Metadata
//!
//! Normalizes a type use into a [`TypeDescriptor`]: qualified and simple
//! names with and without generic arguments, the package, the derived
//! fixture class name and the mapping from declared type parameters to the
//! concrete arguments at this use site.
//!
//! Descriptors are built on demand for every field or type that needs a
//! value and are never cached; compilation is single-pass and the types
//! involved are small.

use fixturegen_core::{FixtureError, FixtureResult};
use fixturegen_ir::{TypeElement, TypeRef, TypeUniverse};
use std::collections::HashMap;

/// Suffix appended to a type's erased name to form its fixture class name
pub const FIXTURE_SUFFIX: &str = "Fixture";

// ============================================================================
// TypeDescriptor
// ============================================================================

/// A resolved type at a point of use
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// `com.acme.Box<java.lang.String>`
    pub qualified_name: String,

    /// `com.acme.Box`
    pub qualified_name_without_generic: String,

    /// `Box<java.lang.String>`
    pub simple_name: String,

    /// `Box`
    pub simple_name_without_generic: String,

    /// `com.acme` (empty for the default package)
    pub package_name: String,

    /// `com.acme.BoxFixture`
    pub fixture_name: String,

    /// `<java.lang.String>` or empty
    pub generic_text: String,

    /// Declared type parameter → concrete argument
    pub generic_map: HashMap<String, TypeRef>,

    /// The type this descriptor was built from
    pub type_ref: TypeRef,
}

impl TypeDescriptor {
    /// Whether the use site carries generic arguments
    pub fn is_generic(&self) -> bool {
        !self.generic_text.is_empty()
    }

    /// Simple name of the generated fixture class (`BoxFixture`)
    pub fn fixture_simple_name(&self) -> String {
        format!("{}{}", self.simple_name_without_generic, FIXTURE_SUFFIX)
    }

    /// Simple name with `java.lang.` dropped from the arguments (`Box<String>`)
    pub fn short_simple_name(&self) -> String {
        let args: Vec<String> = self
            .type_ref
            .args()
            .iter()
            .map(|a| a.short_display())
            .collect();
        if args.is_empty() {
            self.simple_name_without_generic.clone()
        } else {
            format!("{}<{}>", self.simple_name_without_generic, args.join(", "))
        }
    }

    /// Generic arguments with `java.lang.` dropped, as a `<A, B>` witness
    pub fn short_generic_text(&self) -> String {
        let args: Vec<String> = self
            .type_ref
            .args()
            .iter()
            .map(|a| a.short_display())
            .collect();
        if args.is_empty() {
            String::new()
        } else {
            format!("<{}>", args.join(", "))
        }
    }

    /// Specialize a member's declared type through the generic map
    ///
    /// A field declared as `T` on `Box<T>` becomes `java.lang.String` when
    /// this descriptor describes `Box<java.lang.String>`.
    pub fn specialize(&self, declared: &TypeRef) -> TypeRef {
        declared.substitute(&self.generic_map)
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Build a descriptor for a type use, inferring generic arguments from it
pub fn describe(ty: &TypeRef, universe: &TypeUniverse) -> FixtureResult<TypeDescriptor> {
    // Arrays of parameterized types cannot be created, so array descriptors
    // are always erased.
    let qualified_name = match ty {
        TypeRef::Array(_) => ty.erasure(),
        _ => ty.to_string(),
    };
    let (erased, generic_text) = match qualified_name.find('<') {
        Some(i) => (
            qualified_name[..i].to_string(),
            qualified_name[i..].to_string(),
        ),
        None => (qualified_name.clone(), String::new()),
    };

    let (package_name, simple_erased) = match erased.rsplit_once('.') {
        Some((package, simple)) => (package.to_string(), simple.to_string()),
        None => (String::new(), erased.clone()),
    };

    let generic_map = if generic_text.is_empty() {
        HashMap::new()
    } else {
        generic_map(&erased, ty.args(), universe)?
    };

    Ok(TypeDescriptor {
        simple_name: format!("{}{}", simple_erased, generic_text),
        simple_name_without_generic: simple_erased,
        fixture_name: format!("{}{}", erased, FIXTURE_SUFFIX),
        package_name,
        qualified_name_without_generic: erased,
        qualified_name,
        generic_text,
        generic_map,
        type_ref: match ty {
            TypeRef::Array(_) => TypeRef::parse(&ty.erasure())?,
            _ => ty.clone(),
        },
    })
}

/// Build a descriptor for a declared element with an explicit list of
/// generic implementation type names
///
/// An empty list describes the element as written (raw if it is generic).
/// A non-empty list must match the declared parameter count and every name
/// must resolve.
pub fn describe_with_impls(
    element: &TypeElement,
    impls: &[String],
    universe: &TypeUniverse,
) -> FixtureResult<TypeDescriptor> {
    if impls.is_empty() {
        return describe(&TypeRef::declared(&element.name), universe);
    }
    if impls.len() != element.type_params.len() {
        return Err(FixtureError::GenericArityMismatch {
            type_name: element.name.clone(),
            expected: element.type_params.len(),
            found: impls.len(),
        });
    }
    let args = impls
        .iter()
        .map(|name| universe.resolve(name))
        .collect::<FixtureResult<Vec<_>>>()?;
    describe(&TypeRef::generic(&element.name, args), universe)
}

fn generic_map(
    erased: &str,
    args: &[TypeRef],
    universe: &TypeUniverse,
) -> FixtureResult<HashMap<String, TypeRef>> {
    // Types outside the model keep positional parameter names so the map
    // still mirrors the argument list.
    let params = universe
        .type_params(erased)
        .unwrap_or_else(|| (0..args.len()).map(|i| format!("${}", i)).collect());

    if params.len() != args.len() {
        return Err(FixtureError::GenericArityMismatch {
            type_name: erased.to_string(),
            expected: params.len(),
            found: args.len(),
        });
    }

    Ok(params.into_iter().zip(args.iter().cloned()).collect())
}

// ============================================================================
// Tests
// ============================================================================
