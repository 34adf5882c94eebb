//! Placeholder expansion
//!
//! Value strings may embed `${TypeName}` or `#{TypeName}` tokens. Each one
//! is replaced, left to right, by the default value resolved for the named
//! type. A name that does not resolve is an error.

use fixturegen_core::{FixtureError, FixtureResult};
use regex::Regex;
use std::sync::LazyLock;

use crate::resolve::{ResolutionScope, ValueResolver};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[$#]\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Whether `value` contains at least one placeholder token
pub fn has_placeholders(value: &str) -> bool {
    PLACEHOLDER.is_match(value)
}

/// Type names referenced by the placeholders of `value`, in order
pub fn referenced_types(value: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(value)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .collect()
}

/// Replace every placeholder of `value` with the resolved default of its type
pub fn expand(
    value: &str,
    owner: &str,
    field: &str,
    resolver: &ValueResolver<'_>,
    scope: &mut ResolutionScope,
) -> FixtureResult<String> {
    let mut out = String::with_capacity(value.len());
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(value) {
        let (Some(token), Some(type_name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        let ty = resolver.universe().resolve(type_name.as_str().trim()).map_err(|_| {
            FixtureError::UnresolvedPlaceholder {
                placeholder: token.as_str().to_string(),
                value: value.to_string(),
            }
        })?;

        out.push_str(&value[last..token.start()]);
        out.push_str(&resolver.resolve(owner, field, &ty, scope)?);
        last = token.end();
    }

    out.push_str(&value[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderRegistry;
    use crate::resolve::ResolverSettings;
    use fixturegen_ir::{Annotation, FieldElement, TypeElement, TypeUniverse};
    use pretty_assertions::assert_eq;

    fn universe() -> TypeUniverse {
        TypeUniverse::from_elements(vec![
            TypeElement::class("com.acme.Tag")
                .with_annotation(Annotation::AllArgsConstructor)
                .with_field(FieldElement::parse("tagLabel", "java.lang.String").unwrap()),
        ])
        .unwrap()
    }

    fn expand_text(universe: &TypeUniverse, value: &str) -> FixtureResult<String> {
        let resolver =
            ValueResolver::new(universe, ProviderRegistry::new(), ResolverSettings::default());
        let mut scope = resolver.new_scope();
        expand(value, "com.acme.Order", "orderTotal", &resolver, &mut scope)
    }

    #[test]
    fn test_plain_value_is_unchanged() {
        assert_eq!(expand_text(&universe(), "42L").unwrap(), "42L");
        assert!(!has_placeholders("42L"));
    }

    #[test]
    fn test_both_token_styles_fill_left_to_right() {
        let value = "java.util.Map.of(${java.lang.Integer}, #{java.math.BigDecimal})";
        assert!(has_placeholders(value));
        assert_eq!(
            referenced_types(value),
            vec!["java.lang.Integer", "java.math.BigDecimal"]
        );
        assert_eq!(
            expand_text(&universe(), value).unwrap(),
            "java.util.Map.of(0, java.math.BigDecimal.ZERO)"
        );
    }

    #[test]
    fn test_declared_type_placeholder() {
        assert_eq!(
            expand_text(&universe(), "java.util.List.of(${com.acme.Tag})").unwrap(),
            "java.util.List.of(new com.acme.Tag(\"TAG_LABEL_VALUE\"))"
        );
    }

    #[test]
    fn test_unknown_type_is_error() {
        let err = expand_text(&universe(), "wrap(${com.acme.Nope})").unwrap_err();
        match err {
            FixtureError::UnresolvedPlaceholder { placeholder, value } => {
                assert_eq!(placeholder, "${com.acme.Nope}");
                assert_eq!(value, "wrap(${com.acme.Nope})");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
