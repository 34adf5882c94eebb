//! # Constant Naming
//!
//! Turns a field name into the name of the constant that holds its default
//! value: `orderId` becomes `ORDER_ID`.

use fixturegen_core::{FixtureError, FixtureResult};
use heck::ToShoutySnakeCase;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Multi-word lowerCamelCase: a lowercase head followed by capitalized words
static FIELD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]+([A-Z][a-z0-9]+)+$").expect("field name pattern is valid")
});

/// Field name → constant name transform
pub trait NamingStrategy: fmt::Debug + Send + Sync {
    fn rename(&self, field_name: &str) -> FixtureResult<String>;
}

/// lowerCamelCase → SCREAMING_SNAKE_CASE with strict input validation
///
/// Anything other than a multi-word lowerCamelCase identifier is rejected:
/// single words, PascalCase and snake_case all fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreamingSnakeNaming;

impl NamingStrategy for ScreamingSnakeNaming {
    fn rename(&self, field_name: &str) -> FixtureResult<String> {
        if !FIELD_NAME.is_match(field_name) {
            return Err(FixtureError::InvalidFieldName(field_name.to_string()));
        }
        Ok(field_name.to_shouty_snake_case())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rename_multi_word() {
        let naming = ScreamingSnakeNaming;
        assert_eq!(naming.rename("stringField").unwrap(), "STRING_FIELD");
        assert_eq!(naming.rename("uuidField").unwrap(), "UUID_FIELD");
        assert_eq!(
            naming.rename("shippingAddressLine").unwrap(),
            "SHIPPING_ADDRESS_LINE"
        );
    }

    #[test]
    fn test_rename_rejects_non_conforming() {
        let naming = ScreamingSnakeNaming;
        for name in [
            "value",
            "StringField",
            "string_field",
            "STRING_FIELD",
            "stringFIELD",
            "",
        ] {
            let err = naming.rename(name).unwrap_err();
            assert!(matches!(err, FixtureError::InvalidFieldName(_)), "{}", name);
        }
    }

    proptest! {
        #[test]
        fn rename_matches_word_split(
            head in "[a-z]{1,8}",
            words in proptest::collection::vec("[A-Z][a-z]{1,8}", 1..4),
        ) {
            let field = format!("{}{}", head, words.concat());
            let mut expected = vec![head.to_uppercase()];
            expected.extend(words.iter().map(|w| w.to_uppercase()));

            let renamed = ScreamingSnakeNaming.rename(&field).unwrap();
            prop_assert_eq!(renamed, expected.join("_"));
        }

        #[test]
        fn rename_rejects_single_words(word in "[a-z]{1,12}") {
            prop_assert!(ScreamingSnakeNaming.rename(&word).is_err());
        }

        #[test]
        fn rename_rejects_snake_case(a in "[a-z]{1,6}", b in "[a-z]{1,6}") {
            let field = format!("{}_{}", a, b);
            prop_assert!(ScreamingSnakeNaming.rename(&field).is_err());
        }
    }
}
