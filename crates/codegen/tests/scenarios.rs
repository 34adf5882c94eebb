//! End-to-end generation scenarios over small type models

use fixturegen_codegen::provider::UuidProvider;
use fixturegen_codegen::{FixtureGenerator, GeneratorConfig, generate};
use fixturegen_core::{FixtureError, Modifier};
use fixturegen_ir::{
    Annotation, BuilderFixture, BuilderSetter, ConstructorFixture, FieldElement, TypeElement,
    TypeUniverse, parse_model,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn fixture() -> Annotation {
    Annotation::Fixture {
        generic_impls: vec![],
    }
}

fn field(name: &str, ty: &str) -> FieldElement {
    FieldElement::parse(name, ty).unwrap()
}

fn generator() -> FixtureGenerator {
    FixtureGenerator::new(GeneratorConfig::default().without_generated_annotation())
}

// ============================================================================
// Scenario A: constructor factory over four constants
// ============================================================================

#[test]
fn scenario_constructor_factory() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Sample")
            .with_annotation(fixture())
            .with_field(field("stringField", "java.lang.String"))
            .with_field(field("intField", "int"))
            .with_field(field("booleanField", "boolean"))
            .with_field(field("uuidField", "java.util.UUID"))
            .with_annotation(Annotation::FixtureConstructor(ConstructorFixture::new(
                "createSample",
                &["stringField", "intField", "booleanField", "uuidField"],
            ))),
    ])
    .unwrap();

    let result = generator().generate(&universe).unwrap();
    assert!(!result.has_diagnostics());

    let uuid = UuidProvider::uuid_for("com.acme.Sample", "uuidField");
    let expected = format!(
        r#"package com.acme;

public final class SampleFixture {{

    public static final java.lang.String STRING_FIELD = "STRING_FIELD_VALUE";

    public static final int INT_FIELD = 0;

    public static final boolean BOOLEAN_FIELD = false;

    public static final java.util.UUID UUID_FIELD = java.util.UUID.fromString("{uuid}");

    private SampleFixture() {{
    }}

    public static Sample createSample() {{
        return new Sample(STRING_FIELD, INT_FIELD, BOOLEAN_FIELD, UUID_FIELD);
    }}
}}
"#
    );

    let file = result.file("com/acme/SampleFixture.java").unwrap();
    assert_eq!(file.content, expected);
}

// ============================================================================
// Scenario B: generated builder convention
// ============================================================================

fn address() -> TypeElement {
    TypeElement::class("com.acme.Address")
        .with_annotation(Annotation::GeneratedBuilder)
        .with_field(field("streetName", "java.lang.String"))
        .with_field(field("houseNumber", "int"))
}

#[test]
fn scenario_builder_factory() {
    let universe = TypeUniverse::from_elements(vec![
        address()
            .with_annotation(fixture())
            .with_annotation(Annotation::FixtureBuilder(BuilderFixture::new("defaultAddress"))),
    ])
    .unwrap();

    let fixture = generator().inspect(&universe, "com.acme.Address").unwrap();
    assert_eq!(fixture.methods.len(), 1);
    assert_eq!(
        fixture.methods[0].expression,
        "Address.builder().streetName(STREET_NAME).houseNumber(HOUSE_NUMBER).build()"
    );
    assert_eq!(
        fixture.constants.get("streetName").unwrap().value,
        "\"STREET_NAME_VALUE\""
    );
    assert_eq!(fixture.constants.get("houseNumber").unwrap().value, "0");
}

#[test]
fn scenario_builder_convention_for_nested_type() {
    let universe = TypeUniverse::from_elements(vec![
        address(),
        TypeElement::class("com.acme.Customer")
            .with_annotation(fixture())
            .with_field(field("homeAddress", "com.acme.Address")),
    ])
    .unwrap();

    let fixture = generator().inspect(&universe, "com.acme.Customer").unwrap();
    assert_eq!(
        fixture.constants.get("homeAddress").unwrap().value,
        "com.acme.Address.builder().streetName(\"STREET_NAME_VALUE\").houseNumber(0).build()"
    );
}

// ============================================================================
// Scenario C: generic type with an explicit implementation
// ============================================================================

#[test]
fn scenario_generic_fixture() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Box")
            .with_type_params(&["T"])
            .with_annotation(Annotation::Fixture {
                generic_impls: vec!["java.lang.String".to_string()],
            })
            .with_field(field("boxedValue", "T"))
            .with_annotation(Annotation::FixtureConstructor(ConstructorFixture::new(
                "filledBox",
                &["boxedValue"],
            )))
            .with_annotation(Annotation::FixtureBuilder(BuilderFixture::new("builtBox"))),
    ])
    .unwrap();

    let fixture = generator().inspect(&universe, "com.acme.Box").unwrap();
    let constant = fixture.constants.get("boxedValue").unwrap();
    assert_eq!(constant.ty, "java.lang.String");
    assert_eq!(constant.name, "BOXED_VALUE");
    assert_eq!(constant.value, "\"BOXED_VALUE_VALUE\"");

    let rendered: Vec<(&str, &str)> = fixture
        .methods
        .iter()
        .map(|m| (m.return_type.as_str(), m.expression.as_str()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("Box<String>", "new Box<>(BOXED_VALUE)"),
            ("Box<String>", "Box.<String>builder().boxedValue(BOXED_VALUE).build()"),
        ]
    );
}

#[test]
fn generic_impl_count_mismatch_is_diagnostic() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Pair")
            .with_type_params(&["A", "B"])
            .with_annotation(Annotation::Fixture {
                generic_impls: vec!["java.lang.String".to_string()],
            })
            .with_field(field("leftValue", "A")),
    ])
    .unwrap();

    let result = generate(&universe).unwrap();
    assert_eq!(result.file_count(), 0);
    assert!(result.diagnostics[0].message.contains("declared 2 parameter(s), got 1"));
}

#[test]
fn generic_impl_must_resolve() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Box")
            .with_type_params(&["T"])
            .with_annotation(Annotation::Fixture {
                generic_impls: vec!["com.acme.Missing".to_string()],
            }),
    ])
    .unwrap();

    let err = generator().inspect(&universe, "com.acme.Box").unwrap_err();
    assert!(matches!(err, FixtureError::UnresolvedType(ref n) if n == "com.acme.Missing"));
}

// ============================================================================
// Explicit construction tie-break
// ============================================================================

fn money(first: &[&str], second: &[&str]) -> TypeUniverse {
    TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Money")
            .with_annotation(Annotation::FixtureConstructor(ConstructorFixture::new(
                "first", first,
            )))
            .with_annotation(Annotation::FixtureConstructor(ConstructorFixture::new(
                "second", second,
            ))),
        TypeElement::class("com.acme.Wallet")
            .with_annotation(fixture())
            .with_field(field("walletBalance", "com.acme.Money")),
    ])
    .unwrap()
}

fn wallet_balance(universe: &TypeUniverse) -> String {
    generator()
        .inspect(universe, "com.acme.Wallet")
        .unwrap()
        .constants
        .get("walletBalance")
        .unwrap()
        .value
        .clone()
}

#[test]
fn longer_explicit_annotation_wins_in_any_order() {
    assert_eq!(
        wallet_balance(&money(&["amount"], &["amount", "currency"])),
        "com.acme.MoneyFixture.second()"
    );
    assert_eq!(
        wallet_balance(&money(&["amount", "currency"], &["amount"])),
        "com.acme.MoneyFixture.first()"
    );
}

#[test]
fn equal_explicit_annotations_pick_first_declared() {
    assert_eq!(
        wallet_balance(&money(&["amount"], &["currency"])),
        "com.acme.MoneyFixture.first()"
    );
}

fn builder(method_name: &str, setters: &[&str]) -> Annotation {
    let annotation = setters.iter().fold(BuilderFixture::new(method_name), |b, key| {
        b.with_setter(BuilderSetter::constant(*key, *key))
    });
    Annotation::FixtureBuilder(annotation)
}

fn builder_money(first: Annotation, second: Annotation) -> TypeUniverse {
    TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Money")
            .with_field(field("amountValue", "java.math.BigDecimal"))
            .with_field(field("currencyCode", "java.lang.String"))
            .with_annotation(first)
            .with_annotation(second),
        TypeElement::class("com.acme.Wallet")
            .with_annotation(fixture())
            .with_field(field("walletBalance", "com.acme.Money")),
    ])
    .unwrap()
}

#[test]
fn longer_builder_annotation_wins_in_any_order() {
    assert_eq!(
        wallet_balance(&builder_money(
            builder("partial", &["amountValue"]),
            builder("complete", &["amountValue", "currencyCode"]),
        )),
        "com.acme.MoneyFixture.complete()"
    );
    assert_eq!(
        wallet_balance(&builder_money(
            builder("complete", &["amountValue", "currencyCode"]),
            builder("partial", &["amountValue"]),
        )),
        "com.acme.MoneyFixture.complete()"
    );
}

#[test]
fn equal_builder_annotations_pick_first_declared() {
    assert_eq!(
        wallet_balance(&builder_money(
            builder("byAmount", &["amountValue"]),
            builder("byCurrency", &["currencyCode"]),
        )),
        "com.acme.MoneyFixture.byAmount()"
    );
    assert_eq!(
        wallet_balance(&builder_money(
            builder("byCurrency", &["currencyCode"]),
            builder("byAmount", &["amountValue"]),
        )),
        "com.acme.MoneyFixture.byCurrency()"
    );
}

#[test]
fn builder_without_setters_counts_every_instance_field() {
    assert_eq!(
        wallet_balance(&builder_money(
            builder("partial", &["amountValue"]),
            builder("everything", &[]),
        )),
        "com.acme.MoneyFixture.everything()"
    );
    assert_eq!(
        wallet_balance(&builder_money(
            builder("everything", &[]),
            builder("explicitPair", &["amountValue", "currencyCode"]),
        )),
        "com.acme.MoneyFixture.everything()"
    );
}

#[test]
fn constructor_annotation_beats_wider_builder() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Money")
            .with_annotation(builder("complete", &["amountValue", "currencyCode"]))
            .with_annotation(Annotation::FixtureConstructor(ConstructorFixture::new(
                "single",
                &["amountValue"],
            ))),
        TypeElement::class("com.acme.Wallet")
            .with_annotation(fixture())
            .with_field(field("walletBalance", "com.acme.Money")),
    ])
    .unwrap();
    assert_eq!(wallet_balance(&universe), "com.acme.MoneyFixture.single()");
}

// ============================================================================
// Constant table errors
// ============================================================================

#[test]
fn duplicate_constant_key_is_reported() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Person")
            .with_annotation(fixture())
            .with_field(field("givenName", "java.lang.String").with_annotation(
                Annotation::FixtureConstant {
                    name: "PERSON_NAME".to_string(),
                    value: None,
                },
            ))
            .with_field(field("familyName", "java.lang.String").with_annotation(
                Annotation::FixtureConstant {
                    name: "PERSON_NAME".to_string(),
                    value: Some("\"Doe\"".to_string()),
                },
            )),
    ])
    .unwrap();

    let err = generator().inspect(&universe, "com.acme.Person").unwrap_err();
    assert!(matches!(err, FixtureError::DuplicateConstant { ref key, .. } if key == "PERSON_NAME"));
}

#[test]
fn unknown_constant_key_is_named() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Person")
            .with_annotation(fixture())
            .with_field(field("givenName", "java.lang.String"))
            .with_annotation(Annotation::FixtureConstructor(ConstructorFixture::new(
                "named",
                &["givenName", "middleName"],
            ))),
    ])
    .unwrap();

    let result = generate(&universe).unwrap();
    assert_eq!(result.file_count(), 0);
    let message = &result.diagnostics[0].message;
    assert!(message.contains("'middleName'"), "{}", message);
    assert!(message.contains("@FixtureConstructor(methodName = \"named\")"), "{}", message);
}

// ============================================================================
// Containers and recursion
// ============================================================================

#[test]
fn container_fields_default_to_empty_literals() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Basket")
            .with_annotation(fixture())
            .with_field(field("itemNames", "java.util.List<java.lang.String>"))
            .with_field(field("pendingNames", "java.util.Queue<java.lang.String>"))
            .with_field(field("itemPrices", "java.util.Map<java.lang.String, java.math.BigDecimal>")),
    ])
    .unwrap();

    let fixture = generator().inspect(&universe, "com.acme.Basket").unwrap();
    let values: Vec<&str> = fixture.constants.constants().map(|c| c.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["java.util.List.of()", "new java.util.PriorityQueue<>()", "java.util.Map.of()"]
    );

    let populated = FixtureGenerator::new(GeneratorConfig::default().populate_containers())
        .inspect(&universe, "com.acme.Basket")
        .unwrap();
    let values: Vec<&str> = populated.constants.constants().map(|c| c.value.as_str()).collect();
    assert_eq!(
        values,
        vec![
            "java.util.List.of(\"ITEM_NAMES_VALUE\")",
            "new java.util.PriorityQueue<>(java.util.List.of(\"PENDING_NAMES_VALUE\"))",
            "java.util.Map.of(\"ITEM_PRICES_VALUE\", java.math.BigDecimal.ZERO)",
        ]
    );
}

#[test]
fn mutual_recursion_is_diagnostic_not_crash() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Parent")
            .with_annotation(Annotation::AllArgsConstructor)
            .with_field(field("firstChild", "com.acme.Child")),
        TypeElement::class("com.acme.Child")
            .with_annotation(Annotation::AllArgsConstructor)
            .with_field(field("parentNode", "com.acme.Parent")),
        TypeElement::class("com.acme.Family")
            .with_annotation(fixture())
            .with_field(field("familyRoot", "com.acme.Parent")),
    ])
    .unwrap();

    let result = generate(&universe).unwrap();
    assert_eq!(result.file_count(), 0);
    assert_eq!(
        result.diagnostics[0].message,
        "Recursive type detected: com.acme.Parent -> com.acme.Child -> com.acme.Parent"
    );
}

#[test]
fn nested_generic_instantiation_generates() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Box")
            .with_type_params(&["T"])
            .with_annotation(Annotation::AllArgsConstructor)
            .with_field(field("boxedValue", "T")),
        TypeElement::class("com.acme.Holder")
            .with_annotation(fixture())
            .with_field(field(
                "nestedBox",
                "com.acme.Box<com.acme.Box<java.lang.String>>",
            )),
    ])
    .unwrap();

    let result = generate(&universe).unwrap();
    assert!(!result.has_diagnostics());

    let fixture = generator().inspect(&universe, "com.acme.Holder").unwrap();
    assert_eq!(
        fixture.constants.get("nestedBox").unwrap().value,
        "new com.acme.Box<>(new com.acme.Box<>(\"BOXED_VALUE_VALUE\"))"
    );
}

#[test]
fn self_referencing_provider_template_is_diagnostic_not_crash() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Email"),
        TypeElement::class("com.acme.Contact")
            .with_annotation(fixture())
            .with_field(field("contactEmail", "com.acme.Email")),
    ])
    .unwrap();
    let generator = FixtureGenerator::new(
        GeneratorConfig::default()
            .without_generated_annotation()
            .with_provider("com.acme.Email", "wrap(${com.acme.Email})"),
    );

    let result = generator.generate(&universe).unwrap();
    assert_eq!(result.file_count(), 0);
    assert_eq!(result.diagnostics[0].element, "com.acme.Contact");
    assert_eq!(
        result.diagnostics[0].message,
        "Recursive type detected: com.acme.Email -> com.acme.Email"
    );
}

#[test]
fn class_without_constructors_uses_implicit_one() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Marker"),
        TypeElement::class("com.acme.Tagged")
            .with_annotation(fixture())
            .with_field(field("markerValue", "com.acme.Marker")),
    ])
    .unwrap();

    let fixture = generator().inspect(&universe, "com.acme.Tagged").unwrap();
    assert_eq!(
        fixture.constants.get("markerValue").unwrap().value,
        "new com.acme.Marker()"
    );
}

#[test]
fn static_fields_are_not_constants() {
    let universe = TypeUniverse::from_elements(vec![
        TypeElement::class("com.acme.Config")
            .with_annotation(fixture())
            .with_field(field("maxRetries", "int").with_modifier(Modifier::Static))
            .with_field(field("retryDelay", "java.time.Duration")),
    ])
    .unwrap();

    let fixture = generator().inspect(&universe, "com.acme.Config").unwrap();
    assert_eq!(fixture.constants.keys().collect::<Vec<_>>(), vec!["retryDelay"]);
}

// ============================================================================
// Model files
// ============================================================================

#[test]
fn json_model_generates_fixture() {
    let json = r#"{
        "schema_version": 1,
        "types": [
            {
                "name": "com.acme.shop.Product",
                "fields": [
                    { "name": "productCode", "type": "java.lang.String" },
                    { "name": "unitPrice", "type": "java.math.BigDecimal" },
                    { "name": "productColor", "type": "com.acme.shop.Color" }
                ],
                "annotations": [
                    { "annotation": "Fixture" },
                    { "annotation": "FixtureConstructor", "method_name": "product", "constants": ["productCode", "unitPrice", "productColor"] }
                ]
            },
            { "name": "com.acme.shop.Color", "kind": "enum", "enum_constants": ["RED", "BLUE"] }
        ]
    }"#;

    let universe = parse_model(json).unwrap();
    let result = generator().generate(&universe).unwrap();
    let content = &result.file("com/acme/shop/ProductFixture.java").unwrap().content;

    assert!(content.contains("public static final com.acme.shop.Color PRODUCT_COLOR = com.acme.shop.Color.RED;"));
    assert!(content.contains("public static final java.math.BigDecimal UNIT_PRICE = java.math.BigDecimal.ZERO;"));
    assert!(content.contains("return new Product(PRODUCT_CODE, UNIT_PRICE, PRODUCT_COLOR);"));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn generation_is_idempotent(
        head in "[a-z]{2,6}",
        tail in "[A-Z][a-z]{1,6}",
        ty in prop::sample::select(vec![
            "java.lang.String",
            "java.util.UUID",
            "long",
            "java.lang.Short",
            "java.util.Set<java.lang.Integer>",
            "char[]",
        ]),
    ) {
        let name = format!("{}{}", head, tail);
        let universe = TypeUniverse::from_elements(vec![
            TypeElement::class("com.acme.Thing")
                .with_annotation(fixture())
                .with_field(field(&name, ty)),
        ])
        .unwrap();

        let first = generator().generate(&universe).unwrap();
        let second = generator().generate(&universe).unwrap();
        prop_assert_eq!(first.files, second.files);
    }
}
