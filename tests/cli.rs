//! End-to-end tests of the `fixturegen` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn fixturegen(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fixturegen").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG").env_remove("FIXTUREGEN_MODEL");
    cmd
}

#[test]
fn validate_demo_model() {
    let dir = TempDir::new().unwrap();
    fixturegen(&dir)
        .args(["validate", "--model"])
        .arg(demo("order-model.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("4 type(s), 1 fixture target(s)"));
}

#[test]
fn generate_demo_model() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("fixtures");

    fixturegen(&dir)
        .args(["generate", "--model"])
        .arg(demo("order-model.json"))
        .arg("--config")
        .arg(demo("fixturegen.toml"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 fixture(s) generated"));

    let content = std::fs::read_to_string(out.join("com/acme/shop/OrderFixture.java")).unwrap();
    assert!(content.starts_with("package com.acme.shop;\n"));
    assert!(content.contains("@javax.annotation.processing.Generated(value = \"fixturegen\""));
    assert!(content.contains("public static final java.lang.String VIP_CUSTOMER = \"Jane Doe\";"));
    assert!(content.contains(
        "public static final com.acme.shop.OrderStatus ORDER_STATUS = com.acme.shop.OrderStatus.CREATED;"
    ));
    assert!(content.contains("public static Order regularOrder() {"));
    assert!(content.contains(
        "return Order.builder().orderId(ORDER_ID).customerName(VIP_CUSTOMER).orderStatus(com.acme.shop.OrderStatus.SHIPPED).build();"
    ));
    assert!(!content.contains("SERIAL_VERSION"));
}

#[test]
fn dry_run_leaves_disk_untouched() {
    let dir = TempDir::new().unwrap();
    fixturegen(&dir)
        .args(["generate", "--dry-run", "--model"])
        .arg(demo("order-model.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("would write"));

    assert!(!dir.path().join("generated").exists());
}

#[test]
fn inspect_as_json() {
    let dir = TempDir::new().unwrap();
    fixturegen(&dir)
        .args(["--format", "json", "inspect", "--type", "com.acme.shop.Order", "--model"])
        .arg(demo("order-model.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fixture\": \"com.acme.shop.OrderFixture\""))
        .stdout(predicate::str::contains("\"REGULAR_CUSTOMER\""));
}

#[test]
fn failing_type_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("broken.json");
    std::fs::write(
        &model,
        r#"{
            "schema_version": 1,
            "types": [
                {
                    "name": "com.acme.Broken",
                    "fields": [ { "name": "itemCount", "type": "int" } ],
                    "annotations": [
                        { "annotation": "Fixture" },
                        { "annotation": "FixtureConstructor", "method_name": "broken", "constants": ["missingKey"] }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    fixturegen(&dir)
        .args(["generate", "--model"])
        .arg(&model)
        .assert()
        .failure()
        .stderr(predicate::str::contains("com.acme.Broken"))
        .stderr(predicate::str::contains("missingKey"))
        .stderr(predicate::str::contains("1 type(s) failed to generate"));
}

#[test]
fn missing_model_directory_contents() {
    let dir = TempDir::new().unwrap();
    fixturegen(&dir)
        .args(["validate", "--model", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No model files found"));
}
