//! Java source rendering of a fixture class

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

use crate::generator::Fixture;
use crate::metadata::TypeDescriptor;

/// Value of the `@Generated` annotation
pub const GENERATOR_NAME: &str = "fixturegen";

const INDENT: &str = "    ";

/// `com/acme/OrderFixture.java`
pub fn fixture_path(descriptor: &TypeDescriptor) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in descriptor.package_name.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.java", descriptor.fixture_simple_name()));
    path
}

/// Render the source file of a fixture class
///
/// `generated_at` adds the `@Generated` annotation with that timestamp.
pub fn render_fixture(fixture: &Fixture, generated_at: Option<DateTime<Utc>>) -> String {
    let descriptor = &fixture.descriptor;
    let class_name = descriptor.fixture_simple_name();
    let mut content = String::with_capacity(1024);

    if !descriptor.package_name.is_empty() {
        content.push_str(&format!("package {};\n\n", descriptor.package_name));
    }

    if let Some(timestamp) = generated_at {
        content.push_str(&format!(
            "@javax.annotation.processing.Generated(value = \"{}\", date = \"{}\")\n",
            GENERATOR_NAME,
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    content.push_str(&format!("public final class {} {{\n", class_name));

    for constant in fixture.constants.constants() {
        content.push_str(&format!(
            "\n{}public static final {} {} = {};\n",
            INDENT, constant.ty, constant.name, constant.value
        ));
    }

    content.push_str(&format!("\n{}private {}() {{\n{}}}\n", INDENT, class_name, INDENT));

    for method in &fixture.methods {
        content.push_str(&format!(
            "\n{0}public static {1} {2}() {{\n{0}{0}return {3};\n{0}}}\n",
            INDENT, method.return_type, method.name, method.expression
        ));
    }

    content.push_str("}\n");
    content
}
