//! `fixturegen inspect`: show what would be generated for one type

use fixturegen_codegen::{Fixture, FixtureGenerator};
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::error::CliResult;
use crate::model::load_models;
use crate::output::{self, OutputFormat};

pub fn fixture_for(model: &Path, config: Option<&Path>, type_name: &str) -> CliResult<Fixture> {
    let config = ConfigFile::discover(config)?.into_generator_config();
    let universe = load_models(model)?;
    Ok(FixtureGenerator::new(config).inspect(&universe, type_name)?)
}

pub fn execute(
    model: PathBuf,
    config: Option<PathBuf>,
    type_name: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let fixture = fixture_for(&model, config.as_deref(), type_name)?;

    match format {
        OutputFormat::Json => output::json(&to_json(&fixture)),
        OutputFormat::Text => {
            output::heading(&fixture.descriptor.fixture_name);
            output::field("type", &fixture.descriptor.qualified_name);
            println!();
            output::heading("Constants");
            for (key, constant) in fixture.constants.iter() {
                output::field(
                    key,
                    format!("{} {} = {}", constant.ty, constant.name, constant.value),
                );
            }
            println!();
            output::heading("Methods");
            for method in &fixture.methods {
                output::field(
                    &method.name,
                    format!("{} → {}", method.return_type, method.expression),
                );
            }
        }
    }
    Ok(())
}

fn to_json(fixture: &Fixture) -> serde_json::Value {
    serde_json::json!({
        "type": fixture.type_name,
        "fixture": fixture.descriptor.fixture_name,
        "constants": fixture.constants.iter().map(|(key, c)| serde_json::json!({
            "key": key,
            "name": c.name,
            "type": c.ty,
            "value": c.value,
        })).collect::<Vec<_>>(),
        "methods": fixture.methods.iter().map(|m| serde_json::json!({
            "name": m.name,
            "return_type": m.return_type,
            "expression": m.expression,
        })).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn model(dir: &Path) -> PathBuf {
        let path = dir.join("model.json");
        std::fs::write(
            &path,
            r#"{
                "schema_version": 1,
                "types": [
                    {
                        "name": "com.acme.Tag",
                        "fields": [ { "name": "tagLabel", "type": "java.lang.String" } ],
                        "annotations": [ { "annotation": "Fixture" } ]
                    }
                ]
            }"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_inspect_known_type() {
        let dir = TempDir::new().unwrap();
        let fixture = fixture_for(&model(dir.path()), None, "com.acme.Tag").unwrap();
        let json = to_json(&fixture);
        assert_eq!(json["fixture"], "com.acme.TagFixture");
        assert_eq!(json["constants"][0]["name"], "TAG_LABEL");
        assert_eq!(json["constants"][0]["key"], "tagLabel");
    }

    #[test]
    fn test_inspect_unknown_type() {
        let dir = TempDir::new().unwrap();
        let err = fixture_for(&model(dir.path()), None, "com.acme.Missing").unwrap_err();
        assert!(err.to_string().contains("com.acme.Missing"));
    }
}
