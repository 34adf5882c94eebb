//! `fixturegen validate`: check model files without generating

use fixturegen_ir::Validatable;
use std::path::Path;

use crate::error::CliResult;
use crate::model::load_models;
use crate::output::{self, OutputFormat};

/// Outcome of validating a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub types: usize,
    pub fixtures: usize,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn check(model: &Path) -> CliResult<ValidationReport> {
    let universe = load_models(model)?;
    Ok(ValidationReport {
        types: universe.len(),
        fixtures: universe.fixture_elements().count(),
        errors: universe.validation_errors(),
    })
}

pub fn execute(model: &Path, format: OutputFormat) -> CliResult<()> {
    let report = check(model)?;

    match format {
        OutputFormat::Json => output::json(&serde_json::json!({
            "valid": report.is_valid(),
            "types": report.types,
            "fixtures": report.fixtures,
            "errors": report.errors,
        })),
        OutputFormat::Text => {
            for error in &report.errors {
                output::failure(error);
            }
            if report.is_valid() {
                output::success(format!(
                    "{} type(s), {} fixture target(s)",
                    report.types, report.fixtures
                ));
            }
        }
    }

    if report.is_valid() {
        Ok(())
    } else {
        anyhow::bail!("Model has {} error(s)", report.errors.len())
    }
}
