//! `fixturegen generate`: render fixture classes for every annotated type

use fixturegen_codegen::{FixtureGenerator, GeneratedFixtures, GeneratorConfig};
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::error::{CliError, CliResult};
use crate::model::load_models;
use crate::output::{self, OutputFormat};

/// Arguments of the `generate` subcommand
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub model: PathBuf,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub dry_run: bool,
}

/// Effective generator configuration: file values, then `--out`
pub fn resolve_config(args: &GenerateArgs) -> CliResult<GeneratorConfig> {
    let mut config = ConfigFile::discover(args.config.as_deref())?.into_generator_config();
    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    Ok(config)
}

/// Generate and, unless this is a dry run, write the fixtures
pub fn run(args: &GenerateArgs) -> CliResult<GeneratedFixtures> {
    run_with(resolve_config(args)?, args)
}

fn run_with(config: GeneratorConfig, args: &GenerateArgs) -> CliResult<GeneratedFixtures> {
    let universe = load_models(&args.model)?;
    let generator = FixtureGenerator::new(config);

    let result = generator.generate(&universe)?;
    if !args.dry_run {
        result.write_to_disk(&generator.config().output_dir)?;
    }
    Ok(result)
}

pub fn execute(args: GenerateArgs, format: OutputFormat) -> CliResult<()> {
    let config = resolve_config(&args)?;
    let output_dir = config.output_dir.clone();
    let result = run_with(config, &args)?;

    match format {
        OutputFormat::Json => output::json(&serde_json::json!({
            "output_dir": output_dir.display().to_string(),
            "dry_run": args.dry_run,
            "files": result.files.iter().map(|f| f.path.display().to_string()).collect::<Vec<_>>(),
            "diagnostics": result.diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>(),
        })),
        OutputFormat::Text => print_summary(&result, &output_dir, args.dry_run),
    }

    if result.has_diagnostics() {
        return Err(CliError::GenerationFailed(result.diagnostics.len()).into());
    }
    Ok(())
}

fn print_summary(result: &GeneratedFixtures, output_dir: &Path, dry_run: bool) {
    for file in &result.files {
        let path = output_dir.join(&file.path);
        if dry_run {
            println!("  would write {}", path.display());
        } else {
            println!("  wrote {}", path.display());
        }
    }
    for diagnostic in &result.diagnostics {
        output::failure(diagnostic.to_string());
    }
    if !result.files.is_empty() || !result.has_diagnostics() {
        output::success(format!("{} fixture(s) generated", result.file_count()));
    }
}
