//! # Fixture Generator CLI
//!
//! Command-line interface for the fixture generator.
//!
//! ## Commands
//!
//! - `generate` - Render `<Type>Fixture` classes for every annotated type
//! - `inspect` - Show the constants and methods of one type's fixture
//! - `validate` - Check model files without generating
//!

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod output;

use commands::generate::GenerateArgs;
pub use error::{CliError, CliResult};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = "fixturegen";

/// Fixture generator command line
#[derive(Debug, Parser)]
#[command(name = "fixturegen")]
#[command(about = "Generate Java test fixture classes from a type model", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: output::OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate fixture classes
    Generate {
        /// Model file or directory of model files
        #[arg(short, long, env = "FIXTUREGEN_MODEL")]
        model: PathBuf,

        /// Configuration file (defaults to ./fixturegen.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory, overrides the configuration file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Report what would be written without touching the disk
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the fixture of one type
    Inspect {
        /// Model file or directory of model files
        #[arg(short, long, env = "FIXTUREGEN_MODEL")]
        model: PathBuf,

        /// Qualified type name
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Configuration file (defaults to ./fixturegen.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate model files
    Validate {
        /// Model file or directory of model files
        #[arg(short, long, env = "FIXTUREGEN_MODEL")]
        model: PathBuf,
    },
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // RUST_LOG wins over -v
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).without_time())
        .try_init();

    execute(cli)
}

/// Dispatch a parsed command line
pub fn execute(cli: Cli) -> CliResult<()> {
    let format = cli.format;
    match cli.command {
        Commands::Generate {
            model,
            config,
            out,
            dry_run,
        } => commands::generate::execute(
            GenerateArgs {
                model,
                config,
                out,
                dry_run,
            },
            format,
        ),
        Commands::Inspect {
            model,
            type_name,
            config,
        } => commands::inspect::execute(model, config, &type_name, format),
        Commands::Validate { model } => commands::validate::execute(&model, format),
    }
}
