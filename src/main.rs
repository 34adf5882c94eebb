//! Fixture Generator
//!
//! Generates `<Type>Fixture` Java classes from a JSON type model.

use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match fixturegen_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
