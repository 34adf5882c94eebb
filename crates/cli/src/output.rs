//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green().bold(), message.as_ref());
}

pub fn failure(message: impl AsRef<str>) {
    eprintln!("{} {}", "✗".red().bold(), message.as_ref());
}

pub fn heading(title: impl AsRef<str>) {
    println!("{}", title.as_ref().bold().underline());
}

/// `  key: value` with the key dimmed
pub fn field(key: &str, value: impl AsRef<str>) {
    println!("  {} {}", format!("{key}:").as_str().dimmed(), value.as_ref());
}

pub fn json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => failure(format!("Failed to render JSON: {e}")),
    }
}
