//! Table, text and JSON output formatting for CLI commands.
//!
//! Results go to stdout. Warnings and errors go to stderr so that
//! `--format json` output can be piped straight into another tool.

use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Print a list of rows as a table, or as JSON.
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Text => println!("{}", render_list(items, empty)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Render rows as a table, or `empty` when there are none.
pub fn render_list<T: Tabled>(items: &[T], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        Table::new(items).to_string()
    }
}

/// Print `item` as JSON, or the text rendering produced by `text`.
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat, text: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Text => print!("{}", text(item)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Format a key-value line
pub fn kv(key: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<24} {value}\n", format!("{key}:"))
}

/// Format a money amount with two decimals
pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}
