//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled};

use sessiongate_core::error::AppError;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Pretty,
    /// JSON output
    Json,
}

/// One top-level field of a response
#[derive(Debug, Tabled)]
struct FieldRow {
    /// Field name
    field: String,
    /// Rendered value
    value: String,
}

/// Print a single response in the selected format
pub fn print_item<T: Serialize>(item: &T, format: OutputFormat) -> Result<(), AppError> {
    let value = serde_json::to_value(item)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Pretty => match value {
            Value::Object(map) => {
                let rows: Vec<FieldRow> = map
                    .into_iter()
                    .map(|(field, value)| FieldRow {
                        field,
                        value: render(&value),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
            other => println!("{}", render(&other)),
        },
    }
    Ok(())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    eprintln!("✓ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}
