//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// A serialisable record with a table rendering.
///
/// JSON and CSV serialize the record itself; tables render [`TableRow::row`]
/// so numbers follow the configured precision.
pub trait TableRow: Serialize {
    /// Table row type.
    type Row: Tabled;

    /// Renders the record for a table.
    fn row(&self, precision: usize) -> Self::Row;

    /// One-line rendering for minimal output.
    fn minimal(&self, precision: usize) -> String;
}

/// Formats and prints records based on the specified format.
pub fn print_output<T: TableRow>(
    records: &[T],
    format: OutputFormat,
    precision: usize,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<T::Row> = records.iter().map(|r| r.row(precision)).collect();
            print_table(&rows)
        }
        OutputFormat::Json => print_json(records),
        OutputFormat::Csv => print_csv(records),
        OutputFormat::Minimal => {
            for record in records {
                println!("{}", record.minimal(precision));
            }
            Ok(())
        }
    }
}

/// Prints a single result as JSON, one CSV line, or `minimal` alone.
///
/// Tables are built by the caller with [`print_table_pairs`].
pub fn print_single<T: Serialize>(data: &T, minimal: &str, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.serialize(data)?;
            wtr.flush()?;
        }
        OutputFormat::Table | OutputFormat::Minimal => {
            println!("{minimal}");
        }
    }
    Ok(())
}

/// Prints metric/value pairs as a table.
pub fn print_table_pairs(pairs: &[KeyValue]) -> anyhow::Result<()> {
    print_table(pairs)
}

fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
    Ok(())
}

fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Formats a number with `precision` decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Formats an optional number; `None` renders as a dash.
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_number(v, precision))
}

/// Formats a rate as a percentage with four decimals.
pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}%", v * 100.0))
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a section header.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
