//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints a table whose columns are only known at run time, such as one
/// column per fund.
pub fn print_grid(headers: &[String], rows: &[Vec<String>], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No results.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(headers.iter().cloned());
            for row in rows {
                builder.push_record(row.iter().cloned());
            }
            let table = builder
                .build()
                .with(Style::rounded())
                .with(Modify::new(Columns::first()).with(Alignment::left()))
                .to_string();
            println!("{table}");
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(headers)?;
            for row in rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => {
            let objects: Vec<serde_json::Map<String, serde_json::Value>> = rows
                .iter()
                .map(|row| {
                    headers
                        .iter()
                        .cloned()
                        .zip(row.iter().cloned().map(serde_json::Value::String))
                        .collect()
                })
                .collect();
            print_json(&objects)?;
        }
        OutputFormat::Minimal => {
            for row in rows {
                println!("{}", row.join("\t"));
            }
        }
    }
    Ok(())
}

/// Prints data as a formatted table.
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

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints one line per row, tab separated.
fn print_minimal<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    for item in data {
        let fields: Vec<String> = item.fields().into_iter().map(|f| f.to_string()).collect();
        println!("{}", fields.join("\t"));
    }
    Ok(())
}

/// Formats a float with a fixed number of decimals.
pub fn fmt_f64(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Formats an optional float, printing `n/a` when absent.
pub fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| fmt_f64(v, precision))
}

/// Formats a money amount with two decimals.
pub fn fmt_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Formats a fraction as a percentage.
pub fn fmt_pct(fraction: f64, precision: usize) -> String {
    format!("{:.precision$}%", fraction * 100.0)
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

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_formatters() {
        assert_eq!(fmt_f64(1.915_209, 4), "1.9152");
        assert_eq!(fmt_opt(None, 4), "n/a");
        assert_eq!(fmt_opt(Some(4.717_942), 2), "4.72");
        assert_eq!(fmt_amount(dec!(1015000.506)), "1015000.51");
        assert_eq!(fmt_pct(0.004_763_125, 4), "0.4763%");
    }
}
