//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use factq_eval::json::value_to_json;
use factq_term::{Scalar, Value};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored text, one result per line
    Text,
    /// A JSON value, or an array of them for a scan
    Json,
}

/// What an `eval` run produced
#[derive(Debug, Clone, PartialEq)]
pub enum Results {
    /// One evaluation against one fact
    Single(Value),
    /// One value per fact of a scan, however many facts there were
    Scan(Vec<Value>),
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::unset_override(),
    }
}

/// Format an error for display, with every context layer
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {:#}", "Error:".red().bold(), error)
}

/// Format a value for the terminal
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Nil => "nil".dimmed().to_string(),
        Value::Scalar(Scalar::Boolean(true)) => "true".green().to_string(),
        Value::Scalar(Scalar::Boolean(false)) => "false".red().to_string(),
        other => other.to_string(),
    }
}

/// Render results: a single evaluation prints one value, a scan one per fact
pub fn render_results(results: &Results, format: OutputFormat) -> Result<String> {
    match (format, results) {
        (OutputFormat::Json, Results::Single(value)) => {
            serde_json::to_string_pretty(&value_to_json(value)).context("Failed to serialize JSON")
        }
        (OutputFormat::Json, Results::Scan(values)) => {
            let json = serde_json::Value::Array(values.iter().map(value_to_json).collect());
            serde_json::to_string_pretty(&json).context("Failed to serialize JSON")
        }
        (OutputFormat::Text, Results::Single(value)) => Ok(format_value(value)),
        (OutputFormat::Text, Results::Scan(values)) => Ok(values
            .iter()
            .enumerate()
            .map(|(i, value)| format!("{:>4}  {}", i, format_value(value)))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Print results to stdout
pub fn print_results(results: &Results, format: OutputFormat) -> Result<()> {
    println!("{}", render_results(results, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_single_and_scan() {
        let single = render_results(&Results::Single(Value::from(5)), OutputFormat::Json).unwrap();
        assert_eq!(single, "5");
        let scan = Results::Scan(vec![Value::Nil, Value::from(10)]);
        assert_eq!(
            render_results(&scan, OutputFormat::Json).unwrap(),
            "[\n  null,\n  10\n]"
        );
    }

    #[test]
    fn test_scan_of_one_fact_is_still_an_array() {
        let scan = Results::Scan(vec![Value::from(5)]);
        assert_eq!(render_results(&scan, OutputFormat::Json).unwrap(), "[\n  5\n]");
        let empty = Results::Scan(Vec::new());
        assert_eq!(render_results(&empty, OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn test_text_numbers_scan_rows() {
        colored::control::set_override(false);
        let scan = Results::Scan(vec![Value::boolean(true), Value::Nil]);
        assert_eq!(
            render_results(&scan, OutputFormat::Text).unwrap(),
            "   0  true\n   1  nil"
        );
        let one = Results::Scan(vec![Value::boolean(true)]);
        assert_eq!(render_results(&one, OutputFormat::Text).unwrap(), "   0  true");
    }
}
