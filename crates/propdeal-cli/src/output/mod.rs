pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten a nested result into dotted-key rows, in field order.
///
/// The analysis aggregate nests financing, income/expense, IRR, and grade
/// sections; the tabular formats want one row per leaf. Arrays of objects
/// (grade contributions) index into the key: `grade.contributions[0].points`.
pub(crate) fn flatten(value: &Value, prefix: &str, rows: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(val, &path, rows);
            }
        }
        Value::Array(arr) if arr.iter().any(|v| v.is_object() || v.is_array()) => {
            for (i, val) in arr.iter().enumerate() {
                flatten(val, &format!("{prefix}[{i}]"), rows);
            }
        }
        _ => rows.push((prefix.to_string(), value.clone())),
    }
}
