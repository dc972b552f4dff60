pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted keys (`returns.final_amount_new`).
///
/// Arrays are left as single values; callers render them separately.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    if let Value::Object(map) = value {
        flatten_into("", map, &mut rows);
    }
    rows
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, rows),
            other => rows.push((name, other.clone())),
        }
    }
}

/// Render a scalar for tabular output. Numbers arrive as strings from
/// the engine's decimal serialization and are passed through untouched.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "n/a".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
