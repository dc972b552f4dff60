use serde_json::Value;
use std::io;

use crate::output::{flatten, format_value};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result.get("scenarios") {
        // One row per scenario with every flattened field as a column
        Some(Value::Array(scenarios)) => write_array_csv(&mut wtr, scenarios),
        _ => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in flatten(result) {
                let _ = wtr.write_record([key, format_value(&val)]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    let Some(first) = arr.first() else {
        return;
    };

    let headers: Vec<String> = flatten(first).into_iter().map(|(k, _)| k).collect();
    let _ = wtr.write_record(&headers);

    for item in arr {
        let fields = flatten(item);
        let row: Vec<String> = headers
            .iter()
            .map(|h| {
                fields
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| format_value(v))
                    .unwrap_or_default()
            })
            .collect();
        let _ = wtr.write_record(&row);
    }
}
