use serde_json::Value;

use crate::output::format_value;

/// Key figures in priority order, as dotted paths into the result.
const PRIORITY_KEYS: [&str; 4] = [
    "difference",
    "best.label",
    "percent_of_cdi",
    "rate_difference_pp",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    println!("{}", key_figure(result_obj));
}

fn key_figure(result: &Value) -> String {
    for key in PRIORITY_KEYS {
        let pointer = format!("/{}", key.replace('.', "/"));
        if let Some(val) = result.pointer(&pointer) {
            if !val.is_null() {
                return format_value(val);
            }
        }
    }

    if let Value::Object(map) = result {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_value(val));
        }
    }

    format_value(result)
}
