use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use crate::output::{flatten, format_value};

/// Columns shown per scenario row, as (header, dotted path).
const SCENARIO_COLUMNS: [(&str, &str); 10] = [
    ("Term", "label"),
    ("Days", "term_days"),
    ("Tax (current)", "tax_rates.old_rate"),
    ("Tax (proposed)", "tax_rates.new_rate"),
    ("Gross period return", "returns.gross_period_return"),
    ("Final (current)", "returns.final_amount_old"),
    ("Final (proposed)", "returns.final_amount_new"),
    ("% CDI net (current)", "cdi.net_old"),
    ("% CDI net (proposed)", "cdi.net_new"),
    ("Difference", "difference"),
];

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result_table(result, map),
            None => print_field_table(value),
        },
        _ => println!("{}", format_value(value)),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result.get("scenarios") {
        Some(Value::Array(scenarios)) => {
            print_scenario_table(scenarios);
            for key in ["best", "worst"] {
                if let Some(insight) = result.get(key).filter(|v| v.is_object()) {
                    println!(
                        "{}: {} ({}) difference {}",
                        key,
                        format_value(&insight["label"]),
                        format_value(&insight["kind"]),
                        format_value(&insight["difference"]),
                    );
                }
            }
        }
        _ => print_field_table(result),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(value) {
        builder.push_record([key, format_value(&val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_scenario_table(scenarios: &[Value]) {
    if scenarios.is_empty() {
        println!("(no scenarios)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(SCENARIO_COLUMNS.iter().map(|(header, _)| header.to_string()));
    for scenario in scenarios {
        builder.push_record(scenario_row(scenario));
    }
    println!("{}", Table::from(builder));
}

pub(crate) fn scenario_row(scenario: &Value) -> Vec<String> {
    let fields = flatten(scenario);
    SCENARIO_COLUMNS
        .iter()
        .map(|(_, path)| {
            fields
                .iter()
                .find(|(k, _)| k == path)
                .map(|(_, v)| format_value(v))
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scenario_row_picks_nested_columns() {
        let row = scenario_row(&json!({
            "label": "1 month",
            "term_days": 30,
            "tax_rates": { "old_rate": "0.225", "new_rate": "0.175" },
            "returns": { "gross_period_return": "0.0113", "final_amount_old": "10087.57", "final_amount_new": "10093.22" },
            "cdi": { "gross": "100", "net_old": "77.5", "net_new": null },
            "difference": "5.65",
        }));
        assert_eq!(row[0], "1 month");
        assert_eq!(row[1], "30");
        assert_eq!(row[2], "0.225");
        assert_eq!(row[8], "n/a");
        assert_eq!(row[9], "5.65");
    }
}
