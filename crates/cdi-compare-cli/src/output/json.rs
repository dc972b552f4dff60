use serde_json::Value;

/// Print a JSON document to stdout: indented for a terminal, one line when piped.
pub fn print_json(value: &Value) {
    match render_json(value, atty::is(atty::Stream::Stdout)) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

fn render_json(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
