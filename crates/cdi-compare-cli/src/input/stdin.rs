use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Deserialise a piped JSON document into `T` when stdin is not a TTY.
///
/// `None` for an interactive terminal or an empty pipe, so the caller can
/// fall back to command-line flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let input = serde_json::from_str(trimmed).map_err(|e| {
        format!(
            "Failed to parse stdin as {}: {}",
            short_type_name::<T>(),
            e
        )
    })?;
    Ok(Some(input))
}

/// `InvestmentInput` rather than `cdi_compare_core::returns::comparison::InvestmentInput`.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
