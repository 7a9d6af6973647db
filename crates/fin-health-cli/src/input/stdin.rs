use serde_json::Value;
use std::io::{self, Read};

/// Read a piped JSON payload from stdin.
///
/// Returns `None` when stdin is an interactive terminal or carries only
/// whitespace, so callers can fall back to a usage error.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped(buffer: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin as JSON: {}", e))?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_is_none() {
        assert!(parse_piped("  \n\t").unwrap().is_none());
    }

    #[test]
    fn test_piped_payload_parsed() {
        let value = parse_piped("\n{\"periods\": []}\n").unwrap().unwrap();
        assert!(value["periods"].is_array());
    }

    #[test]
    fn test_malformed_payload_is_error() {
        let err = parse_piped("{periods").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse stdin"));
    }
}
