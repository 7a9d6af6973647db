use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline figures by command, most specific first: the overall score for
/// a full analysis, CAGR for trailing metrics, final-year revenue for a
/// scenario.
const HEADLINE_POINTERS: [&str; 4] = [
    "/healthScores/overall",
    "/cagr",
    "/years/2/revenue",
    "/years/0/revenue",
];

/// Print just the headline value of the result.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(result_of(value)));
}

fn headline(result: &Value) -> String {
    for pointer in HEADLINE_POINTERS {
        if let Some(val) = result.pointer(pointer).filter(|v| !v.is_null()) {
            return scalar_text(val);
        }
    }

    match result.as_object().and_then(|m| m.iter().next()) {
        Some((key, val)) => format!("{}: {}", key, scalar_text(val)),
        None => scalar_text(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headline_per_command() {
        assert_eq!(headline(&json!({"healthScores": {"overall": "72"}, "cagr": "1"})), "72");
        assert_eq!(headline(&json!({"netMargin": "0.1", "cagr": "0.5"})), "0.5");
        let years = json!({"years": [{"revenue": "1"}, {"revenue": "2"}, {"revenue": "3"}]});
        assert_eq!(headline(&years), "3");
    }

    #[test]
    fn test_fallback_to_first_field() {
        assert_eq!(headline(&json!({"narrative": "ok"})), "narrative: ok");
    }
}
