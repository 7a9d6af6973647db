use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, result_of, scalar_text};

/// Render the result as tables: one field/value table for scalar and nested
/// fields, a titled table per array of records, and bullet lists for arrays
/// of text such as risk signals.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(result) => print_sections(result),
        Value::Array(rows) => print_records(rows),
        other => println!("{}", scalar_text(other)),
    }

    if let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) {
        print_envelope_notes(envelope);
    }
}

fn print_sections(result: &Map<String, Value>) {
    let mut fields = Vec::new();
    let mut record_sections = Vec::new();
    let mut text_sections: Vec<(&String, &[Value])> = Vec::new();

    for (key, val) in result {
        match val {
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                record_sections.push((key, items))
            }
            Value::Array(items) => text_sections.push((key, items.as_slice())),
            Value::String(s) if s.len() > 80 => text_sections.push((key, std::slice::from_ref(val))),
            _ => flatten(key, val, &mut fields),
        }
    }

    if !fields.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (title, rows) in record_sections {
        println!("\n{}:", title);
        print_records(rows);
    }

    for (title, items) in text_sections {
        println!("\n{}:", title);
        if items.is_empty() {
            println!("  (none)");
        }
        for item in items {
            println!("  - {}", scalar_text(item));
        }
    }
}

fn print_records(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", scalar_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in rows.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(h.as_str()).map(cell_text).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

/// Cells hold one line per array element so recommendation bullets stay
/// readable.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join("\n"),
        other => scalar_text(other),
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text_joins_bullets() {
        let bullets = json!(["Cut costs.", "Raise prices."]);
        assert_eq!(cell_text(&bullets), "Cut costs.\nRaise prices.");
        assert_eq!(cell_text(&json!("42")), "42");
    }
}
