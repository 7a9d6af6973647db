use serde_json::Value;
use std::io;

use super::{flatten, result_of, scalar_text};

/// Write the result to stdout as a two-column CSV of dotted field paths,
/// or one row per record when the result is an array of records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = write_csv(&mut wtr, result_of(value));
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, result: &Value) -> csv::Result<()> {
    match result {
        Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
            write_records(wtr, rows)
        }
        Value::Object(_) | Value::Array(_) => {
            let mut fields = Vec::new();
            flatten("", result, &mut fields);
            wtr.write_record(["field", "value"])?;
            for (key, val) in &fields {
                wtr.write_record([key, val])?;
            }
            Ok(())
        }
        scalar => wtr.write_record([scalar_text(scalar)]),
    }
}

fn write_records<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let flattened: Vec<Vec<(String, String)>> = rows
        .iter()
        .map(|row| {
            let mut fields = Vec::new();
            flatten("", row, &mut fields);
            fields
        })
        .collect();

    let Some(first) = flattened.first() else {
        return Ok(());
    };
    let headers: Vec<&str> = first.iter().map(|(k, _)| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for fields in &flattened {
        let row: Vec<&str> = headers
            .iter()
            .map(|h| {
                fields
                    .iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or_default()
            })
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}
