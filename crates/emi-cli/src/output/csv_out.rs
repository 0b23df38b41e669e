use serde_json::Value;
use std::io;

use super::{row_set, scalar_text};

/// Write output as CSV to stdout. Row sets become one line per row;
/// anything else becomes a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = row_set(value) {
        write_rows(&mut wtr, rows);
    } else {
        let fields = value.get("result").unwrap_or(value);
        if let Value::Object(map) = fields {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &scalar_text(val)]);
            }
        } else {
            let _ = wtr.write_record([&scalar_text(fields)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}
