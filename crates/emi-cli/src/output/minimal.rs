use serde_json::Value;

use super::scalar_text;

/// Print just the monthly installment.
///
/// For a session replay this is the installment after the last edit.
pub fn print_minimal(value: &Value) {
    let source = value
        .get("final")
        .or_else(|| value.get("result"))
        .unwrap_or(value);

    match source.get("monthly_emi") {
        Some(emi) => println!("{}", scalar_text(emi)),
        None => println!("{}", scalar_text(source)),
    }
}
