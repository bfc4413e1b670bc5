//! Loose value coercions.

use serde_json::Value;

/// Truthiness of a parameter value.
///
/// The string `"false"`, `false`, `null` and a missing value are false.
/// Everything else is true, including `""`, `"0"` and `0`.
pub fn to_bool(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::String(s)) => s != "false",
        Some(_) => true,
    }
}

/// Splits a comma-separated include hint into its entries.
///
/// Arrays contribute each string element; empty entries are dropped.
pub(crate) fn include_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => split_commas(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .flat_map(split_commas)
            .collect(),
        _ => Vec::new(),
    }
}

fn split_commas(s: &str) -> Vec<String> {
    s.split(',')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
