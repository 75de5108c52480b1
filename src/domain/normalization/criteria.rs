//! Criteria Normalizer - suggested criterion names into `Criterion` values.

use serde_json::Value;

use crate::domain::decision::Criterion;
use crate::domain::extraction::extract_array;

/// Normalizes extracted criteria items.
///
/// Each item may be a bare value (`"Cost"`) or an object with a `name`
/// field. Names are trimmed; items that yield no name are dropped. Every
/// surviving criterion gets the default weight, because importance is
/// the user's call and never the model's. Input order is preserved and
/// duplicates are kept.
pub fn normalize_criteria(items: &[Value]) -> Vec<Criterion> {
    items
        .iter()
        .filter_map(item_name)
        .map(Criterion::with_default_weight)
        .collect()
}

/// Extracts and normalizes criteria from a raw completion.
pub fn criteria_from_completion(text: &str) -> Vec<Criterion> {
    normalize_criteria(&extract_array(text))
}

fn item_name(item: &Value) -> Option<String> {
    let raw = match item {
        Value::Object(fields) => match fields.get("name") {
            Some(name) if !name.is_null() => text_of(name)?,
            _ => return None,
        },
        other => text_of(other)?,
    };

    let name = raw.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Text form of a scalar JSON value. Containers have none.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
