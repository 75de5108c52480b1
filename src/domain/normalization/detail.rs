//! Detail Normalizer - aligns a model's per-criterion descriptions with the
//! caller's criterion names.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::decision::ProductDetail;
use crate::domain::extraction::extract_object;

/// Normalizes an extracted detail object for one product.
///
/// For each authoritative criterion name: exact key match in `byCriterion`,
/// then a case-insensitive match on trimmed keys, else the empty string.
/// Non-text values also become the empty string. The result has exactly the
/// authoritative keys, as given and in order, and `product` is always the
/// caller's literal string, whatever the model echoed back.
pub fn normalize_detail(
    raw: &Map<String, Value>,
    product: &str,
    criterion_names: &[String],
) -> ProductDetail {
    let empty = Map::new();
    let source = match raw.get("byCriterion") {
        Some(Value::Object(by_criterion)) => by_criterion,
        _ => &empty,
    };

    let by_criterion: IndexMap<String, String> = criterion_names
        .iter()
        .map(|name| {
            let description = lookup(source, name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            (name.clone(), description)
        })
        .collect();

    ProductDetail::new(product, by_criterion)
}

/// Extracts and normalizes a product detail from a raw completion.
pub fn detail_from_completion(text: &str, product: &str, criterion_names: &[String]) -> ProductDetail {
    normalize_detail(&extract_object(text), product, criterion_names)
}

fn lookup<'a>(source: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    if let Some(value) = source.get(name).filter(|v| !v.is_null()) {
        return Some(value);
    }

    let wanted = name.trim().to_lowercase();
    source
        .iter()
        .find(|(key, _)| key.trim().to_lowercase() == wanted)
        .map(|(_, value)| value)
}
