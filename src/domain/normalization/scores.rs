//! Score Normalizer - coerces a model's per-criterion ratings into the 1-10 scale.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::extraction::extract_object;
use crate::domain::foundation::Score;

/// Normalized scores for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductScores {
    pub product: String,
    pub scores: IndexMap<String, Score>,
}

/// Normalizes an extracted score object for one product.
///
/// Every authoritative criterion gets an entry. Numbers are used as-is,
/// text is parsed for a leading number; anything else, or a non-finite
/// result, becomes the neutral 5. Finite values are clamped to `[1, 10]`
/// and rounded half-up.
pub fn normalize_scores(
    raw: &Map<String, Value>,
    product: &str,
    criterion_names: &[String],
) -> ProductScores {
    let source = raw.get("scores").and_then(Value::as_object);

    let scores = criterion_names
        .iter()
        .map(|name| {
            let score = source
                .and_then(|scores| scores.get(name.as_str()))
                .and_then(coerce)
                .map(Score::from_raw)
                .unwrap_or(Score::NEUTRAL);
            (name.clone(), score)
        })
        .collect();

    ProductScores {
        product: product.to_string(),
        scores,
    }
}

/// Extracts and normalizes product scores from a raw completion.
pub fn scores_from_completion(text: &str, product: &str, criterion_names: &[String]) -> ProductScores {
    normalize_scores(&extract_object(text), product, criterion_names)
}

fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }
}

/// Parses the longest numeric prefix of `text`, after leading whitespace.
///
/// `"8.7"`, `"7/10"` and `" 9 points"` all parse; `"about 8"` does not.
fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
