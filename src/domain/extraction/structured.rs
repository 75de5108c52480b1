//! Structured Extractor - lenient JSON slicing over free-form model output.
//!
//! Two modes:
//! - array-seeking: first parseable `[...]` span, else an empty array
//! - object-seeking: first `{` to last `}`, then the whole text, else an empty object
//!
//! Neither mode ever fails. Malformed output degrades to the empty value of
//! the requested shape so the rest of the pipeline can still complete.

use serde_json::{Map, Value};
use tracing::debug;

/// Extracts the first JSON array embedded in `text`.
///
/// Every `[` is tried in order. For each, the balanced closing `]` is tried
/// first (string- and escape-aware), then the last `]` in the text. The first
/// candidate that parses as a JSON array wins.
pub fn extract_array(text: &str) -> Vec<Value> {
    let last_close = text.rfind(']');

    for (start, _) in text.char_indices().filter(|(_, c)| *c == '[') {
        let balanced = find_balanced_end(text, start, '[', ']');
        let candidates = [balanced, last_close.filter(|end| Some(*end) != balanced)];

        for end in candidates.into_iter().flatten() {
            if end <= start {
                continue;
            }
            if let Ok(Value::Array(items)) = serde_json::from_str(&text[start..=end]) {
                return items;
            }
        }
    }

    debug!(len = text.len(), "no JSON array found in completion");
    Vec::new()
}

/// Extracts the JSON object embedded in `text`.
///
/// Tries, in order: the slice from the first `{` to the last `}`; the
/// balanced object starting at the first `{`; the whole text. Anything that
/// does not parse as a JSON object yields an empty map.
pub fn extract_object(text: &str) -> Map<String, Value> {
    if let Some(start) = text.find('{') {
        if let Some(end) = text.rfind('}').filter(|end| *end > start) {
            if let Some(object) = parse_object(&text[start..=end]) {
                return object;
            }
        }
        if let Some(end) = find_balanced_end(text, start, '{', '}') {
            if let Some(object) = parse_object(&text[start..=end]) {
                return object;
            }
        }
    }

    if let Some(object) = parse_object(text.trim()) {
        return object;
    }

    debug!(len = text.len(), "no JSON object found in completion");
    Map::new()
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str(candidate) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

/// Byte index of the delimiter closing the one at `start`, ignoring
/// delimiters inside JSON strings.
fn find_balanced_end(text: &str, start: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + i);
                }
            }
            _ => {}
        }
    }
    None
}
