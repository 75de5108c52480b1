//! Qualitative per-criterion description of one product.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-criterion descriptions for one product.
///
/// `product` is always the caller's literal product string, and the keys of
/// `by_criterion` are exactly the caller's criterion names in caller order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: String,
    pub by_criterion: IndexMap<String, String>,
}

impl ProductDetail {
    pub fn new(product: impl Into<String>, by_criterion: IndexMap<String, String>) -> Self {
        Self {
            product: product.into(),
            by_criterion,
        }
    }

    /// Description for a criterion, `None` when absent or empty.
    pub fn description(&self, criterion: &str) -> Option<&str> {
        self.by_criterion
            .get(criterion)
            .map(String::as_str)
            .filter(|d| !d.trim().is_empty())
    }
}
