//! Score matrix: product name -> criterion name -> score.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Criterion;
use crate::domain::foundation::Score;

/// Ratings of every product on every criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMatrix(IndexMap<String, IndexMap<String, Score>>);

impl ScoreMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all scores for one product.
    pub fn insert_product(&mut self, product: impl Into<String>, scores: IndexMap<String, Score>) {
        self.0.insert(product.into(), scores);
    }

    /// Sets a single score.
    pub fn set(&mut self, product: &str, criterion: impl Into<String>, score: Score) {
        self.0
            .entry(product.to_string())
            .or_default()
            .insert(criterion.into(), score);
    }

    /// Looks up a score; `None` when the pair was never rated.
    pub fn get(&self, product: &str, criterion: &str) -> Option<Score> {
        self.0.get(product).and_then(|row| row.get(criterion)).copied()
    }

    /// All scores recorded for a product.
    pub fn product_scores(&self, product: &str) -> Option<&IndexMap<String, Score>> {
        self.0.get(product)
    }

    /// Adds the neutral score for every (product, criterion) pair that is missing.
    ///
    /// Existing scores are left untouched.
    pub fn fill_missing(&mut self, products: &[String], criteria: &[Criterion]) {
        for product in products {
            for criterion in criteria {
                if self.get(product, &criterion.name).is_none() {
                    self.set(product, criterion.name.clone(), Score::NEUTRAL);
                }
            }
        }
    }

    /// Iterates over products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Score>)> {
        self.0.iter().map(|(product, row)| (product.as_str(), row))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
