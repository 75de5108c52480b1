//! Ranking Engine - weighted scoring, ordering, and contribution-based explanations.

use serde::{Deserialize, Serialize};

use crate::domain::decision::{Criterion, ProductDetail, ScoreMatrix};

/// Most criteria named in one explanation.
const MAX_HIGHLIGHTS: usize = 3;

/// A product's position in the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProduct {
    pub name: String,
    pub weighted_score: u32,
    pub rank: u32,
}

/// Ranking functions.
pub struct RankingEngine;

impl RankingEngine {
    /// Weighted score of one product.
    ///
    /// # Algorithm
    /// score = Σ(weight[criterion] × score[product, criterion])
    ///
    /// # Edge Cases
    /// - No criteria: 0
    /// - Missing cells: Treated as 0 (unrated criteria contribute nothing)
    pub fn weighted_score(product: &str, criteria: &[Criterion], scores: &ScoreMatrix) -> u32 {
        criteria
            .iter()
            .map(|criterion| Self::contribution(product, criterion, scores))
            .sum()
    }

    /// Ranks products by weighted score, highest first.
    ///
    /// The sort is stable: products with equal scores keep their input order.
    /// Ranks are `1..=n` with no gaps and no shared ranks.
    pub fn rank(products: &[String], criteria: &[Criterion], scores: &ScoreMatrix) -> Vec<RankedProduct> {
        let mut scored: Vec<(&String, u32)> = products
            .iter()
            .map(|product| (product, Self::weighted_score(product, criteria, scores)))
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored
            .into_iter()
            .enumerate()
            .map(|(position, (name, weighted_score))| RankedProduct {
                name: name.clone(),
                weighted_score,
                rank: position as u32 + 1,
            })
            .collect()
    }

    /// Explains why a product landed where it did.
    ///
    /// Names up to three criteria with the largest positive contribution,
    /// strongest first. Equal contributions keep criteria order. When a
    /// detail is given, each named criterion carries its description.
    pub fn explain(
        item: &RankedProduct,
        criteria: &[Criterion],
        scores: &ScoreMatrix,
        detail: Option<&ProductDetail>,
    ) -> String {
        if criteria.is_empty() {
            return format!("Ranked #{} based on your ratings.", item.rank);
        }

        let mut contributions: Vec<(&Criterion, u32)> = criteria
            .iter()
            .map(|criterion| (criterion, Self::contribution(&item.name, criterion, scores)))
            .collect();
        contributions.sort_by(|a, b| b.1.cmp(&a.1));

        let highlights: Vec<String> = contributions
            .into_iter()
            .filter(|(_, value)| *value > 0)
            .take(MAX_HIGHLIGHTS)
            .map(|(criterion, _)| {
                match detail.and_then(|d| d.description(&criterion.name)) {
                    Some(description) => format!("{} ({})", criterion.name, description),
                    None => criterion.name.clone(),
                }
            })
            .collect();

        if highlights.is_empty() {
            return format!(
                "Ranked #{} based on your ratings across all criteria.",
                item.rank
            );
        }

        format!(
            "Ranked #{} because it scored strongest on {} given your weights.",
            item.rank,
            join_names(&highlights)
        )
    }

    fn contribution(product: &str, criterion: &Criterion, scores: &ScoreMatrix) -> u32 {
        let score = scores
            .get(product, &criterion.name)
            .map(|s| s.value() as u32)
            .unwrap_or(0);
        criterion.weight.value() as u32 * score
    }
}

/// "A", "A and B", "A, B, and C".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
