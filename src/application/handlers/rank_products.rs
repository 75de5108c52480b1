//! RankProductsHandler - Local weighted ranking, no model involved

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::analysis::{RankedProduct, RankingEngine};
use crate::domain::decision::{CriteriaSet, Criterion, ProductDetail, ProductSet, ScoreMatrix};
use crate::domain::foundation::ValidationError;

/// Command to rank products from a score matrix
#[derive(Debug, Clone, Default)]
pub struct RankProductsCommand {
    pub products: Vec<String>,
    pub criteria: Vec<Criterion>,
    pub scores: ScoreMatrix,
    /// Optional descriptions woven into explanations.
    pub details: Vec<ProductDetail>,
}

/// One ranked product with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    #[serde(flatten)]
    pub ranked: RankedProduct,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankProductsResult {
    pub ranked: Vec<RankedEntry>,
}

/// Handler for ranking. Pure; holds no collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankProductsHandler;

impl RankProductsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: RankProductsCommand) -> Result<RankProductsResult, ValidationError> {
        let products = ProductSet::new(cmd.products)?;
        let criteria = CriteriaSet::allowing_empty(cmd.criteria)?;

        let ranked = RankingEngine::rank(products.as_slice(), criteria.as_slice(), &cmd.scores)
            .into_iter()
            .map(|item| {
                let detail = cmd.details.iter().find(|d| d.product == item.name);
                let explanation =
                    RankingEngine::explain(&item, criteria.as_slice(), &cmd.scores, detail);
                RankedEntry {
                    ranked: item,
                    explanation,
                }
            })
            .collect::<Vec<_>>();

        debug!(products = ranked.len(), criteria = criteria.len(), "products ranked");

        Ok(RankProductsResult { ranked })
    }
}
