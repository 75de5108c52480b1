//! HTTP DTOs for the suggestion and ranking endpoints.
//!
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::application::{ProductFailure, RankedEntry};
use crate::domain::decision::{Criterion, ProductDetail, ScoreMatrix};
use crate::domain::foundation::{ValidationError, Weight};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A criterion as sent by clients: a bare name, or a name with an optional weight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CriterionInput {
    Name(String),
    Weighted {
        name: String,
        #[serde(default)]
        weight: Option<i64>,
    },
}

impl TryFrom<CriterionInput> for Criterion {
    type Error = ValidationError;

    fn try_from(input: CriterionInput) -> Result<Self, Self::Error> {
        match input {
            CriterionInput::Name(name) => Ok(Criterion::with_default_weight(name)),
            CriterionInput::Weighted { name, weight: None } => {
                Ok(Criterion::with_default_weight(name))
            }
            CriterionInput::Weighted {
                name,
                weight: Some(weight),
            } => Ok(Criterion::new(name, Weight::try_new(weight)?)),
        }
    }
}

/// Converts client criteria, failing on the first invalid weight.
pub fn criteria_from_inputs(inputs: Vec<CriterionInput>) -> Result<Vec<Criterion>, ValidationError> {
    inputs.into_iter().map(Criterion::try_from).collect()
}

/// Request to suggest criteria.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestCriteriaRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub products: Vec<String>,
}

/// Request shared by the per-product suggestion endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductBatchRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub criteria: Vec<CriterionInput>,
}

/// Request to rank products locally.
#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub criteria: Vec<CriterionInput>,
    #[serde(default)]
    pub scores: ScoreMatrix,
    #[serde(default)]
    pub details: Vec<ProductDetail>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestCriteriaResponse {
    pub criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetailsResponse {
    pub details: Vec<ProductDetail>,
    pub failures: Vec<ProductFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestScoresResponse {
    pub scores: ScoreMatrix,
    pub failures: Vec<ProductFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub ranked: Vec<RankedEntry>,
}
