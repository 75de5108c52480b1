//! HTTP handlers for the suggestion and ranking endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::debug;

use super::dto::{
    criteria_from_inputs, ProductBatchRequest, ProductDetailsResponse, RankRequest, RankResponse,
    SuggestCriteriaRequest, SuggestCriteriaResponse, SuggestScoresResponse,
};
use crate::adapters::http::{ApiError, AppState};
use crate::application::{
    RankProductsCommand, SuggestCriteriaCommand, SuggestProductDetailsCommand,
    SuggestScoresCommand,
};

// ════════════════════════════════════════════════════════════════════════════
// Suggestions
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/suggest-criteria - Suggest criteria for a topic
pub async fn suggest_criteria(
    State(state): State<AppState>,
    body: Result<Json<SuggestCriteriaRequest>, JsonRejection>,
) -> Result<Json<SuggestCriteriaResponse>, ApiError> {
    let Json(req) = body?;
    let result = state
        .suggest_criteria_handler()
        .handle(SuggestCriteriaCommand {
            topic: req.topic,
            products: req.products,
        })
        .await?;

    Ok(Json(SuggestCriteriaResponse {
        criteria: result.criteria,
    }))
}

/// POST /api/product-details - Describe each product against each criterion
pub async fn product_details(
    State(state): State<AppState>,
    body: Result<Json<ProductBatchRequest>, JsonRejection>,
) -> Result<Json<ProductDetailsResponse>, ApiError> {
    let Json(req) = body?;
    let cmd = SuggestProductDetailsCommand {
        topic: req.topic,
        products: req.products,
        criteria: criteria_from_inputs(req.criteria)?,
    };

    let result = state.suggest_product_details_handler().handle(cmd).await?;

    Ok(Json(ProductDetailsResponse {
        details: result.details,
        failures: result.failures,
    }))
}

/// POST /api/suggest-scores - Rate each product on each criterion
pub async fn suggest_scores(
    State(state): State<AppState>,
    body: Result<Json<ProductBatchRequest>, JsonRejection>,
) -> Result<Json<SuggestScoresResponse>, ApiError> {
    let Json(req) = body?;
    let cmd = SuggestScoresCommand {
        topic: req.topic,
        products: req.products,
        criteria: criteria_from_inputs(req.criteria)?,
    };

    let result = state.suggest_scores_handler().handle(cmd).await?;

    Ok(Json(SuggestScoresResponse {
        scores: result.scores,
        failures: result.failures,
    }))
}

// ════════════════════════════════════════════════════════════════════════════
// Ranking
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/rank - Rank products from a score matrix
pub async fn rank(
    State(state): State<AppState>,
    body: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<RankResponse>, ApiError> {
    let Json(req) = body?;
    let cmd = RankProductsCommand {
        products: req.products,
        criteria: criteria_from_inputs(req.criteria)?,
        scores: req.scores,
        details: req.details,
    };

    let result = state.rank_products_handler().handle(cmd)?;
    debug!(ranked = result.ranked.len(), "rank request served");

    Ok(Json(RankResponse {
        ranked: result.ranked,
    }))
}
