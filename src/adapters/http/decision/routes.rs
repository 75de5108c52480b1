//! Axum routes for the suggestion and ranking endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{product_details, rank, suggest_criteria, suggest_scores};
use crate::adapters::http::AppState;

/// Creates routes for decision endpoints.
///
/// REST Endpoints:
/// - POST /suggest-criteria - Suggest criteria for a topic
/// - POST /product-details - Per-product, per-criterion descriptions
/// - POST /suggest-scores - Per-product 1-10 scores
/// - POST /rank - Weighted ranking with explanations
pub fn decision_routes() -> Router<AppState> {
    Router::new()
        .route("/suggest-criteria", post(suggest_criteria))
        .route("/product-details", post(product_details))
        .route("/suggest-scores", post(suggest_scores))
        .route("/rank", post(rank))
}
