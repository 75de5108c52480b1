//! HTTP adapter for suggestion and ranking endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    criteria_from_inputs, CriterionInput, ProductBatchRequest, ProductDetailsResponse, RankRequest, RankResponse,
    SuggestCriteriaRequest, SuggestCriteriaResponse, SuggestScoresResponse,
};
pub use routes::decision_routes;
