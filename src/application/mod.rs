//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Suggestion handlers
    BatchPolicy, ProductFailure, SuggestionError, DEADLINE_MESSAGE,
    SuggestCriteriaCommand, SuggestCriteriaHandler, SuggestCriteriaResult,
    SuggestProductDetailsCommand, SuggestProductDetailsHandler, SuggestProductDetailsResult,
    SuggestScoresCommand, SuggestScoresHandler, SuggestScoresResult,
    // Ranking
    RankProductsCommand, RankProductsHandler, RankProductsResult, RankedEntry,
    // Session handlers
    CreateSessionHandler, CreateSessionResult, DecisionSession, DeleteSessionHandler,
    GetSessionHandler, RankSessionHandler, SaveSessionCommand, SaveSessionHandler, SessionError,
};
