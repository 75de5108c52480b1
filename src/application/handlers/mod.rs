//! Application handlers.
//!
//! One handler per operation. Suggestion handlers orchestrate the completion
//! port and the normalizers; ranking is local; session handlers read and
//! write the session store.

mod batch;
mod completion;
pub mod prompts;
mod rank_products;
pub mod session;
mod suggest_criteria;
mod suggest_product_details;
mod suggest_scores;

pub use batch::{BatchOutcome, BatchPolicy, ProductFailure, SuggestionError, DEADLINE_MESSAGE};
pub use rank_products::{RankProductsCommand, RankProductsHandler, RankProductsResult, RankedEntry};
pub use session::{
    CreateSessionHandler, CreateSessionResult, DecisionSession, DeleteSessionHandler,
    GetSessionHandler, RankSessionHandler, SaveSessionCommand, SaveSessionHandler, SessionError,
};
pub use suggest_criteria::{SuggestCriteriaCommand, SuggestCriteriaHandler, SuggestCriteriaResult};
pub use suggest_product_details::{
    SuggestProductDetailsCommand, SuggestProductDetailsHandler, SuggestProductDetailsResult,
};
pub use suggest_scores::{SuggestScoresCommand, SuggestScoresHandler, SuggestScoresResult};
