//! Shared state for the HTTP adapters.

use std::sync::Arc;
use std::time::Duration;

use crate::application::{
    BatchPolicy, CreateSessionHandler, DeleteSessionHandler, GetSessionHandler,
    RankProductsHandler, RankSessionHandler, SaveSessionHandler, SuggestCriteriaHandler,
    SuggestProductDetailsHandler, SuggestScoresHandler,
};
use crate::ports::{AIProvider, SessionStore};

/// Collaborators every request handler is built from.
#[derive(Clone)]
pub struct AppState {
    pub ai_provider: Arc<dyn AIProvider>,
    pub session_store: Arc<dyn SessionStore>,
    pub batch_policy: BatchPolicy,
    /// Time budget for one batch of per-product completions.
    pub batch_deadline: Option<Duration>,
}

impl AppState {
    /// Creates a new AppState with the default batch policy.
    pub fn new(ai_provider: Arc<dyn AIProvider>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            ai_provider,
            session_store,
            batch_policy: BatchPolicy::default(),
            batch_deadline: None,
        }
    }

    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    pub fn with_batch_deadline(mut self, deadline: Duration) -> Self {
        self.batch_deadline = Some(deadline);
        self
    }

    pub fn suggest_criteria_handler(&self) -> SuggestCriteriaHandler<dyn AIProvider> {
        SuggestCriteriaHandler::new(self.ai_provider.clone())
    }

    pub fn suggest_product_details_handler(&self) -> SuggestProductDetailsHandler<dyn AIProvider> {
        let handler = SuggestProductDetailsHandler::new(self.ai_provider.clone(), self.batch_policy);
        match self.batch_deadline {
            Some(deadline) => handler.with_deadline(deadline),
            None => handler,
        }
    }

    pub fn suggest_scores_handler(&self) -> SuggestScoresHandler<dyn AIProvider> {
        let handler = SuggestScoresHandler::new(self.ai_provider.clone(), self.batch_policy);
        match self.batch_deadline {
            Some(deadline) => handler.with_deadline(deadline),
            None => handler,
        }
    }

    pub fn rank_products_handler(&self) -> RankProductsHandler {
        RankProductsHandler::new()
    }

    pub fn create_session_handler(&self) -> CreateSessionHandler {
        CreateSessionHandler::new(self.session_store.clone())
    }

    pub fn save_session_handler(&self) -> SaveSessionHandler {
        SaveSessionHandler::new(self.session_store.clone())
    }

    pub fn get_session_handler(&self) -> GetSessionHandler {
        GetSessionHandler::new(self.session_store.clone())
    }

    pub fn rank_session_handler(&self) -> RankSessionHandler {
        RankSessionHandler::new(self.session_store.clone())
    }

    pub fn delete_session_handler(&self) -> DeleteSessionHandler {
        DeleteSessionHandler::new(self.session_store.clone())
    }
}
