//! GetSessionHandler - Query handlers for reading a session and its ranking.

use std::sync::Arc;

use super::snapshot::{DecisionSession, SessionError};
use crate::application::handlers::rank_products::{
    RankProductsCommand, RankProductsHandler, RankProductsResult,
};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Handler for retrieving a session.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<DecisionSession, SessionError> {
        DecisionSession::load(self.store.as_ref(), session_id)
            .await?
            .ok_or(SessionError::NotFound(session_id))
    }
}

/// Handler that ranks the products stored in a session.
pub struct RankSessionHandler {
    sessions: GetSessionHandler,
    ranking: RankProductsHandler,
}

impl RankSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            sessions: GetSessionHandler::new(store),
            ranking: RankProductsHandler::new(),
        }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<RankProductsResult, SessionError> {
        let session = self.sessions.handle(session_id).await?;

        let result = self.ranking.handle(RankProductsCommand {
            products: session.products,
            criteria: session.criteria,
            scores: session.scores,
            details: session.product_details,
        })?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::decision::{Criterion, ScoreMatrix};
    use crate::domain::foundation::{Score, Weight};

    #[tokio::test]
    async fn get_unknown_session_is_not_found() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::new()));
        let id = SessionId::new();

        let err = handler.handle(id).await.unwrap_err();

        assert!(matches!(err, SessionError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn ranking_uses_stored_scores_and_weights() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = SessionId::new();

        let mut scores = ScoreMatrix::new();
        scores.set("A", "Price", Score::try_new(3).unwrap());
        scores.set("B", "Price", Score::try_new(9).unwrap());
        DecisionSession {
            topic: "laptops".to_string(),
            products: vec!["A".to_string(), "B".to_string()],
            criteria: vec![Criterion::new("Price", Weight::try_new(2).unwrap())],
            scores,
            product_details: vec![],
        }
        .save(store.as_ref(), id)
        .await
        .unwrap();

        let result = RankSessionHandler::new(store).handle(id).await.unwrap();

        assert_eq!(result.ranked[0].ranked.name, "B");
        assert_eq!(result.ranked[0].ranked.weighted_score, 18);
        assert_eq!(result.ranked[1].ranked.weighted_score, 6);
    }

    #[tokio::test]
    async fn ranking_unknown_session_is_not_found() {
        let handler = RankSessionHandler::new(Arc::new(InMemorySessionStore::new()));

        let err = handler.handle(SessionId::new()).await.unwrap_err();

        assert!(matches!(err, SessionError::NotFound(_)));
    }
}
