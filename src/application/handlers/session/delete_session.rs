//! DeleteSessionHandler - Removes every stored part of a session.

use std::sync::Arc;

use tracing::info;

use super::snapshot::{DecisionSession, SessionError};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Handler for deleting sessions.
pub struct DeleteSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl DeleteSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Fails with `NotFound` when the session has no stored parts.
    pub async fn handle(&self, session_id: SessionId) -> Result<(), SessionError> {
        let exists = DecisionSession::load(self.store.as_ref(), session_id)
            .await?
            .is_some();
        if !exists {
            return Err(SessionError::NotFound(session_id));
        }

        self.store
            .delete_prefix(&session_id.scoped_key(""))
            .await?;
        info!(session_id = %session_id, "session deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn delete_removes_only_that_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let doomed = SessionId::new();
        let kept = SessionId::new();
        DecisionSession::default().save(store.as_ref(), doomed).await.unwrap();
        DecisionSession::default().save(store.as_ref(), kept).await.unwrap();

        DeleteSessionHandler::new(store.clone())
            .handle(doomed)
            .await
            .unwrap();

        assert!(DecisionSession::load(store.as_ref(), doomed).await.unwrap().is_none());
        assert!(DecisionSession::load(store.as_ref(), kept).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_unknown_session_is_not_found() {
        let handler = DeleteSessionHandler::new(Arc::new(InMemorySessionStore::new()));

        let err = handler.handle(SessionId::new()).await.unwrap_err();

        assert!(matches!(err, SessionError::NotFound(_)));
    }
}
