//! CreateSessionHandler - Command handler for starting a decision session.

use std::sync::Arc;

use tracing::info;

use super::snapshot::{DecisionSession, SessionError};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session_id: SessionId,
    pub session: DecisionSession,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl CreateSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Allocates an id and writes an empty session under it.
    pub async fn handle(&self) -> Result<CreateSessionResult, SessionError> {
        let session_id = SessionId::new();
        let session = DecisionSession::default();

        session.save(self.store.as_ref(), session_id).await?;
        info!(session_id = %session_id, "session created");

        Ok(CreateSessionResult {
            session_id,
            session,
        })
    }
}
