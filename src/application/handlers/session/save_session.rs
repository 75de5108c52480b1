//! SaveSessionHandler - Replaces the stored state of a session.

use std::sync::Arc;

use tracing::debug;

use super::snapshot::{DecisionSession, SessionError};
use crate::domain::decision::{CriteriaSet, ProductSet};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

/// Command to save a session snapshot.
#[derive(Debug, Clone)]
pub struct SaveSessionCommand {
    pub session_id: SessionId,
    pub session: DecisionSession,
}

/// Handler for saving sessions. Saving an unknown id creates it.
pub struct SaveSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl SaveSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Validates and writes the snapshot, returning what was stored.
    ///
    /// Criterion names are trimmed and blank criteria are dropped. Product
    /// names are stored as given. Duplicates of either are rejected. The
    /// topic may still be empty while the user is filling the session in.
    pub async fn handle(&self, cmd: SaveSessionCommand) -> Result<DecisionSession, SessionError> {
        let products = ProductSet::new(cmd.session.products)?;
        let criteria = CriteriaSet::allowing_empty(cmd.session.criteria)?;

        let session = DecisionSession {
            topic: cmd.session.topic.trim().to_string(),
            products: products.as_slice().to_vec(),
            criteria: criteria.as_slice().to_vec(),
            scores: cmd.session.scores,
            product_details: cmd.session.product_details,
        };

        session.save(self.store.as_ref(), cmd.session_id).await?;
        debug!(
            session_id = %cmd.session_id,
            products = session.products.len(),
            criteria = session.criteria.len(),
            "session saved"
        );

        Ok(session)
    }
}
