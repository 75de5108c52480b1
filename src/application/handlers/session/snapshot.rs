//! DecisionSession - The typed view over a session's stored blobs.
//!
//! Each part of a session lives under its own key so the parts can be
//! written independently. A blob that no longer decodes is treated as if it
//! were never written; a session exists as long as any of its keys does.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::decision::{Criterion, ProductDetail, ScoreMatrix};
use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};
use crate::ports::{SessionStore, SessionStoreError};

pub const TOPIC_KEY: &str = "decisionTopic";
pub const PRODUCTS_KEY: &str = "decisionProducts";
pub const CRITERIA_KEY: &str = "decisionCriteria";
pub const SCORES_KEY: &str = "decisionScores";
pub const PRODUCT_DETAILS_KEY: &str = "decisionProductDetails";

/// Everything the user has entered or accepted for one decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecisionSession {
    pub topic: String,
    pub products: Vec<String>,
    pub criteria: Vec<Criterion>,
    pub scores: ScoreMatrix,
    pub product_details: Vec<ProductDetail>,
}

/// Errors from session handlers
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] SessionStoreError),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Validation(err) => err.code(),
            SessionError::Storage(_) => ErrorCode::StorageError,
            SessionError::Encoding(_) => ErrorCode::InternalError,
        }
    }
}

impl DecisionSession {
    /// Reads a session, `None` when none of its keys are present.
    pub async fn load(
        store: &dyn SessionStore,
        id: SessionId,
    ) -> Result<Option<Self>, SessionError> {
        let topic: Option<String> = read(store, id, TOPIC_KEY).await?;
        let products: Option<Vec<String>> = read(store, id, PRODUCTS_KEY).await?;
        let criteria: Option<Vec<Criterion>> = read(store, id, CRITERIA_KEY).await?;
        let scores: Option<ScoreMatrix> = read(store, id, SCORES_KEY).await?;
        let product_details: Option<Vec<ProductDetail>> =
            read(store, id, PRODUCT_DETAILS_KEY).await?;

        if topic.is_none()
            && products.is_none()
            && criteria.is_none()
            && scores.is_none()
            && product_details.is_none()
        {
            return Ok(None);
        }

        Ok(Some(Self {
            topic: topic.unwrap_or_default(),
            products: products.unwrap_or_default(),
            criteria: criteria.unwrap_or_default(),
            scores: scores.unwrap_or_default(),
            product_details: product_details.unwrap_or_default(),
        }))
    }

    /// Writes every part of the session.
    pub async fn save(&self, store: &dyn SessionStore, id: SessionId) -> Result<(), SessionError> {
        write(store, id, TOPIC_KEY, &self.topic).await?;
        write(store, id, PRODUCTS_KEY, &self.products).await?;
        write(store, id, CRITERIA_KEY, &self.criteria).await?;
        write(store, id, SCORES_KEY, &self.scores).await?;
        write(store, id, PRODUCT_DETAILS_KEY, &self.product_details).await?;
        Ok(())
    }
}

async fn read<T: DeserializeOwned>(
    store: &dyn SessionStore,
    id: SessionId,
    key: &str,
) -> Result<Option<T>, SessionError> {
    let Some(blob) = store.get(&id.scoped_key(key)).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&blob) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(session_id = %id, key, error = %err, "discarding undecodable session blob");
            Ok(None)
        }
    }
}

async fn write<T: Serialize + ?Sized>(
    store: &dyn SessionStore,
    id: SessionId,
    key: &str,
    value: &T,
) -> Result<(), SessionError> {
    let blob = serde_json::to_string(value).map_err(|e| SessionError::Encoding(e.to_string()))?;
    store.set(&id.scoped_key(key), blob).await?;
    Ok(())
}
