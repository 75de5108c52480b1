//! HTTP handlers for session endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{SaveSessionRequest, SessionResponse};
use crate::adapters::http::decision::{criteria_from_inputs, RankResponse};
use crate::adapters::http::{ApiError, AppState};
use crate::application::{DecisionSession, SaveSessionCommand};
use crate::domain::foundation::{ErrorCode, SessionId};

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| ApiError::BadRequest(ErrorCode::InvalidFormat, "Invalid session ID".to_string()))
}

/// POST /api/sessions - Create a new, empty session
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let result = state.create_session_handler().handle().await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id: result.session_id.to_string(),
            session: result.session,
        }),
    ))
}

/// PUT /api/sessions/:id - Replace a session's state
pub async fn save_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    body: Result<Json<SaveSessionRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let Json(req) = body?;

    let cmd = SaveSessionCommand {
        session_id,
        session: DecisionSession {
            topic: req.topic,
            products: req.products,
            criteria: criteria_from_inputs(req.criteria)?,
            scores: req.scores,
            product_details: req.product_details,
        },
    };

    let session = state.save_session_handler().handle(cmd).await?;

    Ok(Json(SessionResponse {
        session_id: session_id.to_string(),
        session,
    }))
}

/// GET /api/sessions/:id - Get a session
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let session = state.get_session_handler().handle(session_id).await?;

    Ok(Json(SessionResponse {
        session_id: session_id.to_string(),
        session,
    }))
}

/// GET /api/sessions/:id/ranking - Rank the products stored in a session
pub async fn get_session_ranking(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<RankResponse>, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let result = state.rank_session_handler().handle(session_id).await?;

    Ok(Json(RankResponse {
        ranked: result.ranked,
    }))
}

/// DELETE /api/sessions/:id - Delete a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    state.delete_session_handler().handle(session_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_session_id_rejects_garbage() {
        assert!(matches!(
            parse_session_id("not-a-uuid"),
            Err(ApiError::BadRequest(ErrorCode::InvalidFormat, _))
        ));
        let id = SessionId::new();
        assert_eq!(parse_session_id(&id.to_string()).unwrap(), id);
    }
}
