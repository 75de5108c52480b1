//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, delete_session, get_session, get_session_ranking, save_session,
};
use crate::adapters::http::AppState;

/// Creates the session router with all endpoints.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route(
            "/sessions/:id",
            get(get_session).put(save_session).delete(delete_session),
        )
        .route("/sessions/:id/ranking", get(get_session_ranking))
}
