//! Top-level router: every endpoint under `/api`, a health check, and the
//! middleware stack. A request that outlives the timeout gets a JSON 504.

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::routing::get;
use axum::{BoxError, Router};
use http::HeaderValue;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::decision::decision_routes;
use super::session::session_routes;
use super::{ApiError, AppState};

/// Middleware settings.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(120),
            cors_origins: Vec::new(),
        }
    }
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("request timed out");
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}

/// All routes, without middleware.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", decision_routes().merge(session_routes()))
        .route("/health", get(health))
        .with_state(state)
}

/// All routes wrapped in tracing, CORS and timeout layers.
pub fn app_router(state: AppState, options: &HttpOptions) -> Router {
    api_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&options.cors_origins))
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(options.request_timeout)),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
