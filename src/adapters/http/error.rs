//! Error responses shared by every HTTP adapter.
//!
//! Every failure is rendered as `{"code": ..., "message": ...}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::{SessionError, SuggestionError};
use crate::domain::foundation::{ErrorCode, ValidationError};

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Errors returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Rejected input, 400.
    BadRequest(ErrorCode, String),
    /// Completion service rejected the credentials, 401.
    Unauthorized,
    /// Unknown resource, 404.
    NotFound(String),
    /// Completion service failed, 502.
    BadGateway(String),
    /// Request outlived the server timeout, 504.
    Timeout,
    /// Storage or encoding failure, 500. The detail is logged, not returned.
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(ErrorCode::InvalidFormat, rejection.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.code(), err.to_string())
    }
}

impl From<SuggestionError> for ApiError {
    fn from(err: SuggestionError) -> Self {
        match err {
            SuggestionError::Validation(err) => err.into(),
            SuggestionError::Unauthorized => ApiError::Unauthorized,
            SuggestionError::Service {
                product: Some(product),
                message,
            } => ApiError::BadGateway(format!("{}: {}", product, message)),
            SuggestionError::Service { product: None, message } => ApiError::BadGateway(message),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => ApiError::NotFound(format!("Session not found: {}", id)),
            SessionError::Validation(err) => err.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(code, msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(code, msg))
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(ErrorCode::Unauthorized, "Invalid or missing API key"),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::SessionNotFound, msg),
            ),
            ApiError::BadGateway(msg) => {
                tracing::warn!(error = %msg, "completion service failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(ErrorCode::AIProviderError, msg),
                )
            }
            ApiError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorResponse::new(ErrorCode::Timeout, "Request timed out"),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::StorageError, "An internal error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::SessionStoreError;

    #[test]
    fn validation_maps_to_400() {
        let response = ApiError::from(ValidationError::empty_field("topic")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response = ApiError::from(SuggestionError::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn service_failure_maps_to_502_with_product() {
        let err = ApiError::from(SuggestionError::Service {
            product: Some("Widget".to_string()),
            message: "network error: reset".to_string(),
        });
        assert!(matches!(&err, ApiError::BadGateway(msg) if msg == "Widget: network error: reset"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn session_errors_map_by_kind() {
        let response = ApiError::from(SessionError::NotFound(SessionId::new())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            ApiError::from(SessionError::Storage(SessionStoreError::IoError("disk".into())))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeout_maps_to_504() {
        let response = ApiError::Timeout.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn error_response_uses_code_names() {
        let body = ErrorResponse::new(ErrorCode::EmptyField, "Field 'topic' cannot be empty");
        assert_eq!(body.code, "EMPTY_FIELD");
    }
}
