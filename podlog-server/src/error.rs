//! Error types for podlog-server
//!
//! Every handler returns `Result<_, ApiError>`. Client-facing variants carry
//! the exact message sent back as `{"message": ...}`; internal failures are
//! logged and answered with a generic 500.

use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use podlog_common::api::{ApiAuthError, MessageResponse};
use thiserror::Error;
use tracing::{debug, error};

/// Message for a resource id that is not an integer
pub const INVALID_ID: &str = "Invalid id";

/// Main error type for podlog-server handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-domain client payload (400)
    #[error("{0}")]
    BadRequest(String),

    /// Referenced or requested entity absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Missing or rejected credentials (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Uniqueness violation (409)
    #[error("{0}")]
    Conflict(String),

    /// Store or other unexpected failure (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        ApiError::BadRequest(message.to_string())
    }

    pub fn not_found(message: &str) -> Self {
        ApiError::NotFound(message.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<podlog_common::Error> for ApiError {
    fn from(err: podlog_common::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(format!("Database error: {}", err))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Rejected path: {}", rejection.body_text());
        ApiError::bad_request(INVALID_ID)
    }
}

impl From<ApiAuthError> for ApiError {
    fn from(err: ApiAuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(detail) => {
                error!("Request failed: {}", detail);
                "Internal server error".to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Conflict(msg) => msg,
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(ApiAuthError::MissingHeader).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Conflict("x".to_string()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_message_preserved() {
        let err = ApiError::from(ApiAuthError::Expired { exp: 1, now: 2 });
        assert_eq!(err.to_string(), "Token has expired");
    }
}
