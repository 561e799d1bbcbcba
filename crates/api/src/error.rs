//! Unified error handling for the HTTP boundary.
//!
//! All route handlers return `Result<T, AppError>`. Storage failures
//! propagate here unchanged and map to generic responses; internal detail
//! never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(RepositoryError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request error");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(RepositoryError::Database(_)) => "Internal server error".to_string(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_409() {
        let err = AppError::Database(RepositoryError::Conflict("taxpayer already exists".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err = AppError::Database(RepositoryError::Database(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::NotFound("taxpayer".into());
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_maps_to_400() {
        let err = AppError::BadRequest("limit must not be negative".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
