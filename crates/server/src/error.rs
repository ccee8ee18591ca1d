//! Unified error handling for the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{ServiceError, ValidationError};

/// Application-level error type for the cocktail API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed validation; message surfaced verbatim.
    #[error("{0}")]
    Validation(ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request carries no authenticated subject.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Actor lacks the required capability.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(v) => Self::Validation(v),
            ServiceError::NotFound | ServiceError::Repository(RepositoryError::NotFound) => {
                Self::NotFound("resource not found".to_string())
            }
            ServiceError::AlreadyFavorited => {
                Self::Conflict("cocktail already favorited".to_string())
            }
            // Unclassified constraint violations are infrastructure failures.
            ServiceError::Repository(e) => Self::Database(e),
        }
    }
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("cocktail 123".to_string());
        assert_eq!(err.to_string(), "Not found: cocktail 123");

        let err = AppError::Validation(ValidationError::EmptyName);
        assert_eq!(err.to_string(), "cocktail name must not be empty");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Validation(ValidationError::InsufficientIngredients)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Conflict("test".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_service_error_taxonomy_preserved() {
        assert!(matches!(
            AppError::from(ServiceError::Validation(ValidationError::DuplicateIngredient(
                "gin".to_string()
            ))),
            AppError::Validation(ValidationError::DuplicateIngredient(_))
        ));
        assert!(matches!(
            AppError::from(ServiceError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(ServiceError::AlreadyFavorited),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(ServiceError::Repository(RepositoryError::Conflict(
                "x".to_string()
            ))),
            AppError::Database(_)
        ));
    }

    #[test]
    fn test_database_errors_are_opaque() {
        let response =
            AppError::Database(RepositoryError::Conflict("secret detail".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
