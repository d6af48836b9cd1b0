//! Error types for the Shelf API.
//!
//! ## Status Mapping
//! ```text
//! Validation   → 400  (field-level message)
//! AuthFailed   → 401  (missing/invalid credentials)
//! Forbidden    → 403  (authenticated but refused)
//! NotFound     → 404
//! Conflict     → 409  (duplicate username)
//! Internal     → 500  (details logged, not leaked)
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use shelf_core::ValidationError;
use shelf_db::DbError;

/// API errors, as surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input failed a catalog rule. Carries the offending field.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Missing or invalid credentials.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Authenticated, but the caller is refused.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unknown identifier.
    #[error("{0}")]
    NotFound(String),

    /// Write conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unexpected failure. The message is logged, never sent to callers.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} not found: {}", entity, id))
            }
            DbError::UniqueViolation { field, .. } => {
                ApiError::Conflict(format!("{} already exists", field))
            }
            // The schema's only foreign key is books.author_id, so a FK
            // failure always means the author reference was bad.
            DbError::ForeignKeyViolation { .. } => {
                ApiError::Validation(ValidationError::UnknownReference {
                    field: "author".to_string(),
                    value: "unknown".to_string(),
                })
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// JSON error body: `{"error": "...", "field": "..."}`.
///
/// `field` is present only for validation errors.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: err.to_string(),
                    field: Some(err.field().to_string()),
                },
            ),
            ApiError::AuthFailed(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    error: format!("Authentication failed: {}", msg),
                    field: None,
                },
            ),
            ApiError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorBody {
                    error: format!("Forbidden: {}", msg),
                    field: None,
                },
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: msg.clone(),
                    field: None,
                },
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    error: msg.clone(),
                    field: None,
                },
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal server error".to_string(),
                        field: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_maps_to_404() {
        let err: ApiError = DbError::not_found("Book", "b1").into();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Book not found: b1");
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err: ApiError = DbError::duplicate("username", "reader").into();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn test_fk_violation_maps_to_author_validation() {
        let err: ApiError = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        }
        .into();

        match err {
            ApiError::Validation(v) => assert_eq!(v.field(), "author"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_response_is_400() {
        let err = ApiError::Validation(ValidationError::Required {
            field: "title".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
