//! Lectern API: error types.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lectern_core::error::DomainError;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Extra state the client needs to render the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(DomainError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(DomainError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, data) = match &self.0 {
            DomainError::NotPurchased { .. } => (
                StatusCode::FORBIDDEN,
                "not_purchased",
                Some(json!({ "isPurchased": false })),
            ),
            DomainError::CourseNotFound(_) => (StatusCode::NOT_FOUND, "course_not_found", None),
            DomainError::UnknownLecture { .. } => {
                (StatusCode::NOT_FOUND, "unknown_lecture", None)
            }
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error", None),
            DomainError::StoreUnavailable(_) => {
                tracing::warn!(error = %self.0, "store unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", None)
            }
        };

        let body = ErrorBody {
            success: false,
            error: error_code,
            message: self.0.to_string(),
            data,
        };

        (status, Json(body)).into_response()
    }
}
