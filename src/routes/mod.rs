use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::services::vision::AnalysisError;

pub mod health;
pub mod listings;
pub mod metrics;
pub mod profile;

/// Typed failures surfaced at the API boundary. Enough detail for a client
/// to tell "try again" (503) from "this item cannot be processed" (502/400).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Analysis(AnalysisError::Unavailable(msg)) => {
                tracing::warn!(error = %msg, "Vision service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "vision analysis temporarily unavailable, retry later".to_string(),
                )
            }
            ApiError::Analysis(AnalysisError::Malformed(msg)) => {
                tracing::error!(error = %msg, "Vision response failed schema validation");
                (
                    StatusCode::BAD_GATEWAY,
                    "vision analysis returned an unusable result".to_string(),
                )
            }
            ApiError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": detail }))).into_response()
    }
}
