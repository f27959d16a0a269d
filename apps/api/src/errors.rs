use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::tracks::RankError;
use crate::extraction::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Upload exceeds the configured size limit")]
    PayloadTooLarge,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Career track ranking failed: {0}")]
    Ranking(#[from] RankError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extract(e @ ExtractError::UnsupportedType(_)) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FILE_TYPE",
                e.to_string(),
            ),
            AppError::Extract(e) => (
                StatusCode::BAD_REQUEST,
                "UNREADABLE_DOCUMENT",
                e.to_string(),
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Uploaded file is too large".to_string(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Too many requests, try again later".to_string(),
            ),
            AppError::Ranking(e) => {
                tracing::error!("Career track ranking error: {e}");
                internal()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                internal()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Every 5xx shares one body so provider or parser details never reach the caller.
fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal server error occurred".to_string(),
    )
}
