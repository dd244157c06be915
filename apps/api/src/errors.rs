use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Generic message shown to clients when the model response cannot be read.
/// Malformed JSON and schema mismatches deliberately share it — the
/// distinction matters for operators (logs), not for end users.
pub const UNREADABLE_RESPONSE_MESSAGE: &str =
    "The AI returned a response that could not be read. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("The configured API key is invalid")]
    InvalidCredential,

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Model response missing required fields: {0}")]
    SchemaMismatch(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidCredential => (
                StatusCode::BAD_GATEWAY,
                "INVALID_CREDENTIAL",
                "The configured API key is invalid. Please check your setup.".to_string(),
            ),
            AppError::MalformedResponse(detail) => {
                tracing::error!("Malformed model response: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    UNREADABLE_RESPONSE_MESSAGE.to_string(),
                )
            }
            AppError::SchemaMismatch(detail) => {
                tracing::error!("Model response schema mismatch: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCHEMA_MISMATCH",
                    UNREADABLE_RESPONSE_MESSAGE.to_string(),
                )
            }
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                (StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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
