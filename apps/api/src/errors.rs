use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gif_search::GifSearchError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every pipeline stage returns this type; the first error aborts the whole
/// generation and no partial post is produced.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A service credential was not configured. Checked before the pipeline starts.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("No results found: {0}")]
    NoResultsFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, also used in the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::MissingCredential(_) => "MISSING_CREDENTIAL",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::EmptyResponse(_) => "EMPTY_RESPONSE",
            AppError::NoResultsFound(_) => "NO_RESULTS_FOUND",
            AppError::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Http(e) => {
                AppError::ServiceUnavailable(format!("text generation request failed: {e}"))
            }
            LlmError::Api { status, message } if status == 401 || status == 403 => {
                AppError::AuthenticationFailed(format!(
                    "text generation service rejected the API key: {message}"
                ))
            }
            LlmError::Api { status, message } => AppError::ServiceUnavailable(format!(
                "text generation service returned {status}: {message}"
            )),
            LlmError::Parse(e) => {
                AppError::MalformedResponse(format!("text generation output did not parse: {e}"))
            }
            LlmError::EmptyContent => {
                AppError::EmptyResponse("text generation returned no content".to_string())
            }
        }
    }
}

impl From<GifSearchError> for AppError {
    fn from(err: GifSearchError) -> Self {
        match err {
            GifSearchError::Http(e) => {
                AppError::ServiceUnavailable(format!("GIF search request failed: {e}"))
            }
            GifSearchError::Unauthorized { status } => AppError::AuthenticationFailed(format!(
                "GIF search service rejected the API key (status {status})"
            )),
            GifSearchError::Api { status, message } => AppError::ServiceUnavailable(format!(
                "GIF search service returned {status}: {message}"
            )),
            GifSearchError::Parse(e) => {
                AppError::MalformedResponse(format!("GIF search output did not parse: {e}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::MissingCredential(what) => (
                StatusCode::PRECONDITION_FAILED,
                format!("{what} is not configured"),
            ),
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Service unavailable: {msg}");
                (StatusCode::SERVICE_UNAVAILABLE, msg.clone())
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed service response: {msg}");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::EmptyResponse(msg) => {
                tracing::error!("Empty service response: {msg}");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::NoResultsFound(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::AuthenticationFailed(msg) => {
                tracing::error!("Authentication failed: {msg}");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
