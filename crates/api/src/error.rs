//! HTTP error type with Sentry integration.
//!
//! Every handler returns `Result<T, ApiError>`. Errors render as
//! `{"detail": ...}` bodies; server errors are captured to Sentry before
//! responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use voiceforge_core::{ConsentError, ValidationErrors};

use crate::storage::StorageError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Lead submitted without consent.
    #[error(transparent)]
    Consent(#[from] ConsentError),

    /// Request body is not valid JSON.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// Document store operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Consent(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Storage(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({ "detail": errors }),
            other => json!({ "detail": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
