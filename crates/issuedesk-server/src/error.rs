//! Error types for the issuedesk HTTP service.
//!
//! Every error renders as `{"error": {"code": "...", "message": "..."}}`.

use crate::models::{ErrorBody, ErrorPayload};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use issuedesk::error::ValidationError;
use thiserror::Error;

/// Errors surfaced by request handlers.
#[derive(Debug, Error)]
pub enum Error {
    /// A query parameter or body field was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The query string could not be decoded.
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// The request body was not valid JSON for the endpoint.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// An error from the issuedesk core.
    #[error(transparent)]
    Core(issuedesk::error::Error),
}

impl From<issuedesk::error::Error> for Error {
    fn from(err: issuedesk::error::Error) -> Self {
        match err {
            issuedesk::error::Error::Validation(inner) => Self::Validation(inner),
            other => Self::Core(other),
        }
    }
}

impl Error {
    /// HTTP status and machine-readable code.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) | Self::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, "validation_error")
            }
            Self::InvalidBody(_) => (StatusCode::BAD_REQUEST, "invalid_body"),
            Self::Core(issuedesk::error::Error::IssueNotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            Self::Core(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorPayload {
                code,
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, Error>;
