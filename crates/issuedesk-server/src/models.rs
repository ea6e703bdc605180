//! Response envelopes that are not plain domain types.
//!
//! Issues, pages and request bodies reuse the core's serde types directly.

use serde::{Deserialize, Serialize};

/// `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

impl HealthResponse {
    /// The healthy response.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Top-level error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// The error details.
    pub error: ErrorPayload,
}

/// Error code and message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    /// Machine-readable code: `validation_error`, `invalid_body`,
    /// `not_found` or `internal_error`.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}
