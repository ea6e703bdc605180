//! Error types for issuedesk operations.

use crate::domain::IssueId;
use crate::id_generation::IdGenerationError;
use std::io;
use thiserror::Error;

/// The error type for issuedesk operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSONL persistence error.
    #[error("JSONL error: {0}")]
    Jsonl(#[from] issuedesk_jsonl::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No `.issuedesk` directory in the working directory or its ancestors.
    #[error("Not an issuedesk workspace (run 'issuedesk init' first)")]
    NotInitialized,

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Id generation failed.
    #[error(transparent)]
    IdGeneration(#[from] IdGenerationError),

    /// No issue has the given id.
    #[error("Issue not found: {0}")]
    IssueNotFound(IssueId),

    /// Input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejected input: a missing field, a bad query parameter or a timestamp
/// that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Status outside `open`, `in-progress`, `closed`.
    #[error("invalid status '{0}' (expected open, in-progress or closed)")]
    InvalidStatus(String),

    /// Priority outside `low`, `medium`, `high`.
    #[error("invalid priority '{0}' (expected low, medium or high)")]
    InvalidPriority(String),

    /// Sort order other than `asc` or `desc`.
    #[error("invalid sort order '{0}' (expected asc or desc)")]
    InvalidSortOrder(String),

    /// Page number was not an integer.
    #[error("invalid page '{0}' (expected an integer)")]
    InvalidPage(String),

    /// Page size was not a positive integer.
    #[error("invalid page size '{0}' (expected a positive integer)")]
    InvalidPageSize(String),

    /// A stored timestamp could not be parsed.
    #[error("issue {id} has an unparseable {field} timestamp '{value}'")]
    InvalidTimestamp {
        /// Issue carrying the bad value.
        id: IssueId,
        /// `createdAt` or `updatedAt`.
        field: &'static str,
        /// The raw text.
        value: String,
    },
}

/// A specialized Result type for issuedesk operations.
pub type Result<T> = std::result::Result<T, Error>;
