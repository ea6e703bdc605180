//! CLI value enums, their domain conversions, and batch result types.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Issue, IssueStatus, Priority};

/// Issue status for CLI arguments.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    /// Not started
    Open,
    /// Being worked on
    InProgress,
    /// Done
    Closed,
}

impl From<StatusArg> for IssueStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => Self::Open,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Closed => Self::Closed,
        }
    }
}

/// Priority for CLI arguments.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

/// A failed item in a multi-issue command.
#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    /// The id as typed by the user.
    pub issue_id: String,
    /// Error message.
    pub error: String,
}

/// Outcome of a command applied to several issues.
#[derive(Debug, Default, Serialize)]
pub struct BatchResult {
    /// Issues that were processed.
    pub succeeded: Vec<Issue>,
    /// Issues that failed, with reasons.
    pub failed: Vec<BatchError>,
}

impl BatchResult {
    /// Empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any item failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Items attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}
