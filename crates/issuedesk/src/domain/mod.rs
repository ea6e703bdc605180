//! Domain types for issue tracking.
//!
//! Field names and enum strings serialized here are the stable wire
//! vocabulary shared by persisted data, the HTTP service and `--json` output.

mod query;
mod timestamp;

pub use query::{
    DEFAULT_PAGE_SIZE, IssuePage, IssueQuery, QueryDefaults, QueryParams, SearchScope, SortField,
    SortOrder,
};
pub use timestamp::{format_timestamp, now_timestamp, parse_timestamp, refreshed_timestamp};

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an issue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(pub String);

impl IssueId {
    /// Create a new issue ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IssueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IssueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An issue record.
///
/// Timestamps are kept as their textual form so that persisted data
/// round-trips verbatim; they are parsed only when compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique identifier, assigned at creation.
    pub id: IssueId,

    /// Non-empty title.
    pub title: String,

    /// Description text.
    pub description: String,

    /// Workflow status.
    pub status: IssueStatus,

    /// Priority level.
    pub priority: Priority,

    /// Free-text assignee; empty when unassigned.
    #[serde(default)]
    pub assignee: String,

    /// Creation timestamp (RFC 3339).
    pub created_at: String,

    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
}

impl Issue {
    /// Checks what every stored record must satisfy: a non-blank title,
    /// parseable timestamps and `createdAt` no later than `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns a short description of the first broken rule.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        let created = parse_timestamp(&self.created_at)
            .ok_or_else(|| format!("unparseable createdAt '{}'", self.created_at))?;
        let updated = parse_timestamp(&self.updated_at)
            .ok_or_else(|| format!("unparseable updatedAt '{}'", self.updated_at))?;
        if created > updated {
            return Err("createdAt is later than updatedAt".to_string());
        }
        Ok(())
    }
}

/// Status of an issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    /// Not yet started
    #[default]
    Open,

    /// Being worked on
    InProgress,

    /// Done
    Closed,
}

impl IssueStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Canonical wire token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// Priority of an issue.
///
/// Ordering for sorts goes through [`Priority::rank`], never through the
/// textual form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait
    Low,

    /// Normal
    #[default]
    Medium,

    /// Urgent
    High,
}

impl Priority {
    /// All priorities from lowest to highest.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Canonical wire token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank: high=3, medium=2, low=1.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidPriority(s.to_string()))
    }
}

/// Data for creating a new issue
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewIssue {
    /// Issue title; must not be blank.
    #[serde(default)]
    pub title: String,

    /// Issue description; must not be blank.
    #[serde(default)]
    pub description: String,

    /// Defaults to open.
    #[serde(default)]
    pub status: Option<IssueStatus>,

    /// Defaults to medium.
    #[serde(default)]
    pub priority: Option<Priority>,

    /// Defaults to unassigned.
    #[serde(default)]
    pub assignee: Option<String>,
}

impl NewIssue {
    /// Convenience constructor with the required fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Rejects a blank title or description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        Ok(())
    }
}

/// Partial update of an issue.
///
/// `None` leaves a field unchanged. An empty string for `title`,
/// `description` or `assignee` is treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueUpdate {
    /// New title
    #[serde(default)]
    pub title: Option<String>,

    /// New description
    #[serde(default)]
    pub description: Option<String>,

    /// New status
    #[serde(default)]
    pub status: Option<IssueStatus>,

    /// New priority
    #[serde(default)]
    pub priority: Option<Priority>,

    /// New assignee
    #[serde(default)]
    pub assignee: Option<String>,
}

impl IssueUpdate {
    /// Applies the provided fields to `issue` and stamps `updated_at`.
    pub fn apply_to(self, issue: &mut Issue, now: &str) {
        if let Some(title) = non_empty(self.title) {
            issue.title = title;
        }
        if let Some(description) = non_empty(self.description) {
            issue.description = description;
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = non_empty(self.assignee) {
            issue.assignee = assignee;
        }
        issue.updated_at = refreshed_timestamp(&issue.updated_at, now);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
