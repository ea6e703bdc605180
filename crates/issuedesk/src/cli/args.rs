//! CLI argument structs, one per command.

use clap::Parser;

use super::types::{PriorityArg, StatusArg};
use super::validators::{validate_issue_id, validate_prefix, validate_title};
use crate::domain::QueryParams;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Issue ID prefix (e.g., "proj" for "proj-a1b2")
    ///
    /// Must be 2-20 alphanumeric characters.
    #[arg(short, long, value_parser = validate_prefix)]
    pub prefix: Option<String>,

    /// Seed the workspace with three sample issues
    #[arg(long)]
    pub sample_data: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `create` command
#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Issue title
    #[arg(value_parser = validate_title)]
    pub title: String,

    /// Detailed description (required)
    #[arg(short = 'D', long)]
    pub description: String,

    /// Initial status (default: open)
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Priority (default: medium)
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Assignee
    #[arg(short, long)]
    pub assignee: Option<String>,
}

/// Arguments for the `list` command
///
/// Values are passed through unparsed; the query layer validates them so
/// the CLI and the HTTP service reject the same inputs.
#[derive(Parser, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Filter by status (open, in-progress, closed)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Filter by priority (low, medium, high)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Filter by assignee substring
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Sort field (title, status, priority, assignee, updatedAt, createdAt, id)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort order (asc, desc)
    #[arg(long)]
    pub sort_order: Option<String>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<String>,

    /// Issues per page
    #[arg(long)]
    pub page_size: Option<String>,
}

impl ListArgs {
    /// Raw query parameters, in the same shape the HTTP service receives.
    #[must_use]
    pub fn to_params(&self) -> QueryParams {
        QueryParams {
            search: self.search.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
            assignee: self.assignee.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
            page: self.page.clone(),
            page_size: self.page_size.clone(),
        }
    }
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Issue IDs to show
    #[arg(required = true, num_args = 1.., value_parser = validate_issue_id)]
    pub issue_ids: Vec<String>,
}

/// Arguments for the `update` command
///
/// Empty values are treated as "not provided".
#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Issue IDs to update
    #[arg(required = true, num_args = 1.., value_parser = validate_issue_id)]
    pub issue_ids: Vec<String>,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// New priority
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,

    /// New assignee
    #[arg(short, long)]
    pub assignee: Option<String>,
}
