//! Query parameter types shared by every front end.
//!
//! Front ends collect raw text into [`QueryParams`] and convert it with
//! [`IssueQuery::from_params`], so the CLI and the HTTP service apply the
//! same defaults and reject the same bad input.

use super::{Issue, IssueStatus, Priority};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Field the result set is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Case-insensitive title.
    Title,
    /// Status token.
    Status,
    /// Priority rank.
    Priority,
    /// Case-insensitive assignee.
    Assignee,
    /// Last modification instant.
    #[default]
    UpdatedAt,
    /// Creation instant.
    CreatedAt,
    /// Id token.
    Id,
}

impl SortField {
    /// Every field paired with its parameter token.
    pub const ALL: [(Self, &'static str); 7] = [
        (Self::Title, "title"),
        (Self::Status, "status"),
        (Self::Priority, "priority"),
        (Self::Assignee, "assignee"),
        (Self::UpdatedAt, "updatedAt"),
        (Self::CreatedAt, "createdAt"),
        (Self::Id, "id"),
    ];

    /// Resolves a parameter token; unknown tokens fall back to `updatedAt`.
    #[must_use]
    pub fn from_param(token: &str) -> Self {
        Self::ALL
            .iter()
            .find(|(_, name)| *name == token)
            .map_or_else(Self::default, |(field, _)| *field)
    }

    /// Parameter token for this field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(field, _)| *field == self)
            .map_or("updatedAt", |(_, name)| name)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ValidationError::InvalidSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Fields the free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchScope {
    /// Title or description contains the text.
    #[default]
    TitleAndDescription,
    /// Only the title is searched.
    Title,
}

/// Raw, untyped query parameters as received from a front end.
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Free-text search.
    #[serde(default, alias = "q")]
    pub search: Option<String>,
    /// Status filter.
    #[serde(default)]
    pub status: Option<String>,
    /// Priority filter.
    #[serde(default)]
    pub priority: Option<String>,
    /// Assignee substring filter.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Sort field token.
    #[serde(default)]
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    #[serde(default, alias = "sortDir")]
    pub sort_order: Option<String>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<String>,
    /// Items per page.
    #[serde(default)]
    pub page_size: Option<String>,
}

/// Deployment-level defaults applied during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDefaults {
    /// Fields covered by `search`.
    pub search_scope: SearchScope,
    /// Page size when the request has none.
    pub page_size: usize,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            search_scope: SearchScope::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A fully validated query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Case-insensitive substring; empty disables the filter.
    pub search: String,
    /// Fields `search` applies to.
    pub search_scope: SearchScope,
    /// Exact status match.
    pub status: Option<IssueStatus>,
    /// Exact priority match.
    pub priority: Option<Priority>,
    /// Case-insensitive assignee substring; empty disables the filter.
    pub assignee: String,
    /// Sort key.
    pub sort_by: SortField,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// 1-based page, at least 1.
    pub page: usize,
    /// Items per page, at least 1.
    pub page_size: usize,
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_scope: SearchScope::default(),
            status: None,
            priority: None,
            assignee: String::new(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl IssueQuery {
    /// Validates raw parameters.
    ///
    /// A page below 1 becomes 1. An unknown `sortBy` falls back to
    /// `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for an unknown status, priority or sort
    /// order, a non-integer page, or a page size that is not a positive
    /// integer.
    pub fn from_params(
        params: QueryParams,
        defaults: QueryDefaults,
    ) -> Result<Self, ValidationError> {
        let status = present(params.status)
            .map(|s| s.parse::<IssueStatus>())
            .transpose()?;
        let priority = present(params.priority)
            .map(|p| p.parse::<Priority>())
            .transpose()?;
        let sort_order = present(params.sort_order)
            .map(|o| o.parse::<SortOrder>())
            .transpose()?
            .unwrap_or_default();
        let sort_by = present(params.sort_by)
            .map(|f| SortField::from_param(&f))
            .unwrap_or_default();

        let page = match present(params.page) {
            None => 1,
            Some(text) => {
                let value: i64 = text
                    .trim()
                    .parse()
                    .map_err(|_| ValidationError::InvalidPage(text.clone()))?;
                usize::try_from(value).unwrap_or(0).max(1)
            }
        };

        let page_size = match present(params.page_size) {
            None => defaults.page_size.max(1),
            Some(text) => text
                .trim()
                .parse::<i64>()
                .ok()
                .and_then(|value| usize::try_from(value).ok())
                .filter(|&value| value > 0)
                .ok_or_else(|| ValidationError::InvalidPageSize(text.clone()))?,
        };

        Ok(Self {
            search: present(params.search).unwrap_or_default(),
            search_scope: defaults.search_scope,
            status,
            priority,
            assignee: present(params.assignee).unwrap_or_default(),
            sort_by,
            sort_order,
            page,
            page_size,
        })
    }
}

impl TryFrom<QueryParams> for IssueQuery {
    type Error = ValidationError;

    fn try_from(params: QueryParams) -> Result<Self, Self::Error> {
        Self::from_params(params, QueryDefaults::default())
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePage {
    /// Issues on this page, in sort order.
    pub items: Vec<Issue>,
    /// Effective 1-based page number.
    pub page: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Matches across all pages.
    pub total: usize,
    /// `ceil(total / page_size)`, 0 when nothing matched.
    pub total_pages: usize,
}
