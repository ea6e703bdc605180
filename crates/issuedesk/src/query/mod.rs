//! The query engine: filter, then sort, then paginate.
//!
//! [`run_query`] is a pure function over a borrowed snapshot. It never
//! mutates the records it is given and returns owned copies of the issues on
//! the requested page.

mod filter;
mod pagination;
mod sorting;

pub use filter::matches;
pub use pagination::total_pages;

use crate::domain::{Issue, IssuePage, IssueQuery};
use crate::error::ValidationError;

/// Runs `query` over `issues`, which must be in store insertion order.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPageSize`] when `query.page_size` is 0
/// and [`ValidationError::InvalidTimestamp`] when sorting by a timestamp
/// field meets a value that does not parse.
///
/// # Examples
///
/// ```
/// use issuedesk::domain::IssueQuery;
/// use issuedesk::query::run_query;
///
/// let page = run_query(&[], &IssueQuery::default()).unwrap();
/// assert_eq!(page.total, 0);
/// assert_eq!(page.total_pages, 0);
/// ```
pub fn run_query(issues: &[Issue], query: &IssueQuery) -> Result<IssuePage, ValidationError> {
    if query.page_size == 0 {
        return Err(ValidationError::InvalidPageSize("0".to_string()));
    }

    let filtered: Vec<&Issue> = issues.iter().filter(|issue| matches(issue, query)).collect();
    let sorted = sorting::sort_issues(filtered, query.sort_by, query.sort_order)?;

    tracing::debug!(
        total = sorted.len(),
        page = query.page,
        page_size = query.page_size,
        sort_by = %query.sort_by,
        "query evaluated"
    );

    Ok(pagination::paginate(&sorted, query.page, query.page_size))
}
