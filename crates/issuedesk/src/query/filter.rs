//! Filter predicates. Each one passes everything when its parameter is
//! unset, and a record is kept only if every predicate passes.

use crate::domain::{Issue, IssueQuery, IssueStatus, Priority, SearchScope};

/// Whether `issue` passes every filter in `query`.
#[must_use]
pub fn matches(issue: &Issue, query: &IssueQuery) -> bool {
    matches_search(issue, &query.search, query.search_scope)
        && matches_status(issue, query.status)
        && matches_priority(issue, query.priority)
        && matches_assignee(issue, &query.assignee)
}

fn matches_search(issue: &Issue, search: &str, scope: SearchScope) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    contains_folded(&issue.title, &needle)
        || (scope == SearchScope::TitleAndDescription && contains_folded(&issue.description, &needle))
}

fn matches_status(issue: &Issue, status: Option<IssueStatus>) -> bool {
    status.is_none_or(|status| issue.status == status)
}

fn matches_priority(issue: &Issue, priority: Option<Priority>) -> bool {
    priority.is_none_or(|priority| issue.priority == priority)
}

fn matches_assignee(issue: &Issue, assignee: &str) -> bool {
    assignee.is_empty() || contains_folded(&issue.assignee, &assignee.to_lowercase())
}

/// `needle` must already be lowercase.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
