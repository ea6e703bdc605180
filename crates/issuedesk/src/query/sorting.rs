//! Stable ordering by a single sort field.

use crate::domain::{Issue, SortField, SortOrder, parse_timestamp};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};

/// Precomputed comparison key. Within one sort every key has the same
/// variant, so the derived ordering is the field ordering.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Folded(String),
    Token(&'a str),
    Rank(u8),
    Instant(DateTime<Utc>),
}

fn sort_key(issue: &Issue, field: SortField) -> Result<SortKey<'_>, ValidationError> {
    let key = match field {
        SortField::Title => SortKey::Folded(issue.title.to_lowercase()),
        SortField::Assignee => SortKey::Folded(issue.assignee.to_lowercase()),
        SortField::Status => SortKey::Token(issue.status.as_str()),
        SortField::Id => SortKey::Token(issue.id.as_str()),
        SortField::Priority => SortKey::Rank(issue.priority.rank()),
        SortField::CreatedAt => SortKey::Instant(instant(issue, "createdAt", &issue.created_at)?),
        SortField::UpdatedAt => SortKey::Instant(instant(issue, "updatedAt", &issue.updated_at)?),
    };
    Ok(key)
}

fn instant(issue: &Issue, field: &'static str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_timestamp(value).ok_or_else(|| ValidationError::InvalidTimestamp {
        id: issue.id.clone(),
        field,
        value: value.to_string(),
    })
}

/// Sorts `issues` by `field`.
///
/// `Desc` reverses the comparator rather than the result, so records with
/// equal keys keep their incoming order in both directions.
pub(super) fn sort_issues(
    issues: Vec<&Issue>,
    field: SortField,
    order: SortOrder,
) -> Result<Vec<&Issue>, ValidationError> {
    let mut keyed = issues
        .into_iter()
        .map(|issue| Ok((sort_key(issue, field)?, issue)))
        .collect::<Result<Vec<_>, ValidationError>>()?;

    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Asc => a.cmp(b),
        SortOrder::Desc => a.cmp(b).reverse(),
    });

    Ok(keyed.into_iter().map(|(_, issue)| issue).collect())
}
