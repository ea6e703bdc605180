//! JSONL persistence for in-memory storage.
//!
//! One issue per line, in store insertion order. Saving replaces the file
//! atomically; loading skips anything it cannot trust and reports it.

use super::InMemoryStorage;
use super::inner::InMemoryStorageInner;
use crate::domain::{Issue, IssueId};
use crate::error::Result;
use crate::storage::IssueStorage;
use issuedesk_jsonl::{Warning as JsonlWarning, read_jsonl_resilient, write_jsonl_atomic};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Non-fatal problems found while loading a JSONL file.
///
/// The offending line or record is skipped and loading continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A line that is not a well-formed issue record.
    MalformedJson {
        /// 1-based file line.
        line_number: usize,
        /// Parser message.
        error: String,
    },

    /// A parsed record that breaks an invariant (blank title, unparseable
    /// timestamps, `createdAt` after `updatedAt`).
    InvalidIssueData {
        /// Id of the rejected record.
        issue_id: IssueId,
        /// 1-based position among successfully parsed records.
        record_number: usize,
        /// What was wrong.
        error: String,
    },

    /// A record reusing an id seen earlier in the file; the first one wins.
    DuplicateId {
        /// The repeated id.
        issue_id: IssueId,
        /// 1-based position among successfully parsed records.
        record_number: usize,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed record: {error}")
            }
            Self::InvalidIssueData {
                issue_id,
                record_number,
                error,
            } => write!(f, "record {record_number} ({issue_id}): {error}"),
            Self::DuplicateId {
                issue_id,
                record_number,
            } => write!(f, "record {record_number}: duplicate id {issue_id}, keeping the first"),
        }
    }
}

/// Load an in-memory store from a JSONL file.
///
/// Malformed lines, invalid records and repeated ids are skipped and
/// returned as warnings alongside the store.
///
/// # Errors
///
/// Returns `Error::Jsonl` if the file cannot be opened or read.
pub async fn load_from_jsonl(
    path: &Path,
    prefix: String,
) -> Result<(Box<dyn IssueStorage>, Vec<LoadWarning>)> {
    let (parsed, mut warnings) = read_records(path).await?;

    let mut inner = InMemoryStorageInner::new(prefix);
    populate(&mut inner, parsed, &mut warnings);
    log_loaded(path, &inner, &warnings);

    Ok((Box::new(Arc::new(Mutex::new(inner))), warnings))
}

/// Replace the records of `storage` with the contents of `path`.
///
/// The id generator survives, so ids issued before the reload stay taken.
/// A missing file leaves the store empty.
pub(crate) async fn reload_from_jsonl(
    storage: &InMemoryStorage,
    path: &Path,
) -> Result<Vec<LoadWarning>> {
    let (parsed, mut warnings) = if tokio::fs::try_exists(path).await? {
        read_records(path).await?
    } else {
        tracing::debug!(path = %path.display(), "data file absent, starting empty");
        (Vec::new(), Vec::new())
    };

    let mut inner = storage.lock().await;
    inner.clear();
    populate(&mut inner, parsed, &mut warnings);
    log_loaded(path, &inner, &warnings);
    Ok(warnings)
}

async fn read_records(path: &Path) -> Result<(Vec<Issue>, Vec<LoadWarning>)> {
    let (parsed, jsonl_warnings) = read_jsonl_resilient::<Issue, _>(path).await?;
    let warnings = jsonl_warnings
        .into_iter()
        .map(|warning| match warning {
            JsonlWarning::MalformedJson { line_number, error }
            | JsonlWarning::SkippedLine {
                line_number,
                reason: error,
            } => LoadWarning::MalformedJson { line_number, error },
        })
        .collect();
    Ok((parsed, warnings))
}

fn populate(inner: &mut InMemoryStorageInner, parsed: Vec<Issue>, warnings: &mut Vec<LoadWarning>) {
    for (index, issue) in parsed.into_iter().enumerate() {
        let record_number = index + 1;
        if let Err(error) = issue.check_invariants() {
            warnings.push(LoadWarning::InvalidIssueData {
                issue_id: issue.id,
                record_number,
                error,
            });
            continue;
        }
        let issue_id = issue.id.clone();
        if !inner.insert(issue) {
            warnings.push(LoadWarning::DuplicateId {
                issue_id,
                record_number,
            });
        }
    }
}

fn log_loaded(path: &Path, inner: &InMemoryStorageInner, warnings: &[LoadWarning]) {
    tracing::debug!(
        path = %path.display(),
        loaded = inner.issues.len(),
        warnings = warnings.len(),
        "loaded issues from JSONL"
    );
}

/// Write every issue of `storage` to `path`, one per line, atomically.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails; the
/// previous file is left intact in that case.
pub async fn save_to_jsonl(storage: &dyn IssueStorage, path: &Path) -> Result<()> {
    let issues = storage.list_all().await?;
    write_jsonl_atomic(path, &issues).await?;
    tracing::info!(path = %path.display(), count = issues.len(), "saved issues");
    Ok(())
}
