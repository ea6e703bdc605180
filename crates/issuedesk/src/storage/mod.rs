//! Storage abstraction layer for issuedesk.
//!
//! The [`IssueStorage`] trait is the record store: it owns the canonical,
//! insertion-ordered issue list, assigns ids and timestamps, and hands
//! read-only snapshots to the query engine. Two backends are provided:
//!
//! - **In-memory**: ephemeral, everything is lost when the process exits
//! - **JSONL**: the in-memory store wrapped so that [`IssueStorage::save`]
//!   writes the collection to a JSON Lines file and
//!   [`IssueStorage::reload`] reads it back
//!
//! The trait is object-safe; front ends hold a `Box<dyn IssueStorage>`.
//!
//! # Example
//!
//! ```no_run
//! use issuedesk::domain::{IssueQuery, NewIssue};
//! use issuedesk::storage::{create_storage, StorageBackend};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut storage = create_storage(StorageBackend::InMemory, "desk".to_string()).await?;
//!
//!     let issue = storage
//!         .create(NewIssue::new("Login Bug", "Users can't log in."))
//!         .await?;
//!     println!("Created issue: {}", issue.id);
//!
//!     let page = storage.query(&IssueQuery::default()).await?;
//!     assert_eq!(page.total, 1);
//!     Ok(())
//! }
//! ```

use crate::domain::{Issue, IssueId, IssuePage, IssueQuery, IssueUpdate, NewIssue};
use crate::error::Result;
use async_trait::async_trait;
use in_memory::InMemoryStorage;
use in_memory::inner::InMemoryStorageInner;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod in_memory;

/// Record store operations.
///
/// Implementations must be `Send + Sync` and serialize their own mutations;
/// concurrent creates never share an id and concurrent updates to one issue
/// are last-write-wins.
#[async_trait]
pub trait IssueStorage: Send + Sync {
    /// Create a new issue.
    ///
    /// Applies defaults (open, medium, unassigned), generates a fresh id and
    /// sets `createdAt = updatedAt = now`. The issue is appended, so insertion
    /// order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` when the title or description is blank.
    /// The store is unchanged on failure.
    async fn create(&mut self, issue: NewIssue) -> Result<Issue>;

    /// Get an issue by ID.
    ///
    /// # Errors
    ///
    /// Returns `Error::IssueNotFound` if no issue has that id.
    async fn get(&self, id: &IssueId) -> Result<Issue>;

    /// Apply a partial update and refresh `updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IssueNotFound` if the issue doesn't exist; nothing is
    /// modified in that case.
    async fn update(&mut self, id: &IssueId, updates: IssueUpdate) -> Result<Issue>;

    /// Snapshot of every issue in insertion order.
    async fn list_all(&self) -> Result<Vec<Issue>>;

    /// Run the query engine over the current records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for a zero page size or, when sorting by a
    /// timestamp, a record whose timestamp does not parse.
    async fn query(&self, query: &IssueQuery) -> Result<IssuePage>;

    /// Bulk-insert existing records, keeping their ids and timestamps.
    ///
    /// A record whose id is already present, or that breaks a record
    /// invariant (blank title, unparseable timestamps, `createdAt` after
    /// `updatedAt`), is skipped with a warning. Returns the number of
    /// records actually inserted.
    async fn import_issues(&mut self, issues: Vec<Issue>) -> Result<usize>;

    /// Persist the current records. A no-op for purely in-memory storage.
    ///
    /// Takes `&self` so that callers holding a shared reference can save
    /// after a mutation made through another handle.
    async fn save(&self) -> Result<()>;

    /// Discard in-memory state and re-read the persisted records.
    ///
    /// Used after a failed [`save`](Self::save) to bring memory back in line
    /// with disk. A no-op for purely in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read.
    async fn reload(&mut self) -> Result<()>;
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral)
    InMemory,

    /// In-memory storage persisted to a JSONL file
    Jsonl(PathBuf),
}

/// Adds JSONL persistence to an in-memory store.
struct JsonlBackedStorage {
    inner: InMemoryStorage,
    path: PathBuf,
}

impl JsonlBackedStorage {
    async fn open(path: PathBuf, prefix: String) -> Result<Self> {
        let storage = Self {
            inner: Arc::new(Mutex::new(InMemoryStorageInner::new(prefix))),
            path,
        };
        storage.load().await?;
        Ok(storage)
    }

    async fn load(&self) -> Result<()> {
        let warnings = in_memory::reload_from_jsonl(&self.inner, &self.path).await?;
        for warning in &warnings {
            tracing::warn!(path = %self.path.display(), %warning, "JSONL load warning");
        }
        Ok(())
    }
}

#[async_trait]
impl IssueStorage for JsonlBackedStorage {
    async fn create(&mut self, issue: NewIssue) -> Result<Issue> {
        self.inner.create(issue).await
    }

    async fn get(&self, id: &IssueId) -> Result<Issue> {
        self.inner.get(id).await
    }

    async fn update(&mut self, id: &IssueId, updates: IssueUpdate) -> Result<Issue> {
        self.inner.update(id, updates).await
    }

    async fn list_all(&self) -> Result<Vec<Issue>> {
        self.inner.list_all().await
    }

    async fn query(&self, query: &IssueQuery) -> Result<IssuePage> {
        self.inner.query(query).await
    }

    async fn import_issues(&mut self, issues: Vec<Issue>) -> Result<usize> {
        self.inner.import_issues(issues).await
    }

    async fn save(&self) -> Result<()> {
        in_memory::save_to_jsonl(&self.inner, &self.path).await
    }

    async fn reload(&mut self) -> Result<()> {
        self.load().await
    }
}

/// Create a storage instance for the given backend.
///
/// For [`StorageBackend::Jsonl`] an existing file is loaded resiliently:
/// bad lines are logged as warnings and skipped. A missing file yields an
/// empty store.
///
/// # Errors
///
/// Returns `Error::Io` if an existing data file cannot be read.
pub async fn create_storage(
    backend: StorageBackend,
    prefix: String,
) -> Result<Box<dyn IssueStorage>> {
    match backend {
        StorageBackend::InMemory => Ok(in_memory::new_in_memory_storage(prefix)),
        StorageBackend::Jsonl(path) => Ok(Box::new(JsonlBackedStorage::open(path, prefix).await?)),
    }
}
