//! In-memory storage backend.
//!
//! All data is held in RAM and is **lost when the process exits** unless it
//! is wrapped by the JSONL backend (see [`create_storage`]) or saved with
//! [`save_to_jsonl`].
//!
//! # Layout
//!
//! - `Vec<Issue>` in insertion order, which the query engine relies on for
//!   stable tie-breaking
//! - `HashMap<IssueId, usize>` from id to position for O(1) lookups
//! - a hash-based [`IdGenerator`](crate::id_generation::IdGenerator) that
//!   remembers every id it has seen
//!
//! # Thread Safety
//!
//! The state lives in `Arc<Mutex<InMemoryStorageInner>>`. Every operation
//! holds the lock for its whole duration, so id assignment is unique under
//! concurrent creates and updates are last-write-wins.
//!
//! [`create_storage`]: crate::storage::create_storage

pub(crate) mod inner;
mod jsonl;
mod trait_impl;

use crate::storage::IssueStorage;
use inner::InMemoryStorageInner;
use std::sync::Arc;
use tokio::sync::Mutex;

pub use jsonl::{load_from_jsonl, save_to_jsonl, LoadWarning};
pub(crate) use jsonl::reload_from_jsonl;

/// Thread-safe in-memory storage.
pub(crate) type InMemoryStorage = Arc<Mutex<InMemoryStorageInner>>;

/// Create a new, empty in-memory store whose ids start with `{prefix}-`.
///
/// # Example
///
/// ```
/// use issuedesk::storage::in_memory::new_in_memory_storage;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let storage = new_in_memory_storage("desk".to_string());
///     assert!(storage.list_all().await.unwrap().is_empty());
/// }
/// ```
#[must_use]
pub fn new_in_memory_storage(prefix: String) -> Box<dyn IssueStorage> {
    Box::new(Arc::new(Mutex::new(InMemoryStorageInner::new(prefix))))
}
