//! Shared handler state.
//!
//! # Locking
//!
//! Reads (`get`, `query`) take the storage read lock. Mutations take the
//! write lock and hold it through the save that follows, so a save always
//! persists a state no other request has half-modified.

use issuedesk::config::{DeskConfig, config_path, find_desk_root};
use issuedesk::domain::QueryDefaults;
use issuedesk::error::Error as CoreError;
use issuedesk::storage::{IssueStorage, create_storage};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage handle plus the query defaults from configuration.
#[derive(Clone)]
pub struct AppState {
    storage: Arc<RwLock<Box<dyn IssueStorage>>>,
    defaults: QueryDefaults,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wrap an existing store.
    #[must_use]
    pub fn new(storage: Box<dyn IssueStorage>, defaults: QueryDefaults) -> Self {
        Self {
            storage: Arc::new(RwLock::new(storage)),
            defaults,
        }
    }

    /// Open the workspace containing `working_dir`.
    ///
    /// Returns the state together with the loaded configuration, which the
    /// binary needs for its bind address.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` when no workspace is found, and propagates
    /// configuration and storage errors.
    pub async fn open(working_dir: &Path) -> Result<(Self, DeskConfig), CoreError> {
        let root = find_desk_root(working_dir).ok_or(CoreError::NotInitialized)?;
        let config = DeskConfig::load(&config_path(&root)).await?;
        let storage =
            create_storage(config.storage_backend(&root), config.issue_prefix.clone()).await?;

        tracing::info!(root = %root.display(), prefix = %config.issue_prefix, "opened workspace");

        Ok((Self::new(storage, config.query_defaults()), config))
    }

    /// The shared store.
    #[must_use]
    pub fn storage(&self) -> &Arc<RwLock<Box<dyn IssueStorage>>> {
        &self.storage
    }

    /// Defaults applied to list queries.
    #[must_use]
    pub fn defaults(&self) -> QueryDefaults {
        self.defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issuedesk::commands::init::{InitOptions, init};
    use tempfile::TempDir;

    #[tokio::test]
    async fn open_reads_configuration_and_data() {
        let dir = TempDir::new().unwrap();
        let options = InitOptions {
            prefix: Some("web"),
            sample_data: true,
        };
        init(dir.path(), options).await.unwrap();

        let (state, config) = AppState::open(dir.path()).await.unwrap();

        assert_eq!(config.issue_prefix, "web");
        assert_eq!(state.defaults(), config.query_defaults());
        assert_eq!(state.storage().read().await.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn open_outside_workspace_fails() {
        let dir = TempDir::new().unwrap();
        let err = AppState::open(dir.path()).await.unwrap_err();
        assert!(matches!(err, CoreError::NotInitialized));
    }
}
