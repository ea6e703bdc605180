//! Application context for CLI command execution.
//!
//! # Example
//!
//! ```no_run
//! use issuedesk::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     println!("{} issues", app.storage().list_all().await?.len());
//!     Ok(())
//! }
//! ```

use crate::config::{DESK_DIR_NAME, DeskConfig, config_path, find_desk_root};
use crate::domain::QueryDefaults;
use crate::error::{Error, Result};
use crate::storage::{IssueStorage, create_storage};
use std::path::{Path, PathBuf};

/// Loaded workspace: configuration plus the store it points at.
pub struct App {
    storage: Box<dyn IssueStorage>,
    desk_dir: PathBuf,
    config: DeskConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("desk_dir", &self.desk_dir)
            .field("config", &self.config)
            .field("storage", &"<dyn IssueStorage>")
            .finish()
    }
}

impl App {
    /// Locate the workspace above `working_dir`, load its configuration and
    /// open its store.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotInitialized` when no `.issuedesk/` is found, and
    /// propagates configuration and storage errors.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_desk_root(working_dir).ok_or(Error::NotInitialized)?;
        let config = DeskConfig::load(&config_path(&root_dir)).await?;
        let storage =
            create_storage(config.storage_backend(&root_dir), config.issue_prefix.clone()).await?;

        tracing::debug!(root = %root_dir.display(), "opened workspace");

        Ok(Self {
            storage,
            desk_dir: root_dir.join(DESK_DIR_NAME),
            config,
        })
    }

    /// Get a mutable reference to the storage.
    pub fn storage_mut(&mut self) -> &mut dyn IssueStorage {
        self.storage.as_mut()
    }

    /// Get an immutable reference to the storage.
    #[must_use]
    pub fn storage(&self) -> &dyn IssueStorage {
        self.storage.as_ref()
    }

    /// Loaded configuration.
    #[must_use]
    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Query defaults from configuration.
    #[must_use]
    pub fn query_defaults(&self) -> QueryDefaults {
        self.config.query_defaults()
    }

    /// Path to the `.issuedesk` directory.
    #[must_use]
    pub fn desk_dir(&self) -> &Path {
        &self.desk_dir
    }

    /// Path to the issues file named by the configuration.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        let root = self.desk_dir.parent().unwrap_or(&self.desk_dir);
        root.join(&self.config.storage.data_file)
    }

    /// Persist the store. Call after every mutation.
    ///
    /// # Errors
    ///
    /// Propagates the storage error.
    pub async fn save(&self) -> Result<()> {
        self.storage.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::{InitOptions, init};
    use tempfile::TempDir;

    #[tokio::test]
    async fn opens_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        let options = InitOptions {
            prefix: Some("proj"),
            ..InitOptions::default()
        };
        init(temp_dir.path(), options).await.unwrap();
        let sub_dir = temp_dir.path().join("src").join("lib");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let app = App::from_directory(&sub_dir).await.unwrap();

        assert_eq!(app.config().issue_prefix, "proj");
        assert!(app.desk_dir().ends_with(".issuedesk"));
        assert_eq!(
            app.data_file(),
            temp_dir.path().join(".issuedesk").join("issues.jsonl")
        );
    }

    #[tokio::test]
    async fn uninitialized_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = App::from_directory(temp_dir.path()).await.unwrap_err();

        assert!(matches!(err, Error::NotInitialized));
    }
}
