//! Workspace configuration: `.issuedesk/config.yaml`.
//!
//! ```yaml
//! issue-prefix: desk
//! storage:
//!   backend: memory
//!   data_file: .issuedesk/issues.jsonl
//! query:
//!   search-scope: title-and-description
//!   default-page-size: 10
//! server:
//!   bind: 127.0.0.1:8000
//! ```
//!
//! The `query` and `server` sections may be omitted.

use crate::domain::{DEFAULT_PAGE_SIZE, QueryDefaults, SearchScope};
use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default issue prefix if none specified
pub const DEFAULT_PREFIX: &str = "desk";

/// Name of the workspace directory
pub const DESK_DIR_NAME: &str = ".issuedesk";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the issues data file
pub const ISSUES_FILE_NAME: &str = "issues.jsonl";

/// Only supported storage backend: in-memory with JSONL persistence.
pub const MEMORY_BACKEND: &str = "memory";

/// Default HTTP bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Minimum prefix length
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Maximum prefix length
pub const MAX_PREFIX_LENGTH: usize = 20;

/// Maximum directory depth to traverse when searching for the workspace root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Contents of `config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeskConfig {
    /// Issue ID prefix (e.g., "desk" for "desk-a1b2")
    #[serde(rename = "issue-prefix")]
    pub issue_prefix: String,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Query defaults
    #[serde(default)]
    pub query: QueryConfig,

    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type
    pub backend: String,

    /// Path to the data file, relative to the workspace root
    pub data_file: String,
}

/// Query configuration section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct QueryConfig {
    /// Which fields free-text search covers
    #[serde(default)]
    pub search_scope: SearchScope,

    /// Page size when a request does not give one
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_scope: SearchScope::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Server configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl DeskConfig {
    /// Create a new configuration with the given prefix
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            issue_prefix: prefix.to_string(),
            storage: StorageConfig {
                backend: MEMORY_BACKEND.to_string(),
                data_file: format!("{DESK_DIR_NAME}/{ISSUES_FILE_NAME}"),
            },
            query: QueryConfig::default(),
            server: ServerConfig::default(),
        }
    }

    /// Load and validate configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file can't be read and `Error::Config` if
    /// it is not valid YAML or holds invalid values.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Checks prefix, backend and page size.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        validate_prefix(&self.issue_prefix)?;
        if self.storage.backend != MEMORY_BACKEND {
            return Err(Error::Config(format!(
                "Unsupported storage backend '{}' (expected '{MEMORY_BACKEND}')",
                self.storage.backend
            )));
        }
        if self.query.default_page_size == 0 {
            return Err(Error::Config(
                "default-page-size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Storage backend rooted at the workspace directory `root`.
    #[must_use]
    pub fn storage_backend(&self, root: &Path) -> StorageBackend {
        StorageBackend::Jsonl(root.join(&self.storage.data_file))
    }

    /// Defaults fed into query parameter conversion.
    #[must_use]
    pub fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            search_scope: self.query.search_scope,
            page_size: self.query.default_page_size,
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Validate issue ID prefix format: 2-20 ASCII alphanumerics.
///
/// Expects pre-trimmed input.
///
/// # Errors
///
/// Returns `Error::Config` explaining which rule was broken.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.len() < MIN_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix must be at least {MIN_PREFIX_LENGTH} characters"
        )));
    }

    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(Error::Config(format!(
            "Prefix cannot exceed {MAX_PREFIX_LENGTH} characters"
        )));
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Config(
            "Prefix must contain only alphanumeric characters".to_string(),
        ));
    }

    Ok(())
}

/// Path of the config file inside workspace root `root`.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(DESK_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Check if a directory has been initialized.
#[must_use]
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(DESK_DIR_NAME).exists()
}

/// Find the workspace root by walking up from `start_dir`.
///
/// Returns the first ancestor (including `start_dir`) that contains
/// `.issuedesk/`, or `None` once the filesystem root or the depth limit is
/// reached.
#[must_use]
pub fn find_desk_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if is_initialized(&current) {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
