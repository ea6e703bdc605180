//! Implementation of the `init` command.
//!
//! Creates `.issuedesk/` with a configuration file, an issues file (empty,
//! or seeded with sample issues) and a `.gitignore`.

use crate::config::{
    CONFIG_FILE_NAME, DEFAULT_PREFIX, DESK_DIR_NAME, DeskConfig, ISSUES_FILE_NAME, validate_prefix,
};
use crate::domain::{Issue, IssueId, IssueStatus, Priority};
use crate::error::{Error, Result};
use crate::id_generation::IdGenerator;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the gitignore file within `.issuedesk`
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created `.issuedesk` directory
    pub desk_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created issues file
    pub issues_file: PathBuf,
    /// The prefix used for issue IDs
    pub prefix: String,
    /// Number of sample issues written
    pub seeded: usize,
}

/// Options for [`init`].
#[derive(Debug, Clone, Default)]
pub struct InitOptions<'a> {
    /// Issue id prefix; defaults to [`DEFAULT_PREFIX`]. Surrounding
    /// whitespace is trimmed.
    pub prefix: Option<&'a str>,
    /// Seed the issues file with [`sample_issues`].
    pub sample_data: bool,
}

/// Initialize a new workspace in `base_dir`.
///
/// # Errors
///
/// Returns an error if `.issuedesk/` already exists, the prefix is invalid,
/// or a file system operation fails.
pub async fn init(base_dir: &Path, options: InitOptions<'_>) -> Result<InitResult> {
    let prefix = options.prefix.unwrap_or(DEFAULT_PREFIX).trim();
    validate_prefix(prefix)?;

    let desk_dir = base_dir.join(DESK_DIR_NAME);
    if desk_dir.exists() {
        return Err(Error::Config(format!(
            "issuedesk is already initialized in this directory. Found existing '{DESK_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&desk_dir).await?;

    let config_file = desk_dir.join(CONFIG_FILE_NAME);
    DeskConfig::new(prefix).save(&config_file).await?;

    let issues_file = desk_dir.join(ISSUES_FILE_NAME);
    let seeded = if options.sample_data {
        let issues = sample_issues(prefix)?;
        issuedesk_jsonl::write_jsonl_atomic(&issues_file, &issues).await?;
        issues.len()
    } else {
        fs::write(&issues_file, "").await?;
        0
    };

    fs::write(
        desk_dir.join(GITIGNORE_FILE_NAME),
        "# Temporary files left by interrupted saves\n*.tmp\n",
    )
    .await?;

    tracing::info!(dir = %desk_dir.display(), prefix, seeded, "initialized workspace");

    Ok(InitResult {
        desk_dir,
        config_file,
        issues_file,
        prefix: prefix.to_string(),
        seeded,
    })
}

/// Three demonstration issues covering every status and priority.
///
/// # Errors
///
/// Fails only if id generation is exhausted, which cannot happen for a
/// fresh generator.
pub fn sample_issues(prefix: &str) -> Result<Vec<Issue>> {
    let seeds = [
        (
            "Login Bug",
            "Users can't log in with valid credentials.",
            IssueStatus::Open,
            Priority::High,
            "dev1@example.com",
            "2024-01-15T10:00:00.000000Z",
            "2024-01-15T10:00:00.000000Z",
        ),
        (
            "UI Glitch on Mobile",
            "Navigation menu overlaps on small screens.",
            IssueStatus::InProgress,
            Priority::Medium,
            "dev2@example.com",
            "2024-01-16T14:30:00.000000Z",
            "2024-01-17T09:15:00.000000Z",
        ),
        (
            "Performance Issue",
            "Page load time exceeds 5 seconds on dashboard.",
            IssueStatus::Closed,
            Priority::Low,
            "dev3@example.com",
            "2024-01-10T08:45:00.000000Z",
            "2024-01-20T16:20:00.000000Z",
        ),
    ];

    let mut generator = IdGenerator::new(prefix);
    seeds
        .into_iter()
        .enumerate()
        .map(
            |(n, (title, description, status, priority, assignee, created_at, updated_at))| -> Result<Issue> {
                Ok(Issue {
                    id: IssueId::new(generator.generate(title, description, n)?),
                    title: title.to_string(),
                    description: description.to_string(),
                    status,
                    priority,
                    assignee: assignee.to_string(),
                    created_at: created_at.to_string(),
                    updated_at: updated_at.to_string(),
                })
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{config_path, is_initialized};
    use crate::storage::{StorageBackend, create_storage};
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_directory_structure() {
        let temp_dir = TempDir::new().unwrap();

        let result = init(temp_dir.path(), InitOptions::default()).await.unwrap();

        assert!(is_initialized(temp_dir.path()));
        assert!(result.config_file.exists());
        assert!(result.desk_dir.join(GITIGNORE_FILE_NAME).exists());
        assert_eq!(result.prefix, DEFAULT_PREFIX);
        assert_eq!(tokio::fs::read_to_string(&result.issues_file).await.unwrap(), "");
    }

    #[tokio::test]
    async fn custom_prefix_is_trimmed_and_saved() {
        let temp_dir = TempDir::new().unwrap();
        let options = InitOptions {
            prefix: Some("  myproj "),
            ..InitOptions::default()
        };

        init(temp_dir.path(), options).await.unwrap();

        let config = DeskConfig::load(&config_path(temp_dir.path())).await.unwrap();
        assert_eq!(config.issue_prefix, "myproj");
    }

    #[tokio::test]
    async fn fails_if_already_initialized() {
        let temp_dir = TempDir::new().unwrap();
        init(temp_dir.path(), InitOptions::default()).await.unwrap();

        let err = init(temp_dir.path(), InitOptions::default()).await.unwrap_err();

        assert!(err.to_string().contains("already initialized"));
    }

    #[tokio::test]
    async fn invalid_prefix_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let options = InitOptions {
            prefix: Some("a"),
            ..InitOptions::default()
        };

        assert!(init(temp_dir.path(), options).await.is_err());
        assert!(!is_initialized(temp_dir.path()));
    }

    #[tokio::test]
    async fn sample_data_loads_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let options = InitOptions {
            sample_data: true,
            ..InitOptions::default()
        };

        let result = init(temp_dir.path(), options).await.unwrap();
        assert_eq!(result.seeded, 3);

        let storage = create_storage(StorageBackend::Jsonl(result.issues_file), "desk".into())
            .await
            .unwrap();
        let issues = storage.list_all().await.unwrap();
        let titles: Vec<_> = issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Login Bug", "UI Glitch on Mobile", "Performance Issue"]);
        assert!(issues.iter().all(|i| i.id.as_str().starts_with("desk-")));
    }
}
