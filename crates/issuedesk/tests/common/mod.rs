//! Helpers shared by the integration tests.

#![allow(dead_code)]

use issuedesk::domain::{Issue, IssueId, IssueStatus, Priority};
use std::path::Path;
use std::process::{Command, Output};

/// Run the `issuedesk` binary in `dir`.
pub fn run_issuedesk_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_issuedesk"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute issuedesk")
}

/// Create an issue through the CLI and return its id.
pub fn create_issue(dir: &Path, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["--json", "create", title, "-D", "Created by a test"];
    args.extend_from_slice(extra);
    let output = run_issuedesk_in_dir(dir, &args);
    assert!(
        output.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let issue: Issue = serde_json::from_slice(&output.stdout).expect("create prints JSON");
    issue.id.0
}

/// A fully specified record with fixed timestamps.
pub fn issue(id: &str, title: &str, status: IssueStatus, priority: Priority) -> Issue {
    Issue {
        id: IssueId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        status,
        priority,
        assignee: String::new(),
        created_at: "2024-01-01T00:00:00.000000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000000Z".to_string(),
    }
}
