//! Command execution logic.

use anyhow::Result;
use serde::Serialize;

use super::args::{CreateArgs, InfoArgs, InitArgs, ListArgs, ShowArgs, UpdateArgs};
use super::types::{BatchError, BatchResult};
use crate::app::App;
use crate::commands::init::{self, InitOptions};
use crate::domain::{Issue, IssueId, IssueQuery, IssueStatus, IssueUpdate, NewIssue};
use crate::output::{self, OutputConfig, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs, output_mode: OutputMode) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let options = InitOptions {
        prefix: args.prefix.as_deref(),
        sample_data: args.sample_data,
    };
    let result = init::init(&current_dir, options).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "deskDir": result.desk_dir.display().to_string(),
            "configFile": result.config_file.display().to_string(),
            "issuesFile": result.issues_file.display().to_string(),
            "prefix": result.prefix,
            "seeded": result.seeded,
        }))?,
        OutputMode::Text if !args.quiet => {
            let config = OutputConfig::from_env();
            println!(
                "{} {}",
                output::success("Initialized issuedesk in", &config),
                result.desk_dir.display()
            );
            println!("  Config: {}", result.config_file.display());
            println!("  Issues: {}", result.issues_file.display());
            println!("  Issue prefix: {}", result.prefix);
            if result.seeded > 0 {
                println!("  Seeded {} sample issue(s)", result.seeded);
            }
        }
        OutputMode::Text => {}
    }

    Ok(())
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusCounts {
    total: usize,
    open: usize,
    in_progress: usize,
    closed: usize,
}

/// Execute the info command
pub async fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let issues = app.storage().list_all().await?;
    let counts = issues
        .iter()
        .fold(StatusCounts::default(), |mut counts, issue| {
            counts.total += 1;
            match issue.status {
                IssueStatus::Open => counts.open += 1,
                IssueStatus::InProgress => counts.in_progress += 1,
                IssueStatus::Closed => counts.closed += 1,
            }
            counts
        });

    let data_file = app.data_file();
    let config = app.config();

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "dataFile": data_file.display().to_string(),
            "issuePrefix": config.issue_prefix,
            "searchScope": config.query.search_scope,
            "defaultPageSize": config.query.default_page_size,
            "issues": counts,
        }))?,
        OutputMode::Text => {
            println!("Issuedesk Workspace");
            println!("===================");
            println!();
            println!("Data file:    {}", data_file.display());
            println!("Issue prefix: {}", config.issue_prefix);
            println!("Page size:    {}", config.query.default_page_size);
            println!();
            println!(
                "Issues: {} total ({} open, {} in progress, {} closed)",
                counts.total, counts.open, counts.in_progress, counts.closed
            );
        }
    }

    Ok(())
}

/// Execute the create command
pub async fn execute_create(app: &mut App, args: &CreateArgs, output_mode: OutputMode) -> Result<()> {
    let new_issue = NewIssue {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.map(Into::into),
        priority: args.priority.map(Into::into),
        assignee: args.assignee.clone(),
    };

    let issue = app.storage_mut().create(new_issue).await?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&issue)?,
        OutputMode::Text => println!("Created issue: {}", issue.id),
    }

    Ok(())
}

/// Execute the list command
pub async fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let query = IssueQuery::from_params(args.to_params(), app.query_defaults())?;
    let page = app.storage().query(&query).await?;
    output::print_page(&page, output_mode)?;
    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let mut issues = Vec::with_capacity(args.issue_ids.len());
    for id in &args.issue_ids {
        issues.push(app.storage().get(&IssueId::new(id.as_str())).await?);
    }

    match output_mode {
        // Always an array, for consistency in scripts.
        OutputMode::Json => output::print_json(&issues)?,
        OutputMode::Text => {
            for (i, issue) in issues.iter().enumerate() {
                if i > 0 {
                    println!();
                    println!("---");
                    println!();
                }
                output::print_issue_details(issue, output_mode)?;
            }
        }
    }

    Ok(())
}

/// Execute the update command
///
/// Each issue is updated and saved on its own; a failure on one id does not
/// stop the rest. The command fails if any id failed.
pub async fn execute_update(app: &mut App, args: &UpdateArgs, output_mode: OutputMode) -> Result<()> {
    let mut result = BatchResult::new();

    for id in &args.issue_ids {
        let update = IssueUpdate {
            title: args.title.clone(),
            description: args.description.clone(),
            status: args.status.map(Into::into),
            priority: args.priority.map(Into::into),
            assignee: args.assignee.clone(),
        };
        let outcome = app
            .storage_mut()
            .update(&IssueId::new(id.as_str()), update)
            .await;
        save_or_record_failure(app, &mut result, id, outcome).await;
    }

    print_batch_result(&result, "Updated", output_mode)?;

    if result.has_failures() {
        anyhow::bail!(
            "{} of {} update(s) failed",
            result.failed.len(),
            result.total()
        );
    }

    Ok(())
}

/// Save after a successful mutation; on a failed save, reload so memory
/// matches disk again and record the failure.
async fn save_or_record_failure(
    app: &mut App,
    result: &mut BatchResult,
    issue_id: &str,
    outcome: crate::error::Result<Issue>,
) {
    match outcome {
        Ok(issue) => {
            if let Err(save_err) = app.save().await {
                if let Err(reload_err) = app.storage_mut().reload().await {
                    tracing::warn!(error = %reload_err, "reload after failed save also failed");
                }
                result.failed.push(BatchError {
                    issue_id: issue_id.to_string(),
                    error: format!("Save failed: {save_err}"),
                });
            } else {
                result.succeeded.push(issue);
            }
        }
        Err(e) => result.failed.push(BatchError {
            issue_id: issue_id.to_string(),
            error: e.to_string(),
        }),
    }
}

fn print_batch_result(result: &BatchResult, action: &str, output_mode: OutputMode) -> Result<()> {
    match output_mode {
        OutputMode::Json => output::print_json(result)?,
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            if !result.succeeded.is_empty() {
                let ids: Vec<&str> = result.succeeded.iter().map(|i| i.id.as_str()).collect();
                println!(
                    "{action} {} issue(s): {}",
                    result.succeeded.len(),
                    ids.join(", ")
                );
            }
            if !result.failed.is_empty() {
                eprintln!(
                    "{}",
                    output::error(&format!("Failed {} issue(s):", result.failed.len()), &config)
                );
                for err in &result.failed {
                    eprintln!("  {}: {}", err.issue_id, err.error);
                }
            }
        }
    }
    Ok(())
}
