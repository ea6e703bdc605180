//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`: create a workspace in the current directory
//! - `info`: show workspace settings and issue counts
//! - `create`: create an issue
//! - `list`: search, filter, sort and page through issues
//! - `show`: show issue details
//! - `update`: change fields of one or more issues
//!
//! `--json` switches any command to JSON output.
//!
//! # Example
//!
//! ```bash
//! issuedesk init --prefix web --sample-data
//! issuedesk create "Fix login" -D "Valid credentials are rejected" -p high
//! issuedesk list --status open --sort-by priority --sort-order desc
//! issuedesk update web-a1b2 --status in-progress
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{CreateArgs, InfoArgs, InitArgs, ListArgs, ShowArgs, UpdateArgs};
pub use types::{BatchError, BatchResult, PriorityArg, StatusArg};
pub use validators::{validate_issue_id, validate_prefix, validate_title};

/// Issuedesk - a small issue tracker
///
/// Issues live in `.issuedesk/issues.jsonl`, one JSON object per line.
#[derive(Parser, Debug)]
#[command(name = "issuedesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new workspace
    ///
    /// Creates `.issuedesk/` with a configuration file and an issues file.
    Init(InitArgs),

    /// Show workspace information
    Info(InfoArgs),

    /// Create a new issue
    Create(CreateArgs),

    /// List issues
    ///
    /// Supports free-text search, filters, sorting and pagination.
    List(ListArgs),

    /// Show detailed information about issues
    Show(ShowArgs),

    /// Update existing issues
    ///
    /// Only provided, non-empty fields are changed.
    Update(UpdateArgs),
}

impl Cli {
    /// Parse CLI arguments from the command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns clap's error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the parsed command
    ///
    /// # Errors
    ///
    /// Propagates workspace, storage, validation and output errors.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = OutputMode::from_json_flag(self.json);

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args, output_mode).await,
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::Create(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_create(&mut app, args, output_mode).await
            }
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_list(&app, args, output_mode).await
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, args, output_mode).await
            }
            Some(Commands::Update(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_update(&mut app, args, output_mode).await
            }
            None => {
                println!("issuedesk issue tracker");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn no_command() {
        let cli = parse(&["issuedesk"]);
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn global_json_flag_after_subcommand() {
        let cli = parse(&["issuedesk", "list", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn init_with_prefix_and_sample_data() {
        let cli = parse(&["issuedesk", "init", "--prefix", "web", "--sample-data"]);
        let Some(Commands::Init(args)) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.prefix.as_deref(), Some("web"));
        assert!(args.sample_data);
        assert!(!args.quiet);
    }

    #[test]
    fn init_rejects_bad_prefix() {
        assert!(Cli::try_parse_from(["issuedesk", "init", "--prefix", "x"]).is_err());
    }

    #[test]
    fn create_requires_title_and_description() {
        assert!(Cli::try_parse_from(["issuedesk", "create"]).is_err());
        assert!(Cli::try_parse_from(["issuedesk", "create", "Fix login"]).is_err());
        assert!(Cli::try_parse_from(["issuedesk", "create", "   ", "-D", "x"]).is_err());
    }

    #[test]
    fn create_with_all_fields() {
        let cli = parse(&[
            "issuedesk",
            "create",
            "Fix login",
            "-D",
            "Valid credentials rejected",
            "--status",
            "in-progress",
            "--priority",
            "high",
            "--assignee",
            "ana",
        ]);
        let Some(Commands::Create(args)) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(args.title, "Fix login");
        assert_eq!(args.status, Some(StatusArg::InProgress));
        assert_eq!(args.priority, Some(PriorityArg::High));
        assert_eq!(args.assignee.as_deref(), Some("ana"));
    }

    #[test]
    fn create_rejects_unknown_priority() {
        let result = Cli::try_parse_from([
            "issuedesk", "create", "t", "-D", "d", "--priority", "urgent",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn list_passes_raw_values_through() {
        let cli = parse(&[
            "issuedesk",
            "list",
            "-q",
            "login",
            "--status",
            "open",
            "--sort-by",
            "priority",
            "--sort-order",
            "asc",
            "--page",
            "2",
            "--page-size",
            "5",
        ]);
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        let params = args.to_params();
        assert_eq!(params.search.as_deref(), Some("login"));
        assert_eq!(params.status.as_deref(), Some("open"));
        assert_eq!(params.sort_by.as_deref(), Some("priority"));
        assert_eq!(params.sort_order.as_deref(), Some("asc"));
        assert_eq!(params.page.as_deref(), Some("2"));
        assert_eq!(params.page_size.as_deref(), Some("5"));
        assert_eq!(params.priority, None);
    }

    #[test]
    fn show_accepts_multiple_ids() {
        let cli = parse(&["issuedesk", "show", "desk-a1b2", "desk-c3d4"]);
        let Some(Commands::Show(args)) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.issue_ids, vec!["desk-a1b2", "desk-c3d4"]);
    }

    #[test]
    fn show_requires_an_id() {
        assert!(Cli::try_parse_from(["issuedesk", "show"]).is_err());
    }

    #[test]
    fn update_status_only() {
        let cli = parse(&["issuedesk", "update", "desk-a1b2", "--status", "closed"]);
        let Some(Commands::Update(args)) = cli.command else {
            panic!("expected update");
        };
        assert_eq!(args.status, Some(StatusArg::Closed));
        assert!(args.title.is_none());
        assert!(args.priority.is_none());
    }
}
