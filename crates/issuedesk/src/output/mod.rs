//! Output formatting for CLI commands.
//!
//! Every printer comes in two flavors: human-readable text and pretty JSON
//! for scripts. Text rendering writes to any [`Write`] so it can be tested
//! against a buffer.
//!
//! Submodules:
//! - [`color`]: semantic colors and status glyphs

pub mod color;

use crate::domain::{Issue, IssuePage, parse_timestamp};
use serde::Serialize;
use std::env;
use std::io::{self, Write};

pub use color::{error, success};

use color::{bold, colored_status_icon, colorize_id, colorize_priority, colorize_status, dimmed};

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Settings that control text rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Use ASCII glyphs instead of Unicode.
    pub use_ascii: bool,
    /// Emit ANSI colors.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a config with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Build a config from the environment.
    ///
    /// Reads:
    /// - `ISSUEDESK_MAX_WIDTH`: maximum content width (default 80)
    /// - `ISSUEDESK_ASCII`: `1`/`true` for ASCII-only glyphs
    /// - `NO_COLOR`: any value disables colors
    /// - `ISSUEDESK_COLOR`: `0`/`false` disables colors
    #[must_use]
    pub fn from_env() -> Self {
        let max_width = match env::var("ISSUEDESK_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "ISSUEDESK_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = env::var("ISSUEDESK_ASCII")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        // https://no-color.org/
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("ISSUEDESK_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_WIDTH, false, true)
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn get_terminal_width() -> usize {
    terminal_size::terminal_size().map_or(DEFAULT_TERMINAL_WIDTH, |(w, _)| usize::from(w.0))
}

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Text,
    /// JSON for programmatic use.
    Json,
}

impl OutputMode {
    /// `Json` when `json` is set, `Text` otherwise.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Print a page of query results.
pub fn print_page(page: &IssuePage, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => write_page_text(&mut handle, page, &OutputConfig::from_env()),
        OutputMode::Json => write_json(&mut handle, page),
    }
}

/// Print every field of an issue (for `show`).
pub fn print_issue_details(issue: &Issue, mode: OutputMode) -> io::Result<()> {
    let mut handle = io::stdout().lock();
    match mode {
        OutputMode::Text => {
            let config = OutputConfig::from_env();
            let width = get_terminal_width().min(config.max_width);
            write_issue_details_text(&mut handle, issue, width, &config)
        }
        OutputMode::Json => write_json(&mut handle, issue),
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    write_json(&mut io::stdout().lock(), value)
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(w, "{json}")
}

fn write_issue_line<W: Write>(w: &mut W, issue: &Issue, config: &OutputConfig) -> io::Result<()> {
    write!(
        w,
        "{} {}  {}  {}",
        colored_status_icon(issue.status, config),
        colorize_id(issue.id.as_str(), config),
        colorize_priority(issue.priority, config),
        issue.title
    )?;
    if !issue.assignee.is_empty() {
        write!(w, "  {}", dimmed(&format!("@{}", issue.assignee), config))?;
    }
    writeln!(w)
}

fn write_page_text<W: Write>(w: &mut W, page: &IssuePage, config: &OutputConfig) -> io::Result<()> {
    if page.items.is_empty() {
        if page.total == 0 {
            writeln!(w, "No issues found.")?;
        } else {
            writeln!(
                w,
                "Page {} is past the end ({} issue(s) in {} page(s)).",
                page.page, page.total, page.total_pages
            )?;
        }
        return Ok(());
    }

    for issue in &page.items {
        write_issue_line(w, issue, config)?;
    }
    writeln!(w)?;
    writeln!(
        w,
        "{}",
        dimmed(
            &format!(
                "Page {}/{} ({} issue(s), {} per page)",
                page.page, page.total_pages, page.total, page.page_size
            ),
            config
        )
    )
}

fn write_issue_details_text<W: Write>(
    w: &mut W,
    issue: &Issue,
    width: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {}: {}",
        colored_status_icon(issue.status, config),
        colorize_id(issue.id.as_str(), config),
        issue.title
    )?;
    writeln!(
        w,
        "{}  {}    {}  {}",
        dimmed("Status:", config),
        colorize_status(issue.status, config),
        dimmed("Priority:", config),
        colorize_priority(issue.priority, config)
    )?;
    if !issue.assignee.is_empty() {
        writeln!(w, "{} {}", dimmed("Assignee:", config), issue.assignee)?;
    }
    writeln!(
        w,
        "{} {}    {} {}",
        dimmed("Created:", config),
        display_timestamp(&issue.created_at),
        dimmed("Updated:", config),
        display_timestamp(&issue.updated_at)
    )?;

    if !issue.description.trim().is_empty() {
        writeln!(w)?;
        writeln!(w, "{}:", bold("Description", config))?;
        for line in wrap_text(&issue.description, width.saturating_sub(2)) {
            writeln!(w, "  {line}")?;
        }
    }
    Ok(())
}

/// Short form of a stored timestamp; unparseable text is shown verbatim.
fn display_timestamp(text: &str) -> String {
    parse_timestamp(text).map_or_else(
        || text.to_string(),
        |instant| instant.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Wrap text to `max_width`, keeping existing line breaks.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, max_width.max(1))
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            }
        })
        .collect()
}
