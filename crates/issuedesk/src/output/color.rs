//! Color and styling helpers for CLI output.
//!
//! Color theme:
//!   - green:  closed issues, completed actions
//!   - yellow: in-progress issues, medium priority
//!   - red:    high priority, errors
//!   - cyan:   issue ids
//!   - dimmed: field labels

use crate::domain::{IssueStatus, Priority};
use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

pub(crate) fn colorize_status(status: IssueStatus, config: &OutputConfig) -> String {
    let text = status.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match status {
        IssueStatus::Open => text.white().to_string(),
        IssueStatus::InProgress => text.yellow().to_string(),
        IssueStatus::Closed => text.green().to_string(),
    }
}

pub(crate) fn colorize_priority(priority: Priority, config: &OutputConfig) -> String {
    let text = priority.as_str();
    if !config.use_colors {
        return text.to_string();
    }
    match priority {
        Priority::High => text.red().bold().to_string(),
        Priority::Medium => text.yellow().to_string(),
        Priority::Low => text.to_string(),
    }
}

pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Status glyph, with an ASCII fallback.
pub(crate) fn status_icon(status: IssueStatus, config: &OutputConfig) -> &'static str {
    match (status, config.use_ascii) {
        (IssueStatus::Open, true) => "o",
        (IssueStatus::InProgress, true) => ">",
        (IssueStatus::Closed, true) => "x",
        (IssueStatus::Open, false) => "○",
        (IssueStatus::InProgress, false) => "◐",
        (IssueStatus::Closed, false) => "●",
    }
}

pub(crate) fn colored_status_icon(status: IssueStatus, config: &OutputConfig) -> String {
    let icon = status_icon(status, config);
    if !config.use_colors {
        return icon.to_string();
    }
    match status {
        IssueStatus::Open => icon.white().to_string(),
        IssueStatus::InProgress => icon.yellow().to_string(),
        IssueStatus::Closed => icon.green().to_string(),
    }
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
