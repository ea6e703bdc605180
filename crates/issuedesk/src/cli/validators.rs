//! Parse-time validators for clap's `value_parser`.

/// Validate an issue id prefix, delegating to the configuration rules.
pub fn validate_prefix(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    crate::config::validate_prefix(trimmed).map_err(|e| e.to_string())?;
    Ok(trimmed.to_string())
}

/// Accept any non-blank issue id, trimmed.
///
/// Ids are opaque; the store decides whether one exists.
pub fn validate_issue_id(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Issue ID cannot be empty".to_string());
    }
    Ok(s.to_string())
}

/// Reject blank titles. The text is kept as given, matching what the
/// HTTP service stores for the same input.
pub fn validate_title(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    Ok(s.to_string())
}
