//! Non-fatal problems found while loading JSONL data.

use std::fmt;

/// A problem with a single line that did not stop loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The line was not valid JSON for the expected record type.
    MalformedJson {
        /// 1-based line number.
        line_number: usize,
        /// Parser message.
        error: String,
    },

    /// The line was not valid UTF-8 and could not be parsed at all.
    SkippedLine {
        /// 1-based line number.
        line_number: usize,
        /// Why the line was skipped.
        reason: String,
    },
}

impl Warning {
    /// Line the warning refers to.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedJson { line_number, .. } | Self::SkippedLine { line_number, .. } => {
                *line_number
            }
        }
    }

    /// Human-readable one-line description.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedJson { line_number, error } => {
                format!("line {line_number}: malformed JSON: {error}")
            }
            Self::SkippedLine {
                line_number,
                reason,
            } => format!("line {line_number}: skipped: {reason}"),
        }
    }

    /// Variant name, for grouping and filtering.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } => "MalformedJson",
            Self::SkippedLine { .. } => "SkippedLine",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Ordered accumulator for warnings produced during a single load.
#[derive(Debug, Default, Clone)]
pub struct WarningCollector {
    warnings: Vec<Warning>,
}

impl WarningCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn add(&mut self, warning: Warning) {
        tracing::debug!(kind = warning.kind(), line = warning.line_number(), "jsonl warning");
        self.warnings.push(warning);
    }

    /// Number of warnings recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Whether no warnings were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Borrowed view in insertion order.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Consumes the collector.
    #[must_use]
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
