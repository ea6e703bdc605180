//! JSON Lines support for issuedesk.
//!
//! Provides buffered async reading and writing of JSONL data, resilient
//! loading that reports malformed lines as warnings instead of failing, and
//! crash-safe atomic file writes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod warning;
pub mod writer;

pub use atomic::{write_jsonl_atomic, write_jsonl_atomic_iter};
pub use error::{Error, Result};
pub use reader::{read_jsonl_resilient, JsonlReader};
pub use warning::{Warning, WarningCollector};
pub use writer::JsonlWriter;
