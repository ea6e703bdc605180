//! Line-oriented JSONL reading.
//!
//! [`JsonlReader`] yields one deserialized record per non-blank line and keeps
//! a 1-based line counter for diagnostics. [`read_jsonl_resilient`] builds on
//! it to load a whole file while collecting malformed lines as warnings.
//!
//! Lines are read as bytes and decoded one at a time, so a line that is not
//! UTF-8 is a per-line problem rather than a read failure.

use crate::{Error, Result, Warning, WarningCollector};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Async reader for JSON Lines data.
///
/// # Examples
///
/// ```no_run
/// use issuedesk_jsonl::JsonlReader;
/// use tokio::fs::File;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let file = File::open("issues.jsonl").await?;
/// let mut reader = JsonlReader::new(file);
/// while let Some(value) = reader.read_line::<serde_json::Value>().await? {
///     println!("{value}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct JsonlReader<R> {
    reader: BufReader<R>,
    /// 1-based number of the last line consumed, 0 before any read.
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: AsyncRead + Unpin> JsonlReader<R> {
    /// Wraps `reader` in a buffered JSONL reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: Vec::new(),
        }
    }

    /// Returns the number of the last line consumed.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next raw line as bytes, without its trailing newline.
    ///
    /// Returns `Ok(None)` at end of input. Blank lines are returned as empty
    /// slices so callers can decide whether to skip them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the underlying reader fails.
    pub async fn read_raw_line(&mut self) -> Result<Option<&[u8]>> {
        self.buffer.clear();
        let read = self.reader.read_until(b'\n', &mut self.buffer).await?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let mut line = self.buffer.as_slice();
        while let [rest @ .., b'\n' | b'\r'] = line {
            line = rest;
        }
        Ok(Some(line))
    }

    /// Reads and deserializes the next non-blank line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on read failure and [`Error::InvalidFormat`]
    /// (carrying the line number) when the line is not UTF-8 or not valid
    /// JSON for `T`.
    pub async fn read_line<T: DeserializeOwned>(&mut self) -> Result<Option<T>> {
        loop {
            let line_number = self.line_number + 1;
            let Some(bytes) = self.read_raw_line().await? else {
                return Ok(None);
            };
            if bytes.trim_ascii().is_empty() {
                continue;
            }
            let line = std::str::from_utf8(bytes)
                .map_err(|e| Error::InvalidFormat(format!("line {line_number}: {e}")))?;
            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| Error::InvalidFormat(format!("line {line_number}: {e}")));
        }
    }

    /// Consumes the reader, returning the underlying buffered reader.
    #[must_use]
    pub fn into_inner(self) -> BufReader<R> {
        self.reader
    }
}

/// Reads every record of a JSONL file, skipping lines that fail to parse.
///
/// Blank lines are ignored silently. A line that is not UTF-8 produces a
/// [`Warning::SkippedLine`], one that is not valid JSON for `T` produces a
/// [`Warning::MalformedJson`]. Either way loading continues with the next line.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read. Parse failures
/// never cause an error.
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<Warning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = tokio::fs::File::open(path.as_ref()).await?;
    let mut reader = JsonlReader::new(file);
    let mut values = Vec::new();
    let mut warnings = WarningCollector::new();

    loop {
        let line_number = reader.line_number() + 1;
        let Some(bytes) = reader.read_raw_line().await? else {
            break;
        };
        if bytes.trim_ascii().is_empty() {
            continue;
        }
        let line = match std::str::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                warnings.add(Warning::SkippedLine {
                    line_number,
                    reason: format!("invalid UTF-8: {e}"),
                });
                continue;
            }
        };
        match serde_json::from_str::<T>(line) {
            Ok(value) => values.push(value),
            Err(e) => warnings.add(Warning::MalformedJson {
                line_number,
                error: e.to_string(),
            }),
        }
    }

    Ok((values, warnings.into_warnings()))
}
