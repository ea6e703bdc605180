//! Buffered JSONL writing.

use crate::Result;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Async writer that emits one compact JSON document per line.
pub struct JsonlWriter<W> {
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> JsonlWriter<W> {
    /// Wraps `writer` in a buffered JSONL writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Serializes `value` and writes it followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub async fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut line = serde_json::to_vec(value)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        Ok(())
    }

    /// Writes every value of `values`, one per line.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first serialization or write error.
    pub async fn write_all<T, I>(&mut self, values: I) -> Result<()>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.write(&value).await?;
        }
        Ok(())
    }

    /// Flushes buffered output to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying flush fails.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Consumes the writer, returning the underlying buffered writer.
    ///
    /// Buffered data is not flushed; call [`flush`](Self::flush) first.
    #[must_use]
    pub fn into_inner(self) -> BufWriter<W> {
        self.writer
    }
}
