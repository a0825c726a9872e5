//! NDJSON writer
//!
//! Writes one JSON object per line. Values are emitted exactly as mapped,
//! so numbers stay numbers and nulls stay null.

use crate::error::{Error, Result};
use crate::mapping::OutputRecord;
use std::io::Write;

/// Streams output records as newline-delimited JSON
#[derive(Debug)]
pub struct NdjsonWriter<W: Write> {
    inner: W,
    lines: usize,
}

impl<W: Write> NdjsonWriter<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner, lines: 0 }
    }

    /// Write a single record as one line
    pub fn write_record(&mut self, record: &OutputRecord) -> Result<()> {
        serde_json::to_writer(&mut self.inner, record)
            .map_err(|e| Error::output(format!("Failed to serialize record: {e}")))?;
        self.inner.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Write a page of records and flush, so each page reaches the reader as a unit
    pub fn write_page(&mut self, records: &[OutputRecord]) -> Result<()> {
        let mut buffer = Vec::with_capacity(records.len() * 256);
        for record in records {
            serde_json::to_writer(&mut buffer, record)
                .map_err(|e| Error::output(format!("Failed to serialize record: {e}")))?;
            buffer.push(b'\n');
        }
        self.inner.write_all(&buffer)?;
        self.inner.flush()?;
        self.lines += records.len();
        Ok(())
    }

    /// Lines written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}
