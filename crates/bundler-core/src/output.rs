//! Serialization of the table feed and reports.

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// How records are laid out on the output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedFormat {
    /// One pretty-printed JSON array
    #[default]
    Json,
    /// One compact JSON object per line
    JsonLines,
}

impl FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            other => Err(format!("unknown format '{other}', expected json or jsonl")),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::JsonLines => "jsonl",
        })
    }
}

/// Writes a batch of records in a [`FeedFormat`].
pub struct FeedWriter<W: Write> {
    writer: W,
    format: FeedFormat,
}

impl<W: Write> FeedWriter<W> {
    pub fn new(writer: W, format: FeedFormat) -> Self {
        Self { writer, format }
    }

    /// Write every record and flush. Returns the number of records written.
    pub fn write_records<T: Serialize>(&mut self, records: &[T]) -> io::Result<usize> {
        match self.format {
            FeedFormat::Json => {
                serde_json::to_writer_pretty(&mut self.writer, records).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
            FeedFormat::JsonLines => {
                for record in records {
                    serde_json::to_writer(&mut self.writer, record).map_err(io::Error::other)?;
                    writeln!(self.writer)?;
                }
            }
        }
        self.writer.flush()?;
        Ok(records.len())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
