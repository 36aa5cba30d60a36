//! auditnorm-feeds — record sources for auditnorm.
//!
//! Each feed reads newline-delimited JSON audit records, wraps every record
//! under the raw `o365audit` prefix, and pushes the resulting
//! [`auditnorm_core::Event`] onto an async channel for the pipeline. Lines
//! that are not JSON objects are counted and skipped; they never stop a feed.

use std::fmt;

use anyhow::Result;
use auditnorm_core::{event_from_record, Event};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

pub mod file;
pub mod stdin;

/// Which feed produced a batch of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    File,
    Stdin,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::File => write!(f, "file"),
            FeedKind::Stdin => write!(f, "stdin"),
        }
    }
}

/// Per-feed counters, reported once the feed is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Non-blank lines read.
    pub lines: u64,
    /// Records sent to the pipeline.
    pub records: u64,
    /// Lines skipped because they were not a JSON object.
    pub malformed: u64,
}

/// Read NDJSON records from `reader` until EOF or until the receiver is
/// dropped.
pub async fn read_records<R>(
    reader: R,
    kind: FeedKind,
    origin: &str,
    tx: &mpsc::Sender<Event>,
) -> Result<FeedStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = FeedStats::default();
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.lines += 1;
        let Some(event) = parse_record(line) else {
            stats.malformed += 1;
            tracing::warn!(%kind, origin, line = stats.lines, "skipping malformed audit record");
            continue;
        };
        if tx.send(event).await.is_err() {
            tracing::debug!(%kind, origin, "pipeline receiver closed, stopping feed");
            break;
        }
        stats.records += 1;
    }
    tracing::info!(%kind, origin, ?stats, "feed exhausted");
    Ok(stats)
}

/// Parse one NDJSON line into an event, or `None` if it is not a JSON object.
pub fn parse_record(line: &str) -> Option<Event> {
    match serde_json::from_str::<Value>(line).ok()? {
        Value::Object(record) => Some(event_from_record(record)),
        _ => None,
    }
}
