//! File feed — reads NDJSON audit records from a file on disk.

use std::path::Path;

use anyhow::{Context, Result};
use auditnorm_core::Event;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::{read_records, FeedKind, FeedStats};

pub async fn read(path: &Path, tx: &mpsc::Sender<Event>) -> Result<FeedStats> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("opening {}", path.display()))?;
    let origin = path.display().to_string();
    read_records(BufReader::new(file), FeedKind::File, &origin, tx)
        .await
        .with_context(|| format!("reading {origin}"))
}
