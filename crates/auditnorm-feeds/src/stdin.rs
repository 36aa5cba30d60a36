//! Stdin feed — reads NDJSON audit records piped into the process.

use anyhow::{Context, Result};
use auditnorm_core::Event;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::{read_records, FeedKind, FeedStats};

pub async fn read(tx: &mpsc::Sender<Event>) -> Result<FeedStats> {
    read_records(BufReader::new(tokio::io::stdin()), FeedKind::Stdin, "-", tx)
        .await
        .context("reading stdin")
}
