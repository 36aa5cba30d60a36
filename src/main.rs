use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use auditnorm::{AuditProcessor, Config, Event};
use clap::Parser;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "auditnorm", about = "Normalize audit records (NDJSON) into common events")]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log the event after every pipeline step to stderr.
    #[arg(long)]
    debug: bool,

    /// Input files; reads stdin when none are given.
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    config.debug |= cli.debug;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if config.debug { "debug" } else { "warn" })
            }),
        )
        .init();

    let processor = AuditProcessor::new(&config).context("building audit pipeline")?;

    let (tx, mut rx) = mpsc::channel::<Event>(1024);
    let files = cli.files;
    let feed = tokio::spawn(async move {
        if files.is_empty() {
            auditnorm::feeds::stdin::read(&tx).await?;
        } else {
            for path in &files {
                auditnorm::feeds::file::read(path, &tx).await?;
            }
        }
        anyhow::Ok(())
    });

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    while let Some(mut event) = rx.recv().await {
        processor.process(&mut event);
        serde_json::to_writer(&mut out, &event)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    feed.await.context("feed task panicked")?
}
