//! chatrelay-chat: terminal client for a running chatrelay server.
//!
//! Reads one message per line from stdin and prints each reply. With
//! `--transcript`, the conversation is written as an HTML page on exit.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chatrelay_client::{ChatController, HistoryMode, HttpTransport, SubmitOutcome, Transcript};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chatrelay-chat", version, about = "Terminal client for chatrelay-server")]
struct Args {
    /// Server root URL.
    #[arg(long, env = "CHATRELAY_SERVER", default_value = "http://localhost:3000")]
    server: String,

    /// Send the whole conversation with every message instead of only the
    /// latest one.
    #[arg(long)]
    full_history: bool,

    /// Write the conversation as HTML to this file on exit.
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Log level when RUST_LOG is unset (debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "chatrelay_client={0},chatrelay_chat={0}",
                    args.log_level
                ))
            }),
        )
        .init();

    let transport = HttpTransport::new(&args.server, Duration::from_secs(args.timeout))?;
    tracing::info!(endpoint = %transport.endpoint(), "Connecting");

    let mode = if args.full_history {
        HistoryMode::Full
    } else {
        HistoryMode::LatestTurn
    };
    let mut controller = ChatController::new(transport, Transcript::new()).with_history_mode(mode);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match controller.submit(&line).await {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Replied { text, .. } if text.is_empty() => {
                println!("{}", chatrelay_client::EMPTY_REPLY_TEXT);
            }
            SubmitOutcome::Replied { text, .. } => println!("{text}"),
            SubmitOutcome::Failed { error, .. } => eprintln!("error: {error}"),
        }
    }

    if let Some(path) = args.transcript {
        let html = controller.into_view().to_html();
        std::fs::write(&path, html)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Transcript written");
    }

    Ok(())
}
