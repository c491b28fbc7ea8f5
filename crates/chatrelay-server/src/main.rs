//! chatrelay-server: serves the chat page and relays conversations to Gemini.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chatrelay_ai::{GeminiClient, GeminiConfig};
use chatrelay_config::schema::UpstreamConfig;
use chatrelay_config::{apply_env_overrides, load_config, load_dotenv, validation, ChatRelayConfig};
use chatrelay_server::AppState;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chatrelay-server", about = "Chat relay server for the Gemini API")]
struct Args {
    /// Config file (default: platform config dir, created if missing).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind.
    #[arg(long)]
    host: Option<String>,

    /// Directory holding the browser page.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Mutates the process environment, so it runs before the runtime spawns
    // worker threads.
    let dotenv = load_dotenv();
    let args = Args::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?
        .block_on(run(args, dotenv))
}

async fn run(args: Args, dotenv: Option<PathBuf>) -> anyhow::Result<()> {
    // An explicit --config must load; the default location may fall back.
    let (mut config, config_error) = match load_config(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) if args.config.is_some() => return Err(e.into()),
        Err(e) => {
            let mut config = ChatRelayConfig::default();
            apply_env_overrides(&mut config)?;
            (config, Some(e))
        }
    };

    let default_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.as_filter().to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "chatrelay_server={default_level},chatrelay_ai={default_level},chatrelay_config={default_level},tower_http={default_level}"
                ))
            }),
        )
        .init();

    if let Some(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded .env");
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Using default configuration");
    }

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(dir) = args.static_dir {
        config.server.static_dir = dir;
    }
    validation::validate(&config)?;

    let api_key = config.api_key()?;
    let client = GeminiClient::new(gemini_config(api_key, &config.upstream))
        .context("failed to build upstream client")?;
    tracing::info!(model = %client.model(), "Upstream client ready");

    let state = AppState::new(Arc::new(client))
        .with_system_prompt(config.upstream.system_prompt.clone());

    chatrelay_server::serve(state, &config.server)
        .await
        .with_context(|| format!("server on {} failed", config.server.bind_addr()))
}

fn gemini_config(api_key: &str, upstream: &UpstreamConfig) -> GeminiConfig {
    GeminiConfig::new(api_key)
        .with_model(upstream.model.clone())
        .with_api_base(upstream.api_base.clone())
        .with_max_tokens(upstream.max_tokens)
        .with_temperature(upstream.temperature)
        .with_timeouts(
            Duration::from_secs(upstream.connect_timeout_secs),
            Duration::from_secs(upstream.request_timeout_secs),
        )
}
