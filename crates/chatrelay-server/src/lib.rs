//! chatrelay-server: HTTP relay between the chat page and the upstream model.
//!
//! Each `POST /api/chat` carries the conversation the client chose to send;
//! the server keeps no session state, forwards the turns upstream in a
//! single call and answers with the model's text. `POST /api/render` exposes
//! the Markdown-subset renderer, and every other path is served from the
//! static directory.

mod error;
mod handlers;
mod router;
mod state;

#[cfg(test)]
mod tests;

pub use error::{RelayError, INTERNAL_ERROR_MESSAGE, RATE_LIMIT_MESSAGE};
pub use router::{build_router, shutdown_signal};
pub use state::AppState;

use chatrelay_config::schema::ServerConfig;
use tokio::net::TcpListener;
use tracing::info;

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
pub async fn serve(state: AppState, config: &ServerConfig) -> std::io::Result<()> {
    let router = build_router(state, config);
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        addr = %listener.local_addr()?,
        static_dir = %config.static_dir.display(),
        cors = config.cors,
        "chatrelay-server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("chatrelay-server stopped");
    Ok(())
}
