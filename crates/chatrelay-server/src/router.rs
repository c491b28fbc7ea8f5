//! Route table, middleware, and shutdown signal.

use axum::routing::{get, post};
use axum::Router;
use chatrelay_common::{CHAT_PATH, RENDER_PATH};
use chatrelay_config::schema::ServerConfig;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
///
/// API routes take precedence; anything else is looked up in
/// `config.static_dir`.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let router = Router::new()
        .route(CHAT_PATH, post(handlers::chat))
        .route(RENDER_PATH, post(handlers::render))
        .route("/healthz", get(handlers::health))
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    if config.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
