//! Request handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use chatrelay_common::{ChatRequest, ChatResponse, RenderRequest, RenderResponse};
use tracing::{info, warn};

use crate::error::RelayError;
use crate::state::AppState;

/// `POST /api/chat`: validate, forward once, return the model's text.
pub(crate) async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, RelayError> {
    let request = ChatRequest::from_slice(&body).inspect_err(|e| {
        warn!(detail = %e.detail(), "Rejected chat request");
    })?;

    let messages = state.messages_for(&request.conversation);
    let response = state
        .client()
        .send_message(&messages)
        .await
        .inspect_err(|e| warn!(error = %e, "Upstream call failed"))?;

    info!(
        turns = request.conversation.len(),
        reply_chars = response.content.chars().count(),
        total_tokens = response.usage.total_tokens(),
        "Chat relayed"
    );

    Ok(Json(ChatResponse {
        result: response.content,
    }))
}

/// `POST /api/render`: Markdown-subset text to safe HTML.
pub(crate) async fn render(body: Bytes) -> Result<Json<RenderResponse>, RelayError> {
    let request = RenderRequest::from_slice(&body).inspect_err(|e| {
        warn!(detail = %e.detail(), "Rejected render request");
    })?;

    Ok(Json(RenderResponse {
        html: chatrelay_markdown::render(&request.text),
    }))
}

/// `GET /healthz`.
pub(crate) async fn health() -> &'static str {
    "ok"
}
