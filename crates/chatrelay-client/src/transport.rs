//! Sending turns to the relay server.

use std::time::Duration;

use async_trait::async_trait;
use chatrelay_common::{ChatRequest, Turn, CHAT_PATH};
use tracing::debug;

/// Error text when a failed response carries no usable `error` field.
pub const FALLBACK_SERVER_ERROR: &str = "Failed to get response from server.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Network(String),

    /// Non-2xx reply; `message` is what the user sees.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Decode(String),
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post `turns` and return the reply text, which may be empty.
    async fn send(&self, turns: &[Turn]) -> Result<String, ClientError>;
}

/// [`ChatTransport`] over HTTP to a running chatrelay server.
pub struct HttpTransport {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), CHAT_PATH),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, turns: &[Turn]) -> Result<String, ClientError> {
        let request = ChatRequest::new(turns.to_vec());
        debug!(endpoint = %self.endpoint, turns = turns.len(), "Sending chat request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                message: server_error_message(&body),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(json["result"].as_str().unwrap_or_default().to_string())
    }
}

/// The `error` field of a failure body, or the fixed fallback.
fn server_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"].as_str().map(str::to_string))
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| FALLBACK_SERVER_ERROR.to_string())
}
