//! Upstream generative-language client for chatrelay.
//!
//! Provides the `AiClient` seam the relay endpoint calls through, and the
//! Gemini implementation of it:
//! - one non-streaming completion per call
//! - typed failures, with rate limiting reported separately
//! - token usage from the response metadata

pub mod gemini;

use async_trait::async_trait;
use chatrelay_common::Turn;

pub use gemini::{GeminiClient, GeminiConfig};

#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send the whole ordered message list and return one completion.
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            chatrelay_common::Role::User => Role::User,
            chatrelay_common::Role::Model => Role::Model,
        };
        Self {
            role,
            content: turn.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    System,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}

impl AiError {
    /// The message reported by the upstream service, if it gave one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            AiError::ApiError(msg) | AiError::NetworkError(msg) | AiError::ParseError(msg)
                if !msg.trim().is_empty() =>
            {
                Some(msg.as_str())
            }
            _ => None,
        }
    }
}
