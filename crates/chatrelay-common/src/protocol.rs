//! JSON bodies exchanged between the browser/CLI client and the relay server.

use serde::{Deserialize, Serialize};

use crate::errors::ProtocolError;
use crate::types::Turn;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub conversation: Vec<Turn>,
}

impl ChatRequest {
    pub fn new(conversation: Vec<Turn>) -> Self {
        Self { conversation }
    }

    /// Parse a raw request body.
    ///
    /// Every shape problem (not JSON, missing or non-array `conversation`,
    /// empty conversation, malformed turn) maps to
    /// [`ProtocolError::InvalidConversation`].
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtocolError> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| ProtocolError::InvalidConversation(format!("body is not JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: serde_json::Value) -> Result<Self, ProtocolError> {
        let conversation = match value.get_mut("conversation") {
            Some(v) => v.take(),
            None => {
                return Err(ProtocolError::InvalidConversation(
                    "missing conversation field".into(),
                ))
            }
        };

        let items = match conversation {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(ProtocolError::InvalidConversation(format!(
                    "conversation is not an array (got {})",
                    json_kind(&other)
                )))
            }
        };

        if items.is_empty() {
            return Err(ProtocolError::InvalidConversation(
                "conversation is empty".into(),
            ));
        }

        let conversation = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<Turn>(item)
                    .map_err(|e| ProtocolError::InvalidConversation(format!("turn {i}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { conversation })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Successful reply of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub result: String,
}

/// Error body returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `POST /api/render`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub text: String,
}

impl RenderRequest {
    /// Parse a raw request body; any failure maps to
    /// [`ProtocolError::InvalidRenderRequest`].
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtocolError> {
        serde_json::from_slice(body).map_err(|e| ProtocolError::InvalidRenderRequest(e.to_string()))
    }
}

/// Reply of `POST /api/render`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub html: String,
}
