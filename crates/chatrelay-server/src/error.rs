//! Endpoint failures and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chatrelay_ai::AiError;
use chatrelay_common::{ErrorResponse, ProtocolError};

/// Body text sent when the upstream service rate-limits us.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";

/// Body text sent when an upstream failure carries no message of its own.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    InvalidRequest(#[from] ProtocolError),

    #[error("upstream call failed: {0}")]
    Upstream(#[from] AiError),
}

impl RelayError {
    /// Malformed conversations are reported as server errors, matching the
    /// status clients of the chat endpoint already expect.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(ProtocolError::InvalidConversation(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::InvalidRequest(ProtocolError::InvalidRenderRequest(_)) => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Upstream(AiError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `error` field of the response body.
    pub fn client_message(&self) -> String {
        match self {
            RelayError::InvalidRequest(e) => e.to_string(),
            RelayError::Upstream(AiError::RateLimited) => RATE_LIMIT_MESSAGE.to_string(),
            RelayError::Upstream(e) => e
                .upstream_message()
                .unwrap_or(INTERNAL_ERROR_MESSAGE)
                .to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
