use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A request body that does not follow the wire format of its endpoint.
///
/// The display text is what clients see, so it stays fixed; the detail is
/// only for logs.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Invalid conversation format")]
    InvalidConversation(String),

    #[error("Invalid render request")]
    InvalidRenderRequest(String),
}

impl ProtocolError {
    pub fn detail(&self) -> &str {
        match self {
            ProtocolError::InvalidConversation(detail)
            | ProtocolError::InvalidRenderRequest(detail) => detail,
        }
    }
}
