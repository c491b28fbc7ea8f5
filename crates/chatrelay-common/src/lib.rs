//! Types shared by the chatrelay server, client, and config crates.

pub mod errors;
pub mod protocol;
pub mod types;

pub use errors::{ConfigError, ProtocolError};
pub use protocol::{ChatRequest, ChatResponse, ErrorResponse, RenderRequest, RenderResponse};
pub use types::{Conversation, Role, Turn};

/// Path of the chat relay endpoint.
pub const CHAT_PATH: &str = "/api/chat";

/// Path of the Markdown render endpoint.
pub const RENDER_PATH: &str = "/api/render";
