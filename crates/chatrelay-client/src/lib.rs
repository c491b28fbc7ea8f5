//! chatrelay client: conversation store, transport, and UI controller.
//!
//! The controller owns the conversation and a [`ChatView`]; each submission
//! shows the user's message, a placeholder, and then either the rendered
//! reply or the error text. [`Transcript`] is the in-memory view used by
//! the terminal client and by tests.

pub mod controller;
pub mod transport;
pub mod view;

pub use chatrelay_common::{Conversation, Role, Turn};
pub use controller::{
    ChatController, HistoryMode, SubmitOutcome, EMPTY_REPLY_TEXT, PLACEHOLDER_TEXT,
};
pub use transport::{ChatTransport, ClientError, HttpTransport, FALLBACK_SERVER_ERROR};
pub use view::{ChatView, Content, Entry, MessageId, Sender, Transcript};
