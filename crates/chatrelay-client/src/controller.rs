//! Submission flow: input to conversation, transport, and view.

use chatrelay_common::{Conversation, Turn};
use tracing::{debug, warn};

use crate::transport::ChatTransport;
use crate::view::{ChatView, MessageId, Sender};

/// Shown in the bot message while the request is in flight.
pub const PLACEHOLDER_TEXT: &str = "Thinking...";

/// Shown when the server answers successfully with no text.
pub const EMPTY_REPLY_TEXT: &str = "Sorry, no response received.";

/// Which turns are sent with each submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Only the turn just entered. The server sees no earlier context.
    #[default]
    LatestTurn,
    /// The whole conversation, including earlier replies.
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was shown or sent.
    Ignored,
    /// The server answered; `text` may be empty.
    Replied { message: MessageId, text: String },
    /// The request failed; `error` is what the view shows.
    Failed { message: MessageId, error: String },
}

pub struct ChatController<T, V> {
    transport: T,
    view: V,
    conversation: Conversation,
    mode: HistoryMode,
}

impl<T: ChatTransport, V: ChatView> ChatController<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self {
            transport,
            view,
            conversation: Conversation::new(),
            mode: HistoryMode::default(),
        }
    }

    pub fn with_history_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Handle one line of user input.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let user_turn = Turn::user(text);
        self.view.append_message(Sender::User, text);
        let placeholder = self.view.append_message(Sender::Bot, PLACEHOLDER_TEXT);
        self.conversation.push(user_turn.clone());

        let result = match self.mode {
            HistoryMode::LatestTurn => self.transport.send(std::slice::from_ref(&user_turn)).await,
            HistoryMode::Full => self.transport.send(self.conversation.turns()).await,
        };

        match result {
            Ok(reply) if !reply.is_empty() => {
                debug!(chars = reply.len(), "Reply received");
                self.view
                    .set_html(placeholder, chatrelay_markdown::render(&reply));
                self.conversation.push(Turn::model(reply.clone()));
                SubmitOutcome::Replied {
                    message: placeholder,
                    text: reply,
                }
            }
            Ok(reply) => {
                self.view.set_text(placeholder, EMPTY_REPLY_TEXT);
                SubmitOutcome::Replied {
                    message: placeholder,
                    text: reply,
                }
            }
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                let error = e.to_string();
                self.view.set_text(placeholder, &error);
                self.view.mark_error(placeholder);
                SubmitOutcome::Failed {
                    message: placeholder,
                    error,
                }
            }
        }
    }
}
