//! Shared handler state: the upstream client and the optional system prompt.

use std::sync::Arc;

use chatrelay_ai::{AiClient, Message};
use chatrelay_common::Turn;

/// Immutable state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    client: Arc<dyn AiClient>,
    system_prompt: Option<Arc<str>>,
}

impl AppState {
    pub fn new(client: Arc<dyn AiClient>) -> Self {
        Self {
            client,
            system_prompt: None,
        }
    }

    /// Prepend `prompt` as a system message to every upstream call.
    ///
    /// Blank prompts are ignored.
    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt
            .filter(|p| !p.trim().is_empty())
            .map(Arc::from);
        self
    }

    pub fn client(&self) -> &dyn AiClient {
        self.client.as_ref()
    }

    /// Upstream message list for one request, in conversation order.
    pub(crate) fn messages_for(&self, turns: &[Turn]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(turns.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::system(prompt.to_string()));
        }
        messages.extend(turns.iter().map(Message::from));
        messages
    }
}
