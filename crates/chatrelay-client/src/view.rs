//! Message display surface and the in-memory transcript.

use std::fmt::Write;

use chatrelay_markdown::escape_html;

/// Handle to a message previously appended to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS class used on the message container.
    pub fn class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Somewhere chat messages are shown.
///
/// `append_message` and `set_text` take plain text; only `set_html` takes
/// markup, and callers must pass renderer output or otherwise escaped HTML.
pub trait ChatView {
    fn append_message(&mut self, sender: Sender, text: &str) -> MessageId;
    fn set_html(&mut self, id: MessageId, html: String);
    fn set_text(&mut self, id: MessageId, text: &str);
    fn mark_error(&mut self, id: MessageId);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Html(String),
}

impl Content {
    /// The content as HTML, escaping plain text.
    pub fn to_html(&self) -> String {
        match self {
            Content::Text(text) => escape_html(text),
            Content::Html(html) => html.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub sender: Sender,
    pub content: Content,
    pub error: bool,
}

/// In-memory [`ChatView`] that can be exported as a standalone HTML page.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: MessageId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages as `<div class="message ...">` blocks, in order.
    pub fn to_html_fragment(&self) -> String {
        let mut html = String::new();
        for entry in &self.entries {
            let error = if entry.error { " error" } else { "" };
            let _ = write!(
                html,
                "<div class=\"message {}{error}\"><p>{}</p></div>",
                entry.sender.class(),
                entry.content.to_html()
            );
        }
        html
    }

    /// A complete HTML document containing the conversation.
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
             <title>Chat transcript</title>\n<link rel=\"stylesheet\" href=\"style.css\">\n\
             </head>\n<body>\n<div class=\"chat-container\">\n<div id=\"chat-box\" class=\"chat-box\">{}</div>\n\
             </div>\n</body>\n</html>\n",
            self.to_html_fragment()
        )
    }

    fn entry_mut(&mut self, id: MessageId) -> Option<&mut Entry> {
        self.entries.get_mut(id.0)
    }
}

impl ChatView for Transcript {
    fn append_message(&mut self, sender: Sender, text: &str) -> MessageId {
        self.entries.push(Entry {
            sender,
            content: Content::Text(text.to_string()),
            error: false,
        });
        MessageId(self.entries.len() - 1)
    }

    fn set_html(&mut self, id: MessageId, html: String) {
        if let Some(entry) = self.entry_mut(id) {
            entry.content = Content::Html(html);
        }
    }

    fn set_text(&mut self, id: MessageId, text: &str) {
        if let Some(entry) = self.entry_mut(id) {
            entry.content = Content::Text(text.to_string());
        }
    }

    fn mark_error(&mut self, id: MessageId) {
        if let Some(entry) = self.entry_mut(id) {
            entry.error = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_sequential_ids() {
        let mut t = Transcript::new();
        let a = t.append_message(Sender::User, "hi");
        let b = t.append_message(Sender::Bot, "Thinking...");
        assert_ne!(a, b);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(b).unwrap().sender, Sender::Bot);
    }

    #[test]
    fn text_is_escaped_on_export() {
        let mut t = Transcript::new();
        t.append_message(Sender::User, "<script>alert(1)</script>");
        let html = t.to_html_fragment();
        assert_eq!(
            html,
            "<div class=\"message user\"><p>&lt;script&gt;alert(1)&lt;/script&gt;</p></div>"
        );
    }

    #[test]
    fn html_content_is_kept() {
        let mut t = Transcript::new();
        let id = t.append_message(Sender::Bot, "Thinking...");
        t.set_html(id, "<strong>x</strong>".into());
        assert_eq!(
            t.to_html_fragment(),
            "<div class=\"message bot\"><p><strong>x</strong></p></div>"
        );
    }

    #[test]
    fn error_adds_class() {
        let mut t = Transcript::new();
        let id = t.append_message(Sender::Bot, "Thinking...");
        t.set_text(id, "boom");
        t.mark_error(id);
        assert_eq!(
            t.to_html_fragment(),
            "<div class=\"message bot error\"><p>boom</p></div>"
        );
    }

    #[test]
    fn full_page_wraps_fragment() {
        let mut t = Transcript::new();
        t.append_message(Sender::User, "hello");
        let page = t.to_html();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<div class=\"message user\"><p>hello</p></div>"));
        assert!(page.trim_end().ends_with("</html>"));
    }
}
