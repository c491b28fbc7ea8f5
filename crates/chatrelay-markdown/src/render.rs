//! Line-oriented, single-pass renderer.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s(.*)").unwrap());

// ASCII digits only; `\d` would also accept other Unicode numerals.
static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s").unwrap());

/// Whitespace characters per nesting level.
const INDENT_WIDTH: usize = 2;

/// Kind of an open list on the nesting stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// Renderer switches.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Close every open list before emitting a heading. Off by default:
    /// headings are emitted in place, inside whatever lists are open.
    pub close_lists_on_heading: bool,
}

/// Render `text` with default options.
pub fn render(text: &str) -> String {
    render_with(text, &RenderOptions::default())
}

/// Render `text` into an HTML fragment.
///
/// Never fails: input that matches no rule degrades to paragraphs.
pub fn render_with(text: &str, options: &RenderOptions) -> String {
    let mut html = String::with_capacity(text.len() + text.len() / 2);
    let mut stack: Vec<ListKind> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        let escaped = escape_html(line);
        let processed = BOLD_RE.replace_all(&escaped, "<strong>${1}</strong>");
        let trimmed = processed.trim();

        if let Some(caps) = HEADING_RE.captures(trimmed) {
            if options.close_lists_on_heading {
                close_lists(&mut html, &mut stack, 0);
            }
            let level = caps[1].len();
            let _ = write!(html, "<h{level}>{}</h{level}>", &caps[2]);
            continue;
        }

        let marker = Marker::detect(trimmed);
        let indent_level = leading_whitespace(line) / INDENT_WIDTH;
        let target = match marker {
            Some(_) => indent_level + 1,
            None => indent_level.min(stack.len()),
        };

        close_lists(&mut html, &mut stack, target);
        while stack.len() < target {
            let kind = match marker {
                Some(Marker::Ordered(_)) => ListKind::Ordered,
                _ => ListKind::Unordered,
            };
            let _ = write!(html, "<{}>", kind.tag());
            stack.push(kind);
        }

        let content = match marker {
            Some(Marker::Ordered(len)) => &trimmed[len..],
            Some(Marker::Bullet) => &trimmed[2..],
            None => trimmed,
        };

        if stack.is_empty() {
            let _ = write!(html, "<p>{content}</p>");
        } else {
            let _ = write!(html, "<li>{content}</li>");
        }
    }

    close_lists(&mut html, &mut stack, 0);
    html
}

/// List item prefix found at the start of a trimmed line.
#[derive(Debug, Clone, Copy)]
enum Marker {
    /// `<digits>.<ws>`, carrying the byte length of the prefix.
    Ordered(usize),
    /// `* `
    Bullet,
}

impl Marker {
    fn detect(trimmed: &str) -> Option<Self> {
        if let Some(m) = ORDERED_RE.find(trimmed) {
            return Some(Marker::Ordered(m.end()));
        }
        if trimmed.starts_with("* ") {
            return Some(Marker::Bullet);
        }
        None
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Pop lists until at most `depth` remain, innermost first.
fn close_lists(html: &mut String, stack: &mut Vec<ListKind>, depth: usize) {
    while stack.len() > depth {
        if let Some(kind) = stack.pop() {
            let _ = write!(html, "</{}>", kind.tag());
        }
    }
}
