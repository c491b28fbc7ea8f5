//! Markdown-subset to HTML renderer for chat replies.
//!
//! Handles `**bold**`, `#` headings (levels 1-6), `* ` bullets and `1. `
//! numbered items with indentation-based nesting. Anything else becomes a
//! paragraph. This is a line heuristic, not a conformant Markdown parser:
//! there are no blockquotes, code fences or links.
//!
//! All input text is HTML-escaped before any markup is added, so the output
//! is safe to insert into a page even when the input contains raw HTML.
//!
//! ```
//! use chatrelay_markdown::render;
//!
//! assert_eq!(render("# Title"), "<h1>Title</h1>");
//! assert_eq!(render("* a\n* b"), "<ul><li>a</li><li>b</li></ul>");
//! ```

mod escape;
mod render;


pub use escape::escape_html;
pub use render::{render, render_with, ListKind, RenderOptions};
