//! Markdown rendering for approval instructions.

use pulldown_cmark::{html, Parser};

/// Render CommonMark text to an HTML fragment with the renderer's defaults.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new(text);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
