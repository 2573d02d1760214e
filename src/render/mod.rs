//! Markdown rendering.
//!
//! Articles are rendered to HTML exactly once, when they are loaded.
//! The parser is configured with the GFM-ish extension set the site
//! relies on: tables, strikethrough, footnotes, smart punctuation.

use pulldown_cmark::{html, Options, Parser};
use thiserror::Error;

/// Errors that can occur while rendering a body.
///
/// The pulldown backend itself cannot fail, but the render seam keeps a
/// `Result` so the loader has a propagation path for transform errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render failed: {0}")]
    Backend(String),
}

/// Markdown-to-HTML renderer shared by every article load.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    options: Options,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Create a renderer with the standard extension set.
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_SMART_PUNCTUATION;
        Self { options }
    }

    /// Render Markdown text to an HTML string.
    pub fn render(&self, text: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(text, self.options);
        let mut out = String::with_capacity(text.len() * 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}
