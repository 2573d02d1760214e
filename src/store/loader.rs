//! Loading articles from disk.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::domain::Article;
use crate::render::{HtmlRenderer, RenderError};

use super::filename::{parse_filename, FilenameError};

/// Rendered in place of an empty body so the renderer never sees empty
/// input.
const EMPTY_BODY_HTML: &str = "<p>(empty)</p>";

/// Errors that can occur while loading a single article.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Filename(#[from] FilenameError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file contains invalid UTF-8")]
    InvalidUtf8,

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    // ATX heading: `# Title`, with optional trailing hashes. The lazy
    // capture leaves trailing whitespace and closing hashes to the tail.
    TITLE_RE.get_or_init(|| Regex::new(r"^\s*#\s+(.+?)(?:\s+#*\s*)?$").expect("title pattern"))
}

/// Read, validate, and render the file at `path` into an [`Article`].
pub fn load_article(path: &Path, renderer: &HtmlRenderer) -> Result<Article, LoadError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| FilenameError::Invalid(path.display().to_string()))?;
    let (slug, published_at) = parse_filename(name)?;

    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8)?;

    let (title, body) = extract_title(&text);
    let title = title.to_string();

    let body_html = if body.is_empty() {
        EMPTY_BODY_HTML.to_string()
    } else {
        renderer.render(body)?
    };

    Ok(Article {
        slug,
        title,
        published_at,
        source_path: path.to_path_buf(),
        body_raw: text,
        body_html,
    })
}

/// Extract the leading heading from Markdown text.
///
/// Only the first line is considered. When it is a valid heading the
/// trimmed heading text and the remainder of the file (from the second
/// line onward) are returned; otherwise the title is empty and the body is
/// the whole text.
fn extract_title(text: &str) -> (&str, &str) {
    let (line, rest) = match text.find('\n') {
        Some(idx) => (&text[..=idx], &text[idx + 1..]),
        None => (text, ""),
    };

    match title_re().captures(line) {
        Some(caps) => {
            let title = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            (title, rest)
        }
        None => ("", text),
    }
}
