//! The article record held by the store.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post or a standalone page, loaded from a Markdown file.
///
/// Articles are immutable once built; the store replaces the whole record
/// when the backing file changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier, taken from the filename. Matches `[A-Za-z0-9_-]+`.
    pub slug: String,

    /// Text of the leading heading, trimmed. Empty if the file has none.
    pub title: String,

    /// Publication time, encoded in the filename as Unix seconds.
    ///
    /// `None` only between a file's creation and the store's timestamp
    /// assignment; every article reachable through the store has it set.
    pub published_at: Option<DateTime<Utc>>,

    /// The file this article was loaded from.
    pub source_path: PathBuf,

    /// Original file contents.
    pub body_raw: String,

    /// Rendered HTML body.
    pub body_html: String,
}
