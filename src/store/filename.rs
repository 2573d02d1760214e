//! Filename encoding for articles.
//!
//! The filename is the only on-disk record of publication time:
//! `<slug>.<unix-seconds>.md`, where the timestamp segment is missing only
//! until the store assigns one and renames the file.

use std::path::Path;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

/// Errors produced while decoding an article filename.
#[derive(Debug, Error)]
pub enum FilenameError {
    #[error("invalid article filename: '{0}'")]
    Invalid(String),

    #[error("invalid article filename: '{0}' (timestamp out of range)")]
    InvalidTimestamp(String),
}

static FILENAME_RE: OnceLock<Regex> = OnceLock::new();

fn filename_re() -> &'static Regex {
    FILENAME_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9\-_]+)(?:\.(-?\d+))?\.md$").expect("filename pattern")
    })
}

/// Whether a path names a file this store manages. Events and scan entries
/// failing this check are ignored outright.
pub fn is_valid_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| filename_re().is_match(name))
        .unwrap_or(false)
}

/// Decode a bare filename into its slug and optional publication time.
pub fn parse_filename(name: &str) -> Result<(String, Option<DateTime<Utc>>), FilenameError> {
    let caps = filename_re()
        .captures(name)
        .ok_or_else(|| FilenameError::Invalid(name.to_string()))?;

    let slug = caps[1].to_string();

    let published_at = match caps.get(2) {
        Some(ts) => {
            let epoch: i64 = ts
                .as_str()
                .parse()
                .map_err(|_| FilenameError::InvalidTimestamp(name.to_string()))?;
            let t = DateTime::from_timestamp(epoch, 0)
                .ok_or_else(|| FilenameError::InvalidTimestamp(name.to_string()))?;
            Some(t)
        }
        None => None,
    };

    Ok((slug, published_at))
}

/// Encode a slug and optional publication time as a filename. The timestamp
/// segment is omitted when absent.
pub fn make_filename(slug: &str, published_at: Option<DateTime<Utc>>) -> String {
    match published_at {
        Some(t) => format!("{}.{}.md", slug, t.timestamp()),
        None => format!("{}.md", slug),
    }
}
