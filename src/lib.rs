//! vellum - live, directory-backed article store
//!
//! An in-memory index of articles whose source of truth is a directory of
//! Markdown files. A filesystem watcher keeps the index current as files
//! are created, edited, renamed, or removed, without rescanning after
//! startup.
//!
//! # Architecture
//!
//! - Filenames encode identity and publication time (`<slug>.<unix>.md`);
//!   no sidecar metadata exists
//! - Files that appear without a timestamp are renamed in place to acquire
//!   one, and indexed when the rename's own notification settles
//! - Articles are rendered to HTML once, at load
//!
//! # Modules
//!
//! - `store`: the watcher-backed store (codec, loader, index, reactor)
//! - `domain`: the `Article` record
//! - `render`: Markdown-to-HTML rendering
//! - `app`: posts + pages facade for the serving layer
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Print the index of a directory
//! vellum scan ~/blog/posts
//!
//! # Keep a directory indexed until interrupted
//! vellum watch ~/blog/posts
//! ```

pub mod app;
pub mod cli;
pub mod domain;
pub mod render;
pub mod store;

// Re-export main types at crate root for convenience
pub use app::{App, AppConfig};
pub use domain::Article;
pub use render::HtmlRenderer;
pub use store::{ArticleIndex, ArticleStore, StoreError};
