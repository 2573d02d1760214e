//! Translation of filesystem notifications into index mutations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use notify::event::{EventKind, ModifyKind, RenameMode};
use notify::Event;

use crate::render::HtmlRenderer;

use super::filename::{is_valid_name, make_filename};
use super::index::ArticleIndex;
use super::loader::load_article;

/// Applies filesystem events for one watched directory to its index.
///
/// Events are handed to [`process`](Reactor::process) one at a time, in
/// arrival order, by a single task; the initial directory scan reuses the
/// same create path.
pub(crate) struct Reactor {
    index: Arc<ArticleIndex>,
    renderer: HtmlRenderer,
}

impl Reactor {
    pub fn new(index: Arc<ArticleIndex>, renderer: HtmlRenderer) -> Self {
        Self { index, renderer }
    }

    /// Classify and apply one notification.
    pub fn process(&self, event: &Event) {
        match event.kind {
            EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_))
            | EventKind::Modify(ModifyKind::Metadata(_))
            | EventKind::Modify(ModifyKind::Other)
            | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                if let Some(path) = event.paths.first() {
                    self.on_create(path);
                }
            }
            EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                if let Some(path) = event.paths.first() {
                    self.on_remove(path);
                }
            }
            // A paired rename carries both names in one notification.
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                if let Some(from) = event.paths.first() {
                    self.on_remove(from);
                }
                if let Some(to) = event.paths.get(1) {
                    self.on_create(to);
                }
            }
            // The backend couldn't tell what happened; the filesystem can.
            EventKind::Modify(ModifyKind::Name(_)) | EventKind::Modify(ModifyKind::Any) | EventKind::Any => {
                if let Some(path) = event.paths.first().cloned() {
                    if path.exists() {
                        self.on_create(&path);
                    } else {
                        self.on_remove(&path);
                    }
                }
            }
            _ => {}
        }
    }

    /// A file appeared or changed. Load it; if it carries no publication
    /// time yet, assign one by renaming the file on disk. The rename's own
    /// create notification performs the insert, so the article is never
    /// indexed under the untimestamped name.
    pub fn on_create(&self, path: &Path) {
        if !is_valid_name(path) {
            return;
        }
        tracing::debug!(path = %path.display(), "create event");

        let mut article = match load_article(path, &self.renderer) {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "couldn't load article");
                return;
            }
        };

        if article.published_at.is_none() {
            article.published_at = Some(Utc::now());
            let name = make_filename(&article.slug, article.published_at);
            let new_path = match path.parent() {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            };
            if let Err(e) = std::fs::rename(path, &new_path) {
                tracing::error!(path = %path.display(), error = %e, "couldn't rename file");
                return;
            }
            tracing::info!(
                from = %path.display(),
                to = %new_path.display(),
                "renamed file"
            );
        } else {
            let slug = article.slug.clone();
            self.index.insert(article);
            tracing::info!(slug = %slug, "loaded entry");
        }
    }

    /// A file disappeared. The notification carries no parseable content,
    /// so the live article is found by its backing path.
    fn on_remove(&self, path: &Path) {
        if !is_valid_name(path) {
            return;
        }
        tracing::debug!(path = %path.display(), "remove event");

        if let Some(article) = self.index.get_by_path(path) {
            self.index.remove(&article.slug);
            tracing::info!(slug = %article.slug, "removed entry");
        }
    }
}
