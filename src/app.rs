//! Application facade over the article stores.
//!
//! Composes the two stores a site serves from (posts and standalone
//! pages) behind the read API the serving layer consumes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::Article;
use crate::store::ArticleStore;

/// Content directories for an application instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding blog posts.
    pub posts_dir: PathBuf,

    /// Directory holding standalone pages.
    pub pages_dir: PathBuf,
}

/// The application: one store for posts, one for pages.
pub struct App {
    posts: ArticleStore,
    pages: ArticleStore,
}

impl App {
    /// Open both stores. Fails if either directory is unset, or if a
    /// store cannot subscribe to filesystem notifications.
    pub async fn new(config: &AppConfig) -> Result<Self> {
        if config.posts_dir.as_os_str().is_empty() || config.pages_dir.as_os_str().is_empty() {
            anyhow::bail!("posts_dir and pages_dir must be set");
        }

        let posts = ArticleStore::open(&config.posts_dir)
            .await
            .context("couldn't init posts")?;
        let pages = ArticleStore::open(&config.pages_dir)
            .await
            .context("couldn't init pages")?;

        Ok(Self { posts, pages })
    }

    pub fn get_post(&self, slug: &str) -> Option<Arc<Article>> {
        self.posts.get(slug)
    }

    pub fn get_all_posts(&self) -> Vec<Arc<Article>> {
        self.posts.get_all()
    }

    /// The most recent posts, newest first, sliced by `offset` and `limit`.
    pub fn get_recent_posts(&self, offset: usize, limit: usize) -> Vec<Arc<Article>> {
        self.posts.get_recent(offset, limit)
    }

    pub fn get_page(&self, slug: &str) -> Option<Arc<Article>> {
        self.pages.get(slug)
    }

    pub fn get_all_pages(&self) -> Vec<Arc<Article>> {
        self.pages.get_all()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Stop both watchers.
    pub async fn close(self) {
        self.posts.close().await;
        self.pages.close().await;
    }
}
