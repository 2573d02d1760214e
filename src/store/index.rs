//! Concurrency-safe article index.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::Article;

/// In-memory mapping from slug to article.
///
/// Every operation takes the one internal lock, so readers never observe a
/// partially applied insert or remove. Articles cross the API as `Arc`
/// snapshots; a snapshot stays valid after the index replaces that slug.
#[derive(Debug, Default)]
pub struct ArticleIndex {
    items: Mutex<HashMap<String, Arc<Article>>>,
}

impl ArticleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<Article>>> {
        // A poisoned lock still holds consistent data: mutations are a
        // single map operation.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an article, replacing any existing entry under the same slug.
    pub fn insert(&self, article: Article) {
        let mut items = self.lock();
        items.insert(article.slug.clone(), Arc::new(article));
    }

    /// Remove the entry for `slug`. No-op if absent.
    pub fn remove(&self, slug: &str) {
        let mut items = self.lock();
        items.remove(slug);
    }

    /// Look up an article by slug.
    pub fn get(&self, slug: &str) -> Option<Arc<Article>> {
        self.lock().get(slug).cloned()
    }

    /// Look up an article by the file backing it. Removal events carry only
    /// a path, so this is the correlation point for them.
    pub fn get_by_path(&self, path: &Path) -> Option<Arc<Article>> {
        self.lock().values().find(|a| a.source_path == path).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// All articles, most recently published first; ties share their
    /// publication time in title order.
    ///
    /// Two successive stable sorts: the title pass runs first so it acts
    /// purely as the tie-break for the publication-time pass. Articles
    /// without a publication time order after every dated one.
    pub fn all(&self) -> Vec<Arc<Article>> {
        let mut values: Vec<_> = self.lock().values().cloned().collect();

        values.sort_by(|a, b| a.title.cmp(&b.title));
        values.sort_by(|a, b| match (a.published_at, b.published_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        values
    }

    /// A slice of [`all`](Self::all), clamped so any offset/limit is safe.
    pub fn recent(&self, offset: usize, limit: usize) -> Vec<Arc<Article>> {
        let all = self.all();
        let start = offset.min(all.len());
        let end = offset.saturating_add(limit).min(all.len());
        all[start..end].to_vec()
    }
}
