//! The live article store.
//!
//! One store owns one directory of Markdown files and keeps an in-memory
//! index synchronized with it through filesystem notifications, with no
//! rescans after startup.
//!
//! # Directory layout
//!
//! ```text
//! articles/
//! ├── hello-world.1600000000.md    # <slug>.<unix-seconds>.md
//! └── getting-started.md           # timestamp pending; the store renames
//!                                  # the file to assign one
//! ```
//!
//! The filename is the only persisted record of publication time. A file
//! that shows up without the timestamp segment is renamed in place to
//! carry one; the rename's own create notification then indexes it.

pub mod filename;
pub mod index;
pub mod loader;
mod reactor;

use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::Article;
use crate::render::HtmlRenderer;

use reactor::Reactor;

pub use filename::FilenameError;
pub use index::ArticleIndex;
pub use loader::LoadError;

/// Errors that can occur while opening a store.
///
/// Per-file problems never surface here; they are logged and the file is
/// skipped. Only failing to subscribe to notifications or to create the
/// directory is fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("notify error: {0}")]
    Watch(#[from] notify::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A collection of articles generated from the Markdown files in one
/// directory. Changes to the files are reflected in the store as they
/// happen.
pub struct ArticleStore {
    dir: PathBuf,
    index: Arc<ArticleIndex>,
    handle: WatchHandle,
}

impl ArticleStore {
    /// Open a store over `dir`, creating the directory if needed.
    ///
    /// Subscribes to filesystem notifications first, then scans the
    /// directory once, routing every valid file through the same create
    /// path live events take. Files without a timestamp segment get
    /// renamed during the scan and are indexed when the rename's create
    /// notification settles.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;

        let index = Arc::new(ArticleIndex::new());
        let reactor = Arc::new(Reactor::new(Arc::clone(&index), HtmlRenderer::new()));

        // Raw, non-debounced watcher: the reactor depends on the
        // create/remove kind distinction that debouncing erases.
        let (tx, rx) = std::sync::mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let (stop_tx, stop_rx) = mpsc::channel::<()>(1);
        let task = tokio::spawn({
            let reactor = Arc::clone(&reactor);
            async move { run_reactor(watcher, rx, reactor, stop_rx).await }
        });

        tracing::info!(dir = %dir.display(), "watching article directory");

        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if filename::is_valid_name(&path) {
                reactor.on_create(&path);
            }
        }

        Ok(Self {
            dir,
            index,
            handle: WatchHandle { stop_tx, task },
        })
    }

    /// The watched directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up an article by slug.
    pub fn get(&self, slug: &str) -> Option<Arc<Article>> {
        self.index.get(slug)
    }

    /// All articles, most recently published first.
    pub fn get_all(&self) -> Vec<Arc<Article>> {
        self.index.all()
    }

    /// The most recent articles, sliced by `offset` and `limit`. Both are
    /// clamped; a slice past the end is empty, never an error.
    pub fn get_recent(&self, offset: usize, limit: usize) -> Vec<Arc<Article>> {
        self.index.recent(offset, limit)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Stop the watcher and wait for in-flight event processing to finish.
    /// No events are processed afterwards.
    pub async fn close(self) {
        let _ = self.handle.stop_tx.send(()).await;
        let _ = self.handle.task.await;
    }
}

struct WatchHandle {
    stop_tx: mpsc::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

/// Event loop for one store. Owns the watcher; dropping it on exit ends
/// the notification subscription.
async fn run_reactor(
    _watcher: RecommendedWatcher,
    rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    reactor: Arc<Reactor>,
    mut stop_rx: mpsc::Receiver<()>,
) {
    loop {
        if stop_rx.try_recv().is_ok() {
            tracing::info!("article watcher stopping");
            break;
        }

        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(Ok(event)) => reactor.process(&event),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "watch error");
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::error!("watch channel disconnected");
                break;
            }
        }

        tokio::task::yield_now().await;
    }
}
