//! Article Store Integration Tests
//!
//! Drives a store through real filesystem events: create, edit, rename,
//! and delete files in a temp directory and assert on index visibility,
//! the timestamp-assignment rename, ordering, and slicing.

use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;
use vellum::store::ArticleStore;

/// Give the store a moment to process filesystem events. The reactor polls
/// its channel every 200ms, and the timestamp-assignment protocol needs a
/// second event round-trip.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(600)).await;
}

fn write(dir: &Path, name: &str, text: &str) {
    std::fs::write(dir.join(name), text).unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_rename_delete() {
    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::open(tmp.path()).await.unwrap();

    let ts = chrono::Utc::now().timestamp();
    let name = format!("hello-world.{}.md", ts);
    write(tmp.path(), &name, "# Hello world!\n\nThis is a blog post.");
    settle().await;

    // The post should exist in the store.
    let article = store.get("hello-world").expect("article missing after create");
    assert_eq!(article.title, "Hello world!");
    assert_eq!(article.published_at.unwrap().timestamp(), ts);
    assert!(article.body_html.contains("<p>This is a blog post.</p>"));

    // Renaming the file should move the entry to the new slug.
    let new_name = format!("test.{}.md", ts);
    std::fs::rename(tmp.path().join(&name), tmp.path().join(&new_name)).unwrap();
    settle().await;

    assert!(
        store.get("test").is_some(),
        "article not accessible by new slug after rename"
    );
    assert!(
        store.get("hello-world").is_none(),
        "article still accessible by old slug after rename"
    );

    // The entry should be gone after deletion.
    std::fs::remove_file(tmp.path().join(&new_name)).unwrap();
    settle().await;
    assert!(
        store.get("test").is_none(),
        "article still accessible after deletion"
    );

    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_without_timestamp() {
    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::open(tmp.path()).await.unwrap();

    write(tmp.path(), "hello-world.md", "# Hello world!\n\nThis is a blog post.");
    settle().await;

    // The file should have been renamed on disk to carry a timestamp.
    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1, "want 1 file in dir, got {:?}", names);
    assert_ne!(names[0], "hello-world.md", "file kept its untimestamped name");

    let re = regex::Regex::new(r"^[A-Za-z0-9\-_]+\.-?\d+\.md$").unwrap();
    assert!(re.is_match(&names[0]), "unexpected filename: {}", names[0]);

    // And the article must be reachable, with a publication time set.
    let article = store.get("hello-world").expect("article missing after rename settled");
    assert!(article.published_at.is_some());
    assert_eq!(article.title, "Hello world!");

    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_initial_scan_picks_up_existing_files() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "dated.1600000000.md", "# Dated\n\nBody.");
    write(tmp.path(), "undated.md", "# Undated\n\nBody.");
    write(tmp.path(), "ignored.txt", "not an article");

    let store = ArticleStore::open(tmp.path()).await.unwrap();
    settle().await;

    assert_eq!(store.len(), 2);
    assert!(store.get("dated").is_some());

    let undated = store.get("undated").expect("untimestamped file not indexed");
    assert!(undated.published_at.is_some());
    assert!(!tmp.path().join("undated.md").exists());

    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_edit_replaces_entry() {
    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::open(tmp.path()).await.unwrap();

    write(tmp.path(), "post.1600000000.md", "# First title\n\nOld body.");
    settle().await;
    assert_eq!(store.get("post").unwrap().title, "First title");

    write(tmp.path(), "post.1600000000.md", "# Second title\n\nNew body.");
    settle().await;

    let article = store.get("post").unwrap();
    assert_eq!(article.title, "Second title");
    assert!(article.body_html.contains("New body."));
    assert_eq!(store.len(), 1);

    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unparseable_content_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::open(tmp.path()).await.unwrap();

    std::fs::write(tmp.path().join("broken.1600000000.md"), [0xff, 0xfe, 0x00]).unwrap();
    settle().await;

    assert!(store.get("broken").is_none());
    assert_eq!(store.len(), 0);

    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ordering_and_slicing() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "b-post.1600000000.md", "# B\n\nBody.");
    write(tmp.path(), "a-post.1600000000.md", "# A\n\nBody.");
    write(tmp.path(), "newer.1700000000.md", "# Newer\n\nBody.");

    let store = ArticleStore::open(tmp.path()).await.unwrap();
    settle().await;

    // Newest first; identical timestamps ordered by title.
    let titles: Vec<_> = store.get_all().iter().map(|a| a.title.clone()).collect();
    assert_eq!(titles, ["Newer", "A", "B"]);

    let page = store.get_recent(0, 2);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title, "Newer");

    let tail = store.get_recent(1, 100);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0].title, "A");

    assert!(store.get_recent(100, 100).is_empty());

    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_no_heading_means_empty_title() {
    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::open(tmp.path()).await.unwrap();

    let text = "Just a body.\n\nNo heading at all.";
    write(tmp.path(), "plain.1600000000.md", text);
    settle().await;

    let article = store.get("plain").unwrap();
    assert_eq!(article.title, "");
    assert_eq!(article.body_raw, text);
    assert!(article.body_html.contains("Just a body."));

    store.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_close_stops_processing() {
    let tmp = TempDir::new().unwrap();
    let store = ArticleStore::open(tmp.path()).await.unwrap();

    write(tmp.path(), "before.1600000000.md", "# Before\n\nBody.");
    settle().await;
    assert_eq!(store.len(), 1);

    store.close().await;

    // A file created after close is no longer picked up; in particular the
    // timestamp-assignment rename must not happen.
    write(tmp.path(), "after.md", "# After\n\nBody.");
    settle().await;
    assert!(
        tmp.path().join("after.md").exists(),
        "file was renamed after the store was closed"
    );
}
