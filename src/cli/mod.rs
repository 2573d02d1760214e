//! Command-line interface for vellum.
//!
//! Provides commands for inspecting an article directory and for running
//! the watcher interactively.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::store::ArticleStore;

/// vellum - live, directory-backed article store
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory once and print the indexed articles
    Scan {
        /// Article directory
        dir: PathBuf,

        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },

    /// Watch a directory, logging index changes until interrupted
    Watch {
        /// Article directory
        dir: PathBuf,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Scan { dir, json } => scan(dir, json).await,
            Commands::Watch { dir } => watch(dir).await,
        }
    }
}

async fn scan(dir: PathBuf, json: bool) -> Result<()> {
    let store = ArticleStore::open(&dir)
        .await
        .context("couldn't open article store")?;

    // Let timestamp-assignment renames from the scan settle before reading.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let articles = store.get_all();
    if json {
        let articles: Vec<_> = articles.iter().map(|a| a.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&articles)?);
    } else {
        for article in &articles {
            let published = article
                .published_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string());
            println!("{:<24} {:<40} {}", article.slug, article.title, published);
        }
        println!("{} article(s)", store.len());
    }

    store.close().await;
    Ok(())
}

async fn watch(dir: PathBuf) -> Result<()> {
    let store = ArticleStore::open(&dir)
        .await
        .context("couldn't open article store")?;

    tokio::signal::ctrl_c().await?;
    println!("\nshutting down...");

    store.close().await;
    Ok(())
}
