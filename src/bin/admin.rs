//! CLI administration tool for edge-redirect.
//!
//! Inspects the store the router reads from, without going through HTTP.
//! Every command is read-only.
//!
//! # Usage
//!
//! ```bash
//! # List canonical URLs
//! cargo run --bin admin -- urls list
//!
//! # Show what the router would do with a path
//! cargo run --bin admin -- urls check /blog
//!
//! # Show sync metadata
//! cargo run --bin admin -- metadata
//!
//! # Check store connection
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL`, or `REDIS_HOST` / `REDIS_PORT` / `REDIS_PASSWORD` / `REDIS_DB`
//!   (required): Redis connection, resolved the same way as for the server
//! - `STORE_KEY_PREFIX` (optional): namespace prepended to store keys

use edge_redirect::domain::{CanonicalUrlSet, Decision, URLS_KEY, decide, is_static_or_special};
use edge_redirect::infrastructure::store::{RedisStore, UrlStore};
use edge_redirect::application::services::MetadataService;
use edge_redirect::config::{Config, mask_connection_string};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for inspecting the edge-redirect store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect the canonical URL list
    Urls {
        #[command(subcommand)]
        action: UrlsAction,
    },

    /// Show sync metadata
    Metadata,

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Canonical URL subcommands.
#[derive(Subcommand)]
enum UrlsAction {
    /// List canonical URLs in store order
    List,

    /// Show how a request path would be routed
    Check {
        /// Request path, e.g. "/blog"
        path: String,
    },
}

/// Store subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let redis_url = Config::load_redis_url().context("REDIS_URL or REDIS_HOST must be set")?;
    let prefix = std::env::var("STORE_KEY_PREFIX").unwrap_or_default();

    let store = RedisStore::connect(&redis_url, prefix)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&redis_url)
            )
        })?;
    let store: Arc<dyn UrlStore> = Arc::new(store);

    match cli.command {
        Commands::Urls { action } => handle_urls_action(action, store).await?,
        Commands::Metadata => show_metadata(store).await?,
        Commands::Store { action } => handle_store_action(action, store, &redis_url).await?,
    }

    Ok(())
}

/// Dispatches canonical URL commands.
async fn handle_urls_action(action: UrlsAction, store: Arc<dyn UrlStore>) -> Result<()> {
    match action {
        UrlsAction::List => list_urls(store).await,
        UrlsAction::Check { path } => check_path(store, &path).await,
    }
}

/// Reads the canonical list straight from the store.
async fn load_urls(store: &Arc<dyn UrlStore>) -> Result<Option<CanonicalUrlSet>> {
    let value = store
        .get_json(URLS_KEY)
        .await
        .context("Failed to read canonical URL list")?;

    value
        .map(serde_json::from_value::<CanonicalUrlSet>)
        .transpose()
        .context("Canonical URL list is not an array of strings")
}

/// Prints every canonical URL.
async fn list_urls(store: Arc<dyn UrlStore>) -> Result<()> {
    println!("{}", "📋 Canonical URLs".bright_blue().bold());
    println!();

    let Some(urls) = load_urls(&store).await? else {
        println!("{}", "No canonical URL list in store".yellow());
        return Ok(());
    };

    if urls.is_empty() {
        println!("{}", "Canonical URL list is empty".yellow());
        return Ok(());
    }

    for url in urls.iter() {
        let marker = if url.ends_with('/') {
            "•".green()
        } else {
            "!".red()
        };
        println!("  {} {}", marker, url);
    }

    println!();
    println!("Total: {}", urls.len().to_string().bright_white().bold());

    Ok(())
}

/// Explains how the router would handle `path` with the current list.
async fn check_path(store: Arc<dyn UrlStore>, path: &str) -> Result<()> {
    println!("{} {}", "🔎 Routing".bright_blue().bold(), path.cyan());
    println!();

    if is_static_or_special(path) {
        println!(
            "  {} static asset or special file, passed through",
            "PASS".green().bold()
        );
        return Ok(());
    }

    let urls = match load_urls(&store).await? {
        Some(urls) if !urls.is_empty() => urls,
        _ => {
            println!(
                "  {} no canonical list available, passed through",
                "FAIL-OPEN".yellow().bold()
            );
            return Ok(());
        }
    };

    match decide(path, &urls) {
        Decision::PassThrough => println!("  {} passed through", "PASS".green().bold()),
        Decision::Redirect { target } => println!(
            "  {} 301 Moved Permanently -> {}",
            "REDIRECT".bright_yellow().bold(),
            target.cyan()
        ),
    }

    Ok(())
}

/// Prints the sync metadata.
async fn show_metadata(store: Arc<dyn UrlStore>) -> Result<()> {
    println!("{}", "🗂  Sync metadata".bright_blue().bold());
    println!();

    let service = MetadataService::new(store);
    let metadata = service
        .get_metadata()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load metadata: {}", e))?;

    let show = |label: &str, value: Option<String>| {
        println!(
            "  {:<13} {}",
            format!("{}:", label).bright_white(),
            value.unwrap_or_else(|| "-".to_string()).cyan()
        );
    };

    show("Last update", metadata.last_update);
    show("URL count", metadata.urls_count.map(|c| c.to_string()));
    show("URL hash", metadata.urls_hash);
    show("Sitemap", metadata.sitemap_url);

    Ok(())
}

/// Dispatches store commands.
async fn handle_store_action(
    action: StoreAction,
    store: Arc<dyn UrlStore>,
    redis_url: &str,
) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!("{}", "🔌 Checking store connection...".bright_blue());

            if store.health_check().await {
                println!(
                    "{} {}",
                    "✅ Connected to".green().bold(),
                    mask_connection_string(redis_url)
                );
            } else {
                anyhow::bail!("Store did not answer PING");
            }
        }
    }

    Ok(())
}
