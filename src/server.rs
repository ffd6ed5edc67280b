//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, upstream client setup, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::store::{NullStore, RedisStore, UrlStore};
use crate::infrastructure::upstream::{HttpUpstream, Upstream};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis store (or NullStore fallback)
/// - Upstream HTTP client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The upstream URL is unusable
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await;

    let upstream: Arc<dyn Upstream> = Arc::new(
        HttpUpstream::new(
            &config.upstream_url,
            Duration::from_secs(config.upstream_timeout_seconds),
        )
        .context("Failed to create upstream client")?,
    );
    tracing::info!("Upstream client ready");

    let state = AppState::new(store, upstream, config.origin_policy());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects the configured store, degrading to [`NullStore`] on failure.
///
/// A store that cannot be reached at startup is not fatal: the router then
/// passes every request through, as it would for a failed read.
pub async fn connect_store(config: &Config) -> Arc<dyn UrlStore> {
    if let Some(redis_url) = &config.redis_url {
        match RedisStore::connect(redis_url, config.store_key_prefix.clone()).await {
            Ok(redis) => {
                tracing::info!("Store enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullStore.", e);
                Arc::new(NullStore::new())
            }
        }
    } else {
        tracing::info!("Store disabled (NullStore)");
        Arc::new(NullStore::new())
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
