//! Empty store used when no backend is configured.

use super::service::{StoreResult, UrlStore};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// A store that holds nothing.
///
/// Every read reports the key as absent, so every request passes through to
/// the upstream unchanged.
///
/// # Use Cases
///
/// - Development environments without Redis
/// - Fallback when the Redis connection fails at startup
pub struct NullStore;

impl NullStore {
    /// Creates a new NullStore instance.
    pub fn new() -> Self {
        debug!("Using NullStore (no canonical URL list)");
        Self
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlStore for NullStore {
    async fn get_json(&self, _key: &str) -> StoreResult<Option<Value>> {
        Ok(None)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "null"
    }
}
