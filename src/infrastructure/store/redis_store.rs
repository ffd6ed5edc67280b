//! Redis-backed store implementation.

use super::service::{StoreError, StoreResult, UrlStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::Value;
use tracing::{debug, info};

/// Redis store holding JSON documents as plain string values.
///
/// Uses `ConnectionManager` for automatic reconnection. Read errors are
/// propagated so the request handler can fail open.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - namespace prepended to every key (`STORE_KEY_PREFIX`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, key_prefix: impl Into<String>) -> StoreResult<Self> {
        info!("Connecting to Redis store");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis store");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.into(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl UrlStore for RedisStore {
    async fn get_json(&self, key: &str) -> StoreResult<Option<Value>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let raw = conn
            .get::<_, Option<String>>(&full_key)
            .await
            .map_err(|e| StoreError::Operation(format!("Redis GET {} failed: {}", full_key, e)))?;

        match raw {
            Some(raw) => {
                debug!("Store HIT: {} ({} bytes)", full_key, raw.len());
                parse_json(key, &raw).map(Some)
            }
            None => {
                debug!("Store MISS: {}", full_key);
                Ok(None)
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

/// Parses a raw store value, tagging failures with the logical key.
pub(crate) fn parse_json(key: &str, raw: &str) -> StoreResult<Value> {
    serde_json::from_str(raw).map_err(|e| StoreError::Parse {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
