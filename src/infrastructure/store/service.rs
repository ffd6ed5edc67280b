//! Store trait and error types.

use async_trait::async_trait;
use serde_json::Value;

/// Errors that can occur while reading from the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),

    #[error("Store value for '{key}' is not valid JSON: {reason}")]
    Parse { key: String, reason: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read-only access to the key-value store that holds the canonical URL list.
///
/// Values are stored as JSON documents. Implementations return them parsed,
/// leaving the interpretation of their shape to the caller.
///
/// Read failures are returned as [`StoreError`]; callers decide how to
/// degrade, and the edge router fails open on any of them.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::store::NullStore`] - Always empty, used when no store is configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Reads and parses the JSON value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] or [`StoreError::Operation`] when the
    /// backend cannot be reached, and [`StoreError::Parse`] when the stored
    /// value is not valid JSON.
    async fn get_json(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short human-readable backend name for health reports and logs.
    fn backend(&self) -> &'static str;
}
