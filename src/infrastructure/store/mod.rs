//! Key-value store access for the canonical URL list.
//!
//! Provides a [`UrlStore`] trait with two implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`NullStore`] - Empty store for development or when Redis is unavailable

mod null_store;
mod redis_store;
mod service;

pub use null_store::NullStore;
pub use redis_store::RedisStore;
pub use service::{StoreError, StoreResult, UrlStore};

#[cfg(test)]
pub use service::MockUrlStore;
