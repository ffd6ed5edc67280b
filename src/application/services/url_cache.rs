//! Process-local cache of the canonical URL list.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::counter;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::{CanonicalUrlSet, URLS_KEY};
use crate::infrastructure::store::{StoreError, StoreResult, UrlStore};

/// How long a fetched list is served from memory before the store is read again.
pub const URL_CACHE_TTL: Duration = Duration::from_millis(86_400_000);

/// Last fetched list and when it was fetched. Replaced wholesale on refresh.
#[derive(Default)]
struct CacheEntry {
    urls: Option<Arc<CanonicalUrlSet>>,
    refreshed_at: Option<Instant>,
    refreshed_at_utc: Option<DateTime<Utc>>,
}

/// Snapshot of the cache for health reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    pub loaded: bool,
    pub url_count: usize,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Serves the canonical URL list from memory, reading the store when stale.
///
/// One instance lives for the whole process and is shared by every request
/// through `Arc`. The lock is never held across the store read, so requests
/// that observe a stale entry at the same time each read the store and the
/// last one to finish wins. All of them write the same externally sourced
/// value, so no single-flight coordination is done.
pub struct UrlCache {
    store: Arc<dyn UrlStore>,
    ttl: Duration,
    entry: Mutex<CacheEntry>,
}

impl UrlCache {
    /// Creates an empty cache with the standard 24 hour freshness window.
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self::with_ttl(store, URL_CACHE_TTL)
    }

    pub fn with_ttl(store: Arc<dyn UrlStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            entry: Mutex::new(CacheEntry::default()),
        }
    }

    /// Returns the canonical URL list, refreshing it from the store when needed.
    ///
    /// The store is read when nothing is cached yet (including after a read
    /// that found no list) or when the cached list is older than the TTL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(set))` with the cached or freshly read list
    /// - `Ok(None)` if the store holds no list
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store read fails or the value is not a
    /// JSON array of strings. The cached entry is left untouched in that case.
    pub async fn get_valid_urls(&self) -> StoreResult<Option<Arc<CanonicalUrlSet>>> {
        let now = Instant::now();

        if let Some(urls) = self.fresh_urls(now) {
            debug!("Using in-memory canonical URL list ({} entries)", urls.len());
            return Ok(Some(urls));
        }

        let urls = self
            .store
            .get_json(URLS_KEY)
            .await?
            .map(|value| {
                serde_json::from_value::<CanonicalUrlSet>(value).map_err(|e| StoreError::Parse {
                    key: URLS_KEY.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?
            .map(Arc::new);

        *self.lock() = CacheEntry {
            urls: urls.clone(),
            refreshed_at: Some(now),
            refreshed_at_utc: Some(Utc::now()),
        };

        counter!("url_cache_refresh_total").increment(1);
        info!(
            "Canonical URL list fetched from {} store ({} entries)",
            self.store.backend(),
            urls.as_ref().map_or(0, |u| u.len())
        );

        Ok(urls)
    }

    /// Reports what is currently held, without touching the store.
    pub fn status(&self) -> CacheStatus {
        let entry = self.lock();
        CacheStatus {
            loaded: entry.urls.is_some(),
            url_count: entry.urls.as_ref().map_or(0, |u| u.len()),
            refreshed_at: entry.refreshed_at_utc,
        }
    }

    fn fresh_urls(&self, now: Instant) -> Option<Arc<CanonicalUrlSet>> {
        let entry = self.lock();
        match (&entry.urls, entry.refreshed_at) {
            (Some(urls), Some(at)) if now.saturating_duration_since(at) <= self.ttl => {
                Some(urls.clone())
            }
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheEntry> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::MockUrlStore;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;

    fn store_returning(times: usize, value: Value) -> MockUrlStore {
        let mut store = MockUrlStore::new();
        store
            .expect_get_json()
            .withf(|key| key == "urls")
            .times(times)
            .returning(move |_| Ok(Some(value.clone())));
        store.expect_backend().return_const("mock");
        store
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_call_reads_store() {
        let cache = UrlCache::new(Arc::new(store_returning(1, json!(["/blog/"]))));

        let urls = cache.get_valid_urls().await.unwrap().unwrap();

        assert!(urls.contains("/blog/"));
        assert!(cache.status().loaded);
        assert_eq!(cache.status().url_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_cache_skips_store() {
        let cache = UrlCache::new(Arc::new(store_returning(1, json!(["/blog/"]))));

        cache.get_valid_urls().await.unwrap();
        tokio::time::advance(Duration::from_secs(23 * 3600)).await;
        let urls = cache.get_valid_urls().await.unwrap().unwrap();

        assert!(urls.contains("/blog/"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_ttl_is_still_fresh() {
        let cache = UrlCache::new(Arc::new(store_returning(1, json!(["/blog/"]))));

        cache.get_valid_urls().await.unwrap();
        tokio::time::advance(URL_CACHE_TTL).await;
        cache.get_valid_urls().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_cache_reads_store_again() {
        let cache = UrlCache::new(Arc::new(store_returning(2, json!(["/blog/"]))));

        cache.get_valid_urls().await.unwrap();
        tokio::time::advance(Duration::from_secs(25 * 3600)).await;
        cache.get_valid_urls().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_replaces_list() {
        let mut store = MockUrlStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_get_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(json!(["/old/"]))));
        store
            .expect_get_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(json!(["/new/"]))));
        store.expect_backend().return_const("mock");

        let cache = UrlCache::new(Arc::new(store));

        let first = cache.get_valid_urls().await.unwrap().unwrap();
        tokio::time::advance(URL_CACHE_TTL + Duration::from_millis(1)).await;
        let second = cache.get_valid_urls().await.unwrap().unwrap();

        assert!(first.contains("/old/"));
        assert!(!second.contains("/old/"));
        assert!(second.contains("/new/"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_list_is_not_cached() {
        let mut store = MockUrlStore::new();
        store.expect_get_json().times(2).returning(|_| Ok(None));
        store.expect_backend().return_const("mock");

        let cache = UrlCache::new(Arc::new(store));

        assert!(cache.get_valid_urls().await.unwrap().is_none());
        assert!(cache.get_valid_urls().await.unwrap().is_none());
        assert!(!cache.status().loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_list_is_cached() {
        let cache = UrlCache::new(Arc::new(store_returning(1, json!([]))));

        let first = cache.get_valid_urls().await.unwrap().unwrap();
        let second = cache.get_valid_urls().await.unwrap().unwrap();

        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_error_propagates_and_keeps_previous_entry() {
        let mut store = MockUrlStore::new();
        let mut seq = mockall::Sequence::new();
        store
            .expect_get_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(json!(["/blog/"]))));
        store
            .expect_get_json()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(StoreError::Connection("refused".to_string())));
        store.expect_backend().return_const("mock");

        let cache = UrlCache::new(Arc::new(store));

        cache.get_valid_urls().await.unwrap();
        tokio::time::advance(URL_CACHE_TTL * 2).await;

        let result = cache.get_valid_urls().await;
        assert!(matches!(result, Err(StoreError::Connection(_))));

        let status = cache.status();
        assert!(status.loaded);
        assert_eq!(status.url_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_list_is_parse_error() {
        let cache = UrlCache::new(Arc::new(store_returning(1, json!({ "urls": "/blog/" }))));

        let result = cache.get_valid_urls().await;

        assert!(matches!(result, Err(StoreError::Parse { .. })));
        assert!(!cache.status().loaded);
    }

    /// Holds every read until two are in flight at once.
    struct GatedStore {
        reads: AtomicUsize,
        gate: Barrier,
    }

    #[async_trait]
    impl UrlStore for GatedStore {
        async fn get_json(&self, _key: &str) -> StoreResult<Option<Value>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.gate.wait().await;
            Ok(Some(json!(["/blog/"])))
        }

        async fn health_check(&self) -> bool {
            true
        }

        fn backend(&self) -> &'static str {
            "gated"
        }
    }

    #[tokio::test]
    async fn test_concurrent_stale_reads_each_hit_store() {
        let store = Arc::new(GatedStore {
            reads: AtomicUsize::new(0),
            gate: Barrier::new(2),
        });
        let cache = UrlCache::new(store.clone());

        let (a, b) = tokio::join!(cache.get_valid_urls(), cache.get_valid_urls());

        assert!(a.unwrap().unwrap().contains("/blog/"));
        assert!(b.unwrap().unwrap().contains("/blog/"));
        assert_eq!(store.reads.load(Ordering::SeqCst), 2);

        // Once refreshed, later calls are served from memory.
        cache.get_valid_urls().await.unwrap();
        assert_eq!(store.reads.load(Ordering::SeqCst), 2);
    }
}
