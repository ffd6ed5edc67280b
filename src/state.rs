//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{EdgeRouter, MetadataService, UrlCache};
use crate::infrastructure::store::UrlStore;
use crate::infrastructure::upstream::Upstream;
use crate::utils::extract_origin::OriginPolicy;

/// Everything a request needs, cheaply cloneable.
///
/// The [`UrlCache`] inside lives as long as the process: there is exactly one
/// per running instance and it is dropped with the last clone of the state.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<EdgeRouter>,
    pub url_cache: Arc<UrlCache>,
    pub metadata_service: Arc<MetadataService>,
    pub store: Arc<dyn UrlStore>,
    pub upstream: Arc<dyn Upstream>,
    pub origin_policy: OriginPolicy,
}

impl AppState {
    /// Wires the services around a store and an upstream.
    pub fn new(
        store: Arc<dyn UrlStore>,
        upstream: Arc<dyn Upstream>,
        origin_policy: OriginPolicy,
    ) -> Self {
        let url_cache = Arc::new(UrlCache::new(store.clone()));
        Self::with_cache(url_cache, store, upstream, origin_policy)
    }

    /// Same as [`AppState::new`] with a preconfigured cache.
    pub fn with_cache(
        url_cache: Arc<UrlCache>,
        store: Arc<dyn UrlStore>,
        upstream: Arc<dyn Upstream>,
        origin_policy: OriginPolicy,
    ) -> Self {
        Self {
            router: Arc::new(EdgeRouter::new(url_cache.clone())),
            url_cache,
            metadata_service: Arc::new(MetadataService::new(store.clone())),
            store,
            upstream,
            origin_policy,
        }
    }
}
