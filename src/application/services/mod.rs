//! Application services.
//!
//! - [`url_cache::UrlCache`] - Process-local canonical URL list with a 24 hour freshness window
//! - [`edge_router::EdgeRouter`] - Per-request routing with fail-open semantics
//! - [`metadata_service::MetadataService`] - Read-only sync metadata lookup

pub mod edge_router;
pub mod metadata_service;
pub mod url_cache;

pub use edge_router::{EdgeRouter, RouteOutcome};
pub use metadata_service::MetadataService;
pub use url_cache::{CacheStatus, URL_CACHE_TTL, UrlCache};
