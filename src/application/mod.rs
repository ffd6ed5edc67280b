//! Application layer services implementing the request flow.
//!
//! This layer coordinates the store, the in-memory cache and the domain
//! routing rules. Services consume the store trait and provide a clean API
//! for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::url_cache::UrlCache`] - Canonical URL list cache
//! - [`services::edge_router::EdgeRouter`] - Static bypass and redirect decision
//! - [`services::metadata_service::MetadataService`] - Sync metadata lookup

pub mod services;
