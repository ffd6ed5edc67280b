//! Domain layer: the routing rules, independent of HTTP and storage.
//!
//! # Modules
//!
//! - [`canonical`] - The canonical URL set loaded from the store
//! - [`decision`] - Trailing-slash redirect decision
//! - [`static_filter`] - Static asset and special file bypass
//! - [`metadata`] - Store keys and sync metadata
//!
//! Nothing in this layer performs I/O; the cache and the request flow live in
//! [`crate::application`].

pub mod canonical;
pub mod decision;
pub mod metadata;
pub mod static_filter;

pub use canonical::CanonicalUrlSet;
pub use decision::{Decision, decide};
pub use metadata::{METADATA_KEY, SyncMetadata, URLS_KEY};
pub use static_filter::is_static_or_special;
