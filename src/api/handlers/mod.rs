//! HTTP request handlers.
//!
//! - [`edge`] - Catch-all routing handler
//! - [`health`] - Service health
//! - [`metadata`] - Sync metadata

pub mod edge;
pub mod health;
pub mod metadata;

pub use edge::edge_handler;
pub use health::health_handler;
pub use metadata::metadata_handler;
