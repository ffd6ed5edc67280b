//! # Edge Redirect
//!
//! An edge request router that keeps URLs in their canonical trailing-slash
//! form. Paths whose slashed form is a known canonical URL are redirected to
//! it; other paths that end with a slash are redirected to the unslashed
//! form; everything else is forwarded to the backend untouched.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Redirect decision, static asset bypass, canonical set
//! - **Application Layer** ([`application`]) - URL cache and per-request routing
//! - **Infrastructure Layer** ([`infrastructure`]) - Key-value store and upstream proxy
//! - **API Layer** ([`api`]) - Edge handler, operational endpoints and middleware
//!
//! ## Request Flow
//!
//! 1. Static assets, `/robots.txt` and `/sitemap.xml` go straight upstream
//! 2. The canonical URL list is served from memory, refreshed from the store every 24 hours
//! 3. A trailing-slash mismatch is answered with `301 Moved Permanently`
//! 4. Everything else, including every store failure, is forwarded upstream (fail-open)
//!
//! ## Quick Start
//!
//! ```bash
//! export UPSTREAM_URL="http://127.0.0.1:8080"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{EdgeRouter, RouteOutcome, UrlCache};
    pub use crate::domain::{CanonicalUrlSet, Decision, SyncMetadata};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{StoreError, StoreResult, UrlStore};
    pub use crate::infrastructure::upstream::Upstream;
    pub use crate::state::AppState;
}
