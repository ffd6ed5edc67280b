//! Operational route configuration.

use crate::api::handlers::{health_handler, metadata_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Prefix reserved for the router's own endpoints.
pub const OPS_PREFIX: &str = "/__edge";

/// Operational routes, mounted under [`OPS_PREFIX`].
///
/// # Endpoints
///
/// - `GET /health`   - Store connectivity and URL cache contents
/// - `GET /metadata` - Sync metadata stored next to the URL list
pub fn ops_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metadata", get(metadata_handler))
}
