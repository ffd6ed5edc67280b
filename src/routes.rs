//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /__edge/health`   - Health check: store and URL cache (public)
//! - `GET /__edge/metadata` - Sync metadata (public, read-only)
//! - everything else        - Canonical URL routing ([`edge_handler`])
//!
//! No path normalization layer is installed: trailing slashes are exactly
//! what the edge handler inspects.

use crate::api;
use crate::api::handlers::edge_handler;
use crate::api::middleware::tracing;
use crate::api::routes::OPS_PREFIX;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest(OPS_PREFIX, api::routes::ops_routes())
        .fallback(edge_handler)
        .with_state(state)
        .layer(tracing::layer())
}
