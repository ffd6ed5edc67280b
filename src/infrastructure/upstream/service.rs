//! Upstream trait for pass-through requests.

use async_trait::async_trait;
use axum::extract::Request;
use axum::response::Response;

/// The backend that serves every request the router does not redirect.
///
/// Implementations must never fail from the caller's point of view: transport
/// errors are turned into a gateway error response.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Forwards the original request and returns the backend's response unchanged.
    async fn forward(&self, request: Request) -> Response;
}
