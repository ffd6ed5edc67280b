//! Catch-all handler applying the canonical URL rules.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use metrics::counter;
use tracing::{info, warn};

use crate::application::services::RouteOutcome;
use crate::state::AppState;
use crate::utils::extract_origin::{extract_origin, redirect_location};

/// Redirects non-canonical paths and forwards everything else upstream.
///
/// # Endpoint
///
/// Any method, any path not claimed by another route.
///
/// # Request Flow
///
/// 1. Static assets and special files go straight upstream
/// 2. The canonical URL list is taken from the in-process cache
/// 3. A mismatching trailing slash is answered with `301 Moved Permanently`
/// 4. Everything else, including every store failure, goes upstream unchanged
///
/// The response is never an error produced by the router itself.
pub async fn edge_handler(State(state): State<AppState>, request: Request) -> Response {
    let path = request.uri().path().to_string();

    let outcome = state.router.route(&path).await;
    counter!("edge_requests_total", "outcome" => outcome.label()).increment(1);

    if let RouteOutcome::Redirect { target } = outcome {
        let origin = extract_origin(request.headers(), request.uri(), &state.origin_policy);
        let location = redirect_location(origin.as_ref(), &target);

        match HeaderValue::from_str(&location) {
            Ok(value) => {
                info!("301 {} -> {}", path, location);
                return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)])
                    .into_response();
            }
            Err(e) => warn!("Unusable redirect location {:?}: {}", location, e),
        }
    }

    state.upstream.forward(request).await
}
