//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for every request passing through the router.
///
/// Redirects and pass-through responses are logged alike; upstream 5xx
/// responses are classified as failures.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/blog version=HTTP/1.1}: finished processing request latency=1 ms status=301
/// INFO request{method=GET uri=/blog/ version=HTTP/1.1}: finished processing request latency=38 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
