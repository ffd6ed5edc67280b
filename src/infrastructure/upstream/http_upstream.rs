//! HTTP reverse-proxy upstream built on `reqwest`.

use super::service::Upstream;
use async_trait::async_trait;
use axum::{
    body::{Body, HttpBody},
    extract::Request,
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Headers that describe a single connection and must not be forwarded.
static HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");

/// Errors raised while building the upstream client.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Forwards requests to a fixed origin and streams responses back.
///
/// Request and response bodies are streamed, never buffered. Redirects sent
/// by the origin are returned to the client as-is rather than followed.
pub struct HttpUpstream {
    client: reqwest::Client,
    origin: Url,
}

impl HttpUpstream {
    /// Creates an upstream for `origin` (e.g., `"http://127.0.0.1:8080"`).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::InvalidUrl`] if the origin is not an absolute
    /// `http`/`https` URL, or [`UpstreamError::Client`] if the TLS backend
    /// cannot be initialized.
    pub fn new(origin: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let origin = Url::parse(origin).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;

        if !matches!(origin.scheme(), "http" | "https") {
            return Err(UpstreamError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                origin.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self { client, origin })
    }

    /// Builds the absolute upstream URL for a request path and query.
    fn target_url(&self, path_and_query: &str) -> String {
        format!(
            "{}{}",
            self.origin.as_str().trim_end_matches('/'),
            path_and_query
        )
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn forward(&self, request: Request) -> Response {
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let target = self.target_url(path_and_query);

        let has_body = !body.is_end_stream();

        let headers = forwarded_headers(&parts.headers);

        debug!("Forwarding {} {}", parts.method, target);

        let mut builder = self.client.request(parts.method, &target).headers(headers);
        if has_body {
            builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let result = builder.send().await;

        match result {
            Ok(upstream) => {
                let status = upstream.status();
                let headers = strip_hop_by_hop(upstream.headers());

                let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
                *response.status_mut() = status;
                *response.headers_mut() = headers;
                response
            }
            Err(e) => {
                warn!("Upstream request to {} failed: {}", target, e);
                let status = if e.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, status.canonical_reason().unwrap_or("Bad Gateway")).into_response()
            }
        }
    }
}

/// Request headers as sent upstream: no hop-by-hop headers, and `Host`
/// moved to `X-Forwarded-Host` unless an outer proxy already set it.
fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = strip_hop_by_hop(headers);
    if let Some(host) = out.remove(header::HOST) {
        out.entry(X_FORWARDED_HOST).or_insert(host);
    }
    out
}

/// Copies a header map without connection-scoped headers.
fn strip_hop_by_hop(headers: &HeaderMap) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP.iter() {
        out.remove(name);
    }
    out.remove("keep-alive");
    out
}
