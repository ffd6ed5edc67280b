//! Per-request routing: static bypass, canonical list lookup, redirect decision.

use std::sync::Arc;

use tracing::{debug, error};

use crate::application::services::url_cache::UrlCache;
use crate::domain::{Decision, decide, is_static_or_special};

/// What the handler should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Static asset or special file; served without looking at the list.
    Static,
    /// Path is in its correct form; serve it.
    PassThrough,
    /// Answer with a permanent redirect to this path.
    Redirect { target: String },
    /// The list could not be obtained; serve the request as-is.
    FailOpen,
}

impl RouteOutcome {
    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::PassThrough => "pass_through",
            Self::Redirect { .. } => "redirect",
            Self::FailOpen => "fail_open",
        }
    }
}

/// Decides how each inbound request is handled.
///
/// Never fails: every problem with the store degrades to
/// [`RouteOutcome::FailOpen`] so that the original request is served.
pub struct EdgeRouter {
    url_cache: Arc<UrlCache>,
}

impl EdgeRouter {
    pub fn new(url_cache: Arc<UrlCache>) -> Self {
        Self { url_cache }
    }

    /// Routes a request path.
    ///
    /// # Request Flow
    ///
    /// 1. Static assets and special files short-circuit to [`RouteOutcome::Static`]
    /// 2. The canonical list is obtained from [`UrlCache`]
    /// 3. A missing, empty or unreadable list yields [`RouteOutcome::FailOpen`]
    /// 4. Otherwise the redirect decision is applied
    pub async fn route(&self, path: &str) -> RouteOutcome {
        if is_static_or_special(path) {
            debug!("Static or special path: {}", path);
            return RouteOutcome::Static;
        }

        let urls = match self.url_cache.get_valid_urls().await {
            Ok(Some(urls)) if !urls.is_empty() => urls,
            Ok(Some(_)) => {
                error!("Canonical URL list in store is empty");
                return RouteOutcome::FailOpen;
            }
            Ok(None) => {
                error!("No canonical URL list found in store");
                return RouteOutcome::FailOpen;
            }
            Err(e) => {
                error!("Failed to load canonical URL list: {}", e);
                return RouteOutcome::FailOpen;
            }
        };

        match decide(path, &urls) {
            Decision::PassThrough => RouteOutcome::PassThrough,
            Decision::Redirect { target } => {
                debug!("Redirecting {} -> {}", path, target);
                RouteOutcome::Redirect { target }
            }
        }
    }
}
