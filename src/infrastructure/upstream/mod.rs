//! Backend that receives every request the router lets through.
//!
//! - [`Upstream`] - pass-through contract
//! - [`HttpUpstream`] - reverse proxy to a configured origin

mod http_upstream;
mod service;

pub use http_upstream::{HttpUpstream, UpstreamError};
pub use service::Upstream;
