//! HTTP layer.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies of the operational endpoints
//! - [`handlers`] - The catch-all edge handler and the operational handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Operational route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
