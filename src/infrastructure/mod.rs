//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the collaborators the router depends on but
//! does not own.
//!
//! # Modules
//!
//! - [`store`] - Key-value store holding the canonical URL list (Redis and empty implementations)
//! - [`upstream`] - Pass-through backend (HTTP reverse proxy)

pub mod store;
pub mod upstream;
