//! Utility functions for request handling.
//!
//! - [`extract_origin`] - Public origin extraction and redirect `Location` building

pub mod extract_origin;
