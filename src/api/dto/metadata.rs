//! DTOs for the metadata endpoint.

use serde::Serialize;

use crate::domain::SyncMetadata;

#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub success: bool,
    pub metadata: SyncMetadata,
}
