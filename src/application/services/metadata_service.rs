//! Read-only access to the sync metadata.

use std::sync::Arc;

use serde_json::json;

use crate::domain::{METADATA_KEY, SyncMetadata};
use crate::error::AppError;
use crate::infrastructure::store::UrlStore;

/// Loads the metadata document the sync job writes next to the URL list.
///
/// Always reads the store directly; the metadata is not cached.
pub struct MetadataService {
    store: Arc<dyn UrlStore>,
}

impl MetadataService {
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self { store }
    }

    /// Returns the current sync metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the store holds no metadata,
    /// [`AppError::Unavailable`] if the store cannot be read, and
    /// [`AppError::Internal`] if the document is malformed.
    pub async fn get_metadata(&self) -> Result<SyncMetadata, AppError> {
        let value = self
            .store
            .get_json(METADATA_KEY)
            .await?
            .ok_or_else(|| AppError::not_found("No metadata found", json!({ "key": METADATA_KEY })))?;

        serde_json::from_value(value).map_err(|e| {
            AppError::internal(
                "Store value is malformed",
                json!({ "key": METADATA_KEY, "reason": e.to_string() }),
            )
        })
    }
}
