//! Handler for the sync metadata endpoint.

use axum::{Json, extract::State};

use crate::api::dto::metadata::MetadataResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the metadata the sync job stored next to the URL list.
///
/// # Endpoint
///
/// `GET /__edge/metadata`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "metadata": {
///     "last_update": "2024-05-01T10:15:30.123456",
///     "urls_count": 120,
///     "urls_hash": "5d41402abc4b2a76b9719d911017c592",
///     "sitemap_url": "https://example.com/sitemap.xml"
///   }
/// }
/// ```
///
/// # Errors
///
/// - 404 Not Found if the store holds no metadata
/// - 503 Service Unavailable if the store cannot be read
/// - 500 Internal Server Error if the stored document is malformed
pub async fn metadata_handler(
    State(state): State<AppState>,
) -> Result<Json<MetadataResponse>, AppError> {
    let metadata = state.metadata_service.get_metadata().await?;

    Ok(Json(MetadataResponse {
        success: true,
        metadata,
    }))
}
