//! Sync metadata entity.

use serde::{Deserialize, Serialize};

/// Store key holding the canonical URL list.
pub const URLS_KEY: &str = "urls";

/// Store key holding the metadata written alongside the list.
pub const METADATA_KEY: &str = "metadata";

/// Bookkeeping written by the synchronization job next to the URL list.
///
/// The router only reads it, to expose which list version is live. All
/// fields are optional so that older or partial documents still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMetadata {
    /// Local timestamp of the last update, as written by the sync job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls_count: Option<u64>,

    /// Digest of the sorted list, used by the sync job to skip no-op writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sitemap_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_document() {
        let metadata: SyncMetadata = serde_json::from_value(json!({
            "last_update": "2024-05-01T10:15:30.123456",
            "urls_count": 42,
            "urls_hash": "5d41402abc4b2a76b9719d911017c592",
            "sitemap_url": "https://example.com/sitemap.xml"
        }))
        .unwrap();

        assert_eq!(
            metadata.last_update.as_deref(),
            Some("2024-05-01T10:15:30.123456")
        );
        assert_eq!(metadata.urls_count, Some(42));
        assert_eq!(
            metadata.sitemap_url.as_deref(),
            Some("https://example.com/sitemap.xml")
        );
    }

    #[test]
    fn test_deserialize_partial_document() {
        let metadata: SyncMetadata = serde_json::from_value(json!({ "urls_count": 3 })).unwrap();

        assert_eq!(metadata.urls_count, Some(3));
        assert!(metadata.urls_hash.is_none());
    }

    #[test]
    fn test_serialize_skips_missing_fields() {
        let metadata = SyncMetadata {
            urls_count: Some(1),
            ..Default::default()
        };

        assert_eq!(serde_json::to_value(&metadata).unwrap(), json!({ "urls_count": 1 }));
    }
}
