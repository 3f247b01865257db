//! # Asset Registry
//!
//! Upload, fetch, list, and delete for binary assets, over a blob backend
//! and a metadata store. Asset operations never touch the section store and
//! may proceed fully concurrently with content versioning.

use std::sync::Arc;

use uuid::Uuid;

use crate::observability::Logger;

use super::asset::{AssetRecord, MAX_ASSET_SIZE};
use super::backend::BlobBackend;
use super::errors::{AssetError, AssetResult};
use super::metadata::AssetMetadataStore;

/// Asset registry over a blob backend and a metadata store.
///
/// Constructed once at process start with concrete references to both
/// stores; never retrieved from ambient state.
pub struct AssetRegistry {
    backend: Arc<dyn BlobBackend>,
    metadata: Arc<dyn AssetMetadataStore>,
}

impl AssetRegistry {
    pub fn new(backend: Arc<dyn BlobBackend>, metadata: Arc<dyn AssetMetadataStore>) -> Self {
        Self { backend, metadata }
    }

    /// Upload an asset.
    ///
    /// Validation happens before any blob or metadata write: a disallowed
    /// content type or an oversized payload leaves no partial state.
    pub fn upload(
        &self,
        section_key: Option<String>,
        data: &[u8],
        content_type: &str,
        actor: &str,
    ) -> AssetResult<AssetRecord> {
        if !AssetRecord::is_content_type_allowed(content_type) {
            return Err(AssetError::InvalidContentType(content_type.to_string()));
        }
        if data.len() as u64 > MAX_ASSET_SIZE {
            return Err(AssetError::TooLarge(data.len() as u64, MAX_ASSET_SIZE));
        }

        let record = AssetRecord::new(
            section_key,
            content_type.to_string(),
            data.len() as u64,
            AssetRecord::calculate_checksum(data),
            actor.to_string(),
        );

        self.backend.write(&record.key.to_string(), data)?;

        if let Err(e) = self.metadata.put(&record) {
            // Keep the stores consistent: a metadata failure after the blob
            // landed rolls the blob back, then surfaces the failure
            if let Err(cleanup) = self.backend.delete(&record.key.to_string()) {
                Logger::warn(
                    "ASSET_UPLOAD_CLEANUP_FAILED",
                    &[
                        ("asset_key", record.key.to_string().as_str()),
                        ("error", cleanup.to_string().as_str()),
                    ],
                );
            }
            return Err(e);
        }

        Ok(record)
    }

    /// Fetch an asset's metadata and blob bytes.
    pub fn fetch(&self, key: &Uuid) -> AssetResult<(AssetRecord, Vec<u8>)> {
        let record = self
            .metadata
            .get(key)?
            .ok_or_else(|| AssetError::NotFound(key.to_string()))?;
        let data = self.backend.read(&key.to_string())?;
        Ok((record, data))
    }

    /// List assets, optionally filtered by section key and content type.
    pub fn list(
        &self,
        section_key: Option<&str>,
        content_type: Option<&str>,
    ) -> AssetResult<Vec<AssetRecord>> {
        self.metadata.list(section_key, content_type)
    }

    /// Delete an asset: remove the blob, then the metadata record.
    ///
    /// This is a best-effort two-phase delete, not atomic across the two
    /// stores. A blob-removal failure is logged and does not abort the
    /// metadata removal; the call reports success either way, at the cost
    /// of a possible orphaned blob. Recovering orphans is an out-of-band
    /// concern.
    pub fn delete(&self, key: &Uuid) {
        if let Err(e) = self.backend.delete(&key.to_string()) {
            Logger::warn(
                "ASSET_BLOB_DELETE_FAILED",
                &[
                    ("asset_key", key.to_string().as_str()),
                    ("error", e.to_string().as_str()),
                ],
            );
        }

        if let Err(e) = self.metadata.delete(key) {
            Logger::warn(
                "ASSET_METADATA_DELETE_FAILED",
                &[
                    ("asset_key", key.to_string().as_str()),
                    ("error", e.to_string().as_str()),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::local::LocalBackend;
    use crate::assets::metadata::InMemoryAssetStore;
    use tempfile::TempDir;

    fn registry() -> (AssetRegistry, Arc<InMemoryAssetStore>, TempDir) {
        let temp = TempDir::new().unwrap();
        let backend = Arc::new(LocalBackend::new(temp.path().to_path_buf()));
        let metadata = Arc::new(InMemoryAssetStore::new());
        let registry = AssetRegistry::new(backend, metadata.clone());
        (registry, metadata, temp)
    }

    #[test]
    fn test_upload_fetch() {
        let (registry, _, _temp) = registry();

        let record = registry
            .upload(Some("hero".to_string()), b"pngdata", "image/png", "alice")
            .unwrap();
        assert_eq!(record.size, 7);
        assert_eq!(record.url, format!("/assets/{}", record.key));

        let (fetched, data) = registry.fetch(&record.key).unwrap();
        assert_eq!(data, b"pngdata");
        assert_eq!(fetched.key, record.key);
    }

    #[test]
    fn test_upload_disallowed_type_leaves_no_state() {
        let (registry, metadata, _temp) = registry();

        let result = registry.upload(None, b"%PDF-1.4", "application/pdf", "alice");
        assert!(matches!(result, Err(AssetError::InvalidContentType(_))));
        assert!(metadata.list(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_upload_oversized_leaves_no_state() {
        let (registry, metadata, _temp) = registry();

        let data = vec![0u8; (MAX_ASSET_SIZE + 1) as usize];
        let result = registry.upload(None, &data, "image/png", "alice");
        assert!(matches!(result, Err(AssetError::TooLarge(_, _))));
        assert!(metadata.list(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_upload_at_size_limit_accepted() {
        let (registry, _, _temp) = registry();

        let data = vec![0u8; MAX_ASSET_SIZE as usize];
        let record = registry.upload(None, &data, "image/png", "alice").unwrap();
        assert_eq!(record.size, MAX_ASSET_SIZE);
    }

    #[test]
    fn test_delete_removes_blob_and_metadata() {
        let (registry, metadata, _temp) = registry();

        let record = registry
            .upload(None, b"bytes", "image/webp", "alice")
            .unwrap();

        registry.delete(&record.key);
        assert!(metadata.get(&record.key).unwrap().is_none());
        assert!(matches!(
            registry.fetch(&record.key),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_with_missing_blob_still_removes_metadata() {
        let (registry, metadata, _temp) = registry();

        let record = registry
            .upload(None, b"bytes", "image/jpeg", "alice")
            .unwrap();

        // First delete removes both; second finds no blob but must still
        // report success and leave the metadata gone
        registry.delete(&record.key);
        registry.delete(&record.key);
        assert!(metadata.get(&record.key).unwrap().is_none());
    }
}
