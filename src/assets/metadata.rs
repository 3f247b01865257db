//! # Asset Metadata Store
//!
//! Abstraction for asset metadata persistence, independent of the blob
//! backend and of the section store.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::asset::AssetRecord;
use super::errors::{AssetError, AssetResult};

/// Trait for asset metadata operations
pub trait AssetMetadataStore: Send + Sync {
    /// Get a record by asset key
    fn get(&self, key: &Uuid) -> AssetResult<Option<AssetRecord>>;

    /// Insert a record
    fn put(&self, record: &AssetRecord) -> AssetResult<()>;

    /// Remove a record; absent keys are not an error
    fn delete(&self, key: &Uuid) -> AssetResult<()>;

    /// List records, optionally filtered by section key and content type
    fn list(
        &self,
        section_key: Option<&str>,
        content_type: Option<&str>,
    ) -> AssetResult<Vec<AssetRecord>>;
}

/// In-memory asset metadata store
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    records: RwLock<HashMap<Uuid, AssetRecord>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetMetadataStore for InMemoryAssetStore {
    fn get(&self, key: &Uuid) -> AssetResult<Option<AssetRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| AssetError::Store("Lock poisoned".to_string()))?;
        Ok(records.get(key).cloned())
    }

    fn put(&self, record: &AssetRecord) -> AssetResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| AssetError::Store("Lock poisoned".to_string()))?;
        records.insert(record.key, record.clone());
        Ok(())
    }

    fn delete(&self, key: &Uuid) -> AssetResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| AssetError::Store("Lock poisoned".to_string()))?;
        records.remove(key);
        Ok(())
    }

    fn list(
        &self,
        section_key: Option<&str>,
        content_type: Option<&str>,
    ) -> AssetResult<Vec<AssetRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| AssetError::Store("Lock poisoned".to_string()))?;

        let mut result: Vec<AssetRecord> = records
            .values()
            .filter(|r| match section_key {
                Some(key) => r.section_key.as_deref() == Some(key),
                None => true,
            })
            .filter(|r| match content_type {
                Some(ct) => r.content_type == ct,
                None => true,
            })
            .cloned()
            .collect();

        // UUIDv7 keys sort in upload order
        result.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(result)
    }
}
