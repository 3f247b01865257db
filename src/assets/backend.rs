//! # Blob Backend Trait

use super::errors::AssetResult;

/// Trait for blob storage backends
pub trait BlobBackend: Send + Sync {
    /// Write a blob under a key
    fn write(&self, key: &str, data: &[u8]) -> AssetResult<()>;

    /// Read a blob by key
    fn read(&self, key: &str) -> AssetResult<Vec<u8>>;

    /// Delete a blob by key
    fn delete(&self, key: &str) -> AssetResult<()>;

    /// Check if a blob exists
    fn exists(&self, key: &str) -> AssetResult<bool>;
}
