//! # Local Filesystem Blob Backend

use std::fs;
use std::path::PathBuf;

use super::backend::BlobBackend;
use super::errors::{AssetError, AssetResult};

/// Local filesystem blob backend
#[derive(Debug)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn full_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl BlobBackend for LocalBackend {
    fn write(&self, key: &str, data: &[u8]) -> AssetResult<()> {
        let full_path = self.full_path(key);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| AssetError::Blob(e.to_string()))?;
        }

        fs::write(&full_path, data).map_err(|e| AssetError::Blob(e.to_string()))
    }

    fn read(&self, key: &str) -> AssetResult<Vec<u8>> {
        let full_path = self.full_path(key);

        fs::read(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(key.to_string())
            } else {
                AssetError::Blob(e.to_string())
            }
        })
    }

    fn delete(&self, key: &str) -> AssetResult<()> {
        let full_path = self.full_path(key);

        fs::remove_file(&full_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(key.to_string())
            } else {
                AssetError::Blob(e.to_string())
            }
        })
    }

    fn exists(&self, key: &str) -> AssetResult<bool> {
        Ok(self.full_path(key).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_read() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("abc123", b"hello").unwrap();
        let data = backend.read("abc123").unwrap();
        assert_eq!(data, b"hello");
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        backend.write("doomed", b"bye").unwrap();
        assert!(backend.exists("doomed").unwrap());

        backend.delete("doomed").unwrap();
        assert!(!backend.exists("doomed").unwrap());
    }

    #[test]
    fn test_not_found() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path().to_path_buf());

        let result = backend.read("nonexistent");
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }
}
