//! # Asset Errors

use thiserror::Error;

/// Result type for asset operations
pub type AssetResult<T> = Result<T, AssetError>;

/// Asset registry errors
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    // Validation errors (the caller's InvalidAsset cases)
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    #[error("Asset too large: {0} bytes (max: {1})")]
    TooLarge(u64, u64),

    #[error("Asset not found: {0}")]
    NotFound(String),

    // I/O errors
    #[error("Blob store error: {0}")]
    Blob(String),

    #[error("Metadata store error: {0}")]
    Store(String),
}

impl AssetError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            AssetError::InvalidContentType(_) => 400,
            AssetError::TooLarge(_, _) => 400,
            AssetError::NotFound(_) => 404,
            AssetError::Blob(_) => 500,
            AssetError::Store(_) => 500,
        }
    }
}
