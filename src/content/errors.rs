//! # Content Errors

use thiserror::Error;

/// Result type for content operations
pub type ContentResult<T> = Result<T, ContentError>;

/// Versioned content errors
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Section not found: {0}")]
    NotFound(String),

    #[error("Version {1} not found for section: {0}")]
    VersionNotFound(String, u64),

    #[error("Invalid rollback target v{target}: must be earlier than current v{current}")]
    InvalidVersion { target: u64, current: u64 },

    #[error("Section already exists: {0}")]
    AlreadyExists(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Journal error: {0}")]
    Journal(String),

    #[error("Journal corruption: {0}")]
    Corruption(String),
}

impl ContentError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ContentError::NotFound(_) => 404,
            ContentError::VersionNotFound(_, _) => 404,
            ContentError::InvalidVersion { .. } => 400,
            ContentError::AlreadyExists(_) => 409,
            ContentError::Store(_) => 500,
            ContentError::Journal(_) => 500,
            ContentError::Corruption(_) => 500,
        }
    }
}
