//! # Asset Metadata
//!
//! An asset is a binary file (image or video) optionally associated with a
//! section. Assets are managed independently of content versioning; the
//! `section_key` reference is advisory, not a foreign key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Content types accepted by the registry
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/webp",
    "video/mp4",
    "video/webm",
];

/// Maximum asset payload size: 10 MiB
pub const MAX_ASSET_SIZE: u64 = 10 * 1024 * 1024;

/// Asset metadata record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Collision-resistant, time-ordered key
    pub key: Uuid,
    pub section_key: Option<String>,
    pub content_type: String,
    pub size: u64,
    pub checksum: String,
    pub uploaded_by: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl AssetRecord {
    /// Create a new record for a validated payload.
    pub fn new(
        section_key: Option<String>,
        content_type: String,
        size: u64,
        checksum: String,
        actor: String,
    ) -> Self {
        let key = Uuid::now_v7();
        Self {
            key,
            section_key,
            content_type,
            size,
            checksum,
            uploaded_by: actor,
            url: format!("/assets/{}", key),
            created_at: Utc::now(),
        }
    }

    /// Calculate checksum for data
    pub fn calculate_checksum(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Whether a content type is accepted by the registry
    pub fn is_content_type_allowed(content_type: &str) -> bool {
        ALLOWED_CONTENT_TYPES.contains(&content_type)
    }
}
