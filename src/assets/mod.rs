//! # Asset Registry
//!
//! Independent lifecycle for binary assets (images/video) optionally linked
//! to a section by key; not coupled to content versioning.

pub mod asset;
pub mod backend;
pub mod errors;
pub mod local;
pub mod metadata;
pub mod registry;

pub use asset::{AssetRecord, ALLOWED_CONTENT_TYPES, MAX_ASSET_SIZE};
pub use backend::BlobBackend;
pub use errors::{AssetError, AssetResult};
pub use local::LocalBackend;
pub use metadata::{AssetMetadataStore, InMemoryAssetStore};
pub use registry::AssetRegistry;
