//! # HTTP Server
//!
//! The HTTP contract over the versioning engine and asset registry:
//! sections (read, create, update, history, rollback) and assets (list,
//! upload, fetch, delete), all wrapped in the `{success, data | error}`
//! envelope.

pub mod asset_routes;
pub mod config;
pub mod response;
pub mod section_routes;
pub mod server;

pub use asset_routes::{asset_routes, AssetState};
pub use config::HttpServerConfig;
pub use response::{api_error, ApiError, ApiResponse};
pub use section_routes::{section_routes, SectionState};
pub use server::HttpServer;
