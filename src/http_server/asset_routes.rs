//! Asset HTTP Routes
//!
//! Endpoints for binary asset upload, listing, fetch, and best-effort
//! deletion.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assets::{AssetError, AssetRecord, AssetRegistry, MAX_ASSET_SIZE};

use super::response::{api_error, ApiError, ApiResponse};

/// Asset state shared across handlers
pub struct AssetState {
    pub registry: Arc<AssetRegistry>,
}

impl AssetState {
    pub fn new(registry: Arc<AssetRegistry>) -> Self {
        Self { registry }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct ListAssetsQuery {
    #[serde(default)]
    pub section_key: Option<String>,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

fn asset_error(e: AssetError) -> ApiError {
    api_error(e.status_code(), e.to_string())
}

// ==================
// Asset Routes
// ==================

/// Create asset routes.
///
/// The body limit sits above the registry's 10 MiB cap so an oversized
/// upload reaches validation and fails with the envelope, not a bare 413.
pub fn asset_routes(state: Arc<AssetState>) -> Router {
    Router::new()
        .route("/assets", get(list_assets_handler))
        .route("/assets", post(upload_asset_handler))
        .route("/assets/:key", get(fetch_asset_handler))
        .route("/assets/:key", delete(delete_asset_handler))
        .layer(DefaultBodyLimit::max((2 * MAX_ASSET_SIZE) as usize))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_assets_handler(
    State(state): State<Arc<AssetState>>,
    Query(query): Query<ListAssetsQuery>,
) -> Result<Json<ApiResponse<Vec<AssetRecord>>>, ApiError> {
    let assets = state
        .registry
        .list(query.section_key.as_deref(), query.content_type.as_deref())
        .map_err(asset_error)?;
    Ok(Json(ApiResponse::ok(assets)))
}

async fn upload_asset_handler(
    State(state): State<Arc<AssetState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadResponse>>), ApiError> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut section_key: Option<String> = None;
    let mut actor = "anonymous".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(400, e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| api_error(400, e.to_string()))?;
                file = Some((data.to_vec(), content_type));
            }
            "section_key" => {
                section_key = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| api_error(400, e.to_string()))?,
                );
            }
            "uploaded_by" => {
                actor = field
                    .text()
                    .await
                    .map_err(|e| api_error(400, e.to_string()))?;
            }
            _ => {}
        }
    }

    let (data, content_type) = file.ok_or_else(|| api_error(400, "No file provided"))?;

    let record = state
        .registry
        .upload(section_key, &data, &content_type, &actor)
        .map_err(asset_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UploadResponse {
            key: record.key.to_string(),
            url: record.url,
        })),
    ))
}

async fn fetch_asset_handler(
    State(state): State<Arc<AssetState>>,
    Path(key): Path<String>,
) -> Result<(StatusCode, HeaderMap, Bytes), ApiError> {
    let key = Uuid::parse_str(&key).map_err(|_| api_error(404, format!("Asset not found: {}", key)))?;

    let (record, data) = state.registry.fetch(&key).map_err(asset_error)?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = record.content_type.parse() {
        headers.insert("content-type", value);
    }
    if let Ok(value) = record.size.to_string().parse() {
        headers.insert("content-length", value);
    }

    Ok((StatusCode::OK, headers, Bytes::from(data)))
}

async fn delete_asset_handler(
    State(state): State<Arc<AssetState>>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    // Best-effort: an unknown or half-deleted asset still reports success
    if let Ok(key) = Uuid::parse_str(&key) {
        state.registry.delete(&key);
    }
    Ok(Json(ApiResponse::ok(DeleteResponse { deleted: true })))
}
