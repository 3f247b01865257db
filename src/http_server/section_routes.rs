//! Section HTTP Routes
//!
//! Endpoints for versioned section content: read, create, update, history,
//! rollback.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{ContentError, HistoryEntry, Section, VersioningEngine};

use super::response::{api_error, ApiError, ApiResponse};

/// Section state shared across handlers
pub struct SectionState {
    pub engine: Arc<VersioningEngine>,
}

impl SectionState {
    pub fn new(engine: Arc<VersioningEngine>) -> Self {
        Self { engine }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    pub key: String,
    pub name: String,
    pub section_type: String,
    pub content: Value,
    pub updated_by: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    pub content: Value,
    pub updated_by: String,
    #[serde(default)]
    pub change_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RollbackRequest {
    pub version: u64,
    pub updated_by: String,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: u64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    20
}

fn content_error(e: ContentError) -> ApiError {
    api_error(e.status_code(), e.to_string())
}

// ==================
// Section Routes
// ==================

/// Create section routes
pub fn section_routes(state: Arc<SectionState>) -> Router {
    Router::new()
        .route("/sections", get(list_sections_handler))
        .route("/sections", post(create_section_handler))
        .route("/sections/:key", get(get_section_handler))
        .route("/sections/:key", put(update_section_handler))
        .route("/sections/:key/history", get(list_history_handler))
        .route("/sections/:key/rollback", post(rollback_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_sections_handler(
    State(state): State<Arc<SectionState>>,
) -> Result<Json<ApiResponse<Vec<Section>>>, ApiError> {
    let sections = state.engine.list().map_err(content_error)?;
    Ok(Json(ApiResponse::ok(sections)))
}

async fn get_section_handler(
    State(state): State<Arc<SectionState>>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Section>>, ApiError> {
    let section = state.engine.get(&key).map_err(content_error)?;
    Ok(Json(ApiResponse::ok(section)))
}

async fn create_section_handler(
    State(state): State<Arc<SectionState>>,
    Json(request): Json<CreateSectionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Section>>), ApiError> {
    let section = state
        .engine
        .create(
            &request.key,
            &request.name,
            &request.section_type,
            request.content,
            &request.updated_by,
        )
        .map_err(content_error)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(section))))
}

async fn update_section_handler(
    State(state): State<Arc<SectionState>>,
    Path(key): Path<String>,
    Json(request): Json<UpdateSectionRequest>,
) -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    let version = state
        .engine
        .apply_update(
            &key,
            request.content,
            &request.updated_by,
            request.change_summary,
        )
        .map_err(content_error)?;

    Ok(Json(ApiResponse::ok(VersionResponse { version })))
}

async fn list_history_handler(
    State(state): State<Arc<SectionState>>,
    Path(key): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<HistoryEntry>>>, ApiError> {
    let history = state
        .engine
        .list_history(&key, query.limit)
        .map_err(content_error)?;
    Ok(Json(ApiResponse::ok(history)))
}

async fn rollback_handler(
    State(state): State<Arc<SectionState>>,
    Path(key): Path<String>,
    Json(request): Json<RollbackRequest>,
) -> Result<Json<ApiResponse<VersionResponse>>, ApiError> {
    let version = state
        .engine
        .rollback(&key, request.version, &request.updated_by)
        .map_err(content_error)?;

    Ok(Json(ApiResponse::ok(VersionResponse { version })))
}
