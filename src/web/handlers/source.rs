//! Source handlers for Web API.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{path_id, AppState};
use crate::source::SourceRepository;
use crate::web::dto::{
    ApiResponse, CreateSourceRequest, SourceResponse, UpdateSourceRequest, ValidatedJson,
};
use crate::web::error::ApiError;

/// GET /api/sources - List all sources.
pub async fn list_sources(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SourceResponse>>>, ApiError> {
    let sources = SourceRepository::new(state.db.pool()).list().await?;

    Ok(Json(ApiResponse::new(
        sources.into_iter().map(SourceResponse::from).collect(),
    )))
}

/// POST /api/sources - Register a source.
pub async fn create_source(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateSourceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SourceResponse>>), ApiError> {
    let source = SourceRepository::new(state.db.pool())
        .create(&req.into_new_source())
        .await?;

    tracing::info!(source_id = source.id, name = %source.name, "source created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(SourceResponse::from(source))),
    ))
}

/// GET /api/sources/:id - Get a source.
pub async fn get_source(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<SourceResponse>>, ApiError> {
    let id = path_id(path, "source")?;

    let source = SourceRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Source not found"))?;

    Ok(Json(ApiResponse::new(SourceResponse::from(source))))
}

/// PATCH /api/sources/:id - Update name, website or feed URL.
pub async fn update_source(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    ValidatedJson(req): ValidatedJson<UpdateSourceRequest>,
) -> Result<Json<ApiResponse<SourceResponse>>, ApiError> {
    let id = path_id(path, "source")?;

    let source = SourceRepository::new(state.db.pool())
        .update(id, &req.into_update())
        .await?
        .ok_or_else(|| ApiError::not_found("Source not found"))?;

    Ok(Json(ApiResponse::new(SourceResponse::from(source))))
}

/// DELETE /api/sources/:id - Delete a source.
pub async fn delete_source(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path, "source")?;

    if !SourceRepository::new(state.db.pool()).delete(id).await? {
        return Err(ApiError::not_found("Source not found"));
    }

    tracing::info!(source_id = id, "source deleted");
    Ok(StatusCode::NO_CONTENT)
}
