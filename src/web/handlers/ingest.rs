//! Ingestion trigger handlers for Web API.
//!
//! Both endpoints answer 202 at once; the ingestion outcome only reaches the
//! log.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{path_id, AppState};
use crate::source::SourceRepository;
use crate::web::dto::MessageResponse;
use crate::web::error::ApiError;

/// POST /api/sources/:id/ingest - Ingest one source in the background.
pub async fn ingest_source(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = path_id(path, "source")?;

    let source = SourceRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Source not found"))?;

    // Rejects sources without a feed URL
    state.scheduler.trigger_source(&source)?;

    tracing::info!(source_id = id, feed_url = %source.rss_feed_url, "ingestion started");

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("RSS feed ingestion started")),
    ))
}

/// POST /api/ingest/run - Run a batch over all sources now.
pub async fn run_ingestion(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<MessageResponse>) {
    let _ = state.scheduler.trigger_now();

    tracing::info!("ingestion batch triggered");

    (
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("RSS feed ingestion triggered")),
    )
}
