//! Article handlers for Web API.

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::{path_id, AppState};
use crate::article::ArticleRepository;
use crate::web::dto::{ApiResponse, ArticleResponse, PaginatedResponse, PaginationQuery};
use crate::web::error::ApiError;

/// GET /api/articles - List articles, newest first.
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<ArticleResponse>>, ApiError> {
    let pagination = pagination.normalized();
    let (offset, limit) = pagination.to_offset_limit();

    let repo = ArticleRepository::new(state.db.pool());
    let total = repo.count().await?;
    let articles = repo.list(limit, offset).await?;

    Ok(Json(PaginatedResponse::new(
        articles.into_iter().map(ArticleResponse::from).collect(),
        pagination.page,
        pagination.per_page,
        total as u64,
    )))
}

/// GET /api/articles/:id - Get an article with its images and categories.
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let id = path_id(path, "article")?;

    let article = ArticleRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Article not found"))?;

    Ok(Json(ApiResponse::new(ArticleResponse::from(article))))
}
