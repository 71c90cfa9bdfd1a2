//! Router configuration for the Vuka Web API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_source, delete_source, get_article, get_source, ingest_source, list_articles,
    list_sources, run_ingestion, update_source, AppState,
};
use super::middleware::create_cors_layer;

/// Create the main API router, including `/health`.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let source_routes = Router::new()
        .route("/", get(list_sources).post(create_source))
        .route(
            "/:id",
            get(get_source).patch(update_source).delete(delete_source),
        )
        .route("/:id/ingest", post(ingest_source));

    let article_routes = Router::new()
        .route("/", get(list_articles))
        .route("/:id", get(get_article));

    let api_routes = Router::new()
        .nest("/sources", source_routes)
        .nest("/articles", article_routes)
        .route("/ingest/run", post(run_ingestion));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
        .merge(create_health_router())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
