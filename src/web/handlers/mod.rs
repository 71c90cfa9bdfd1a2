//! API handlers for the Vuka Web API.

pub mod article;
pub mod ingest;
pub mod source;

pub use article::*;
pub use ingest::*;
pub use source::*;

use axum::extract::{rejection::PathRejection, Path};

use crate::db::Database;
use crate::rss::IngestionScheduler;
use crate::web::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Ingestion scheduler, used for manual triggers.
    pub scheduler: IngestionScheduler,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, scheduler: IngestionScheduler) -> Self {
        Self { db, scheduler }
    }
}

/// Unwrap a numeric path ID, answering 400 instead of axum's plain-text rejection.
pub(crate) fn path_id(
    path: Result<Path<i64>, PathRejection>,
    what: &str,
) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request(format!("Invalid {} ID", what)))
}
