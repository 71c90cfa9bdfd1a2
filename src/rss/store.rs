//! Persistence seams used by the ingestion pipeline.
//!
//! The pipeline only needs a handful of store operations. Keeping them behind
//! traits lets tests drive the writer and scheduler with in-memory fakes.

use async_trait::async_trait;

use crate::article::{Article, ArticleRepository, NewArticle};
use crate::db::Database;
use crate::source::{Source, SourceRepository};
use crate::Result;

/// Article persistence needed by the deduplicating writer.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Find an article by exact original URL.
    async fn find_by_original_url(&self, url: &str) -> Result<Option<Article>>;

    /// Insert an article with its images and categories.
    ///
    /// A duplicate URL fails with `VukaError::ConstraintViolation`.
    async fn create(&self, article: &NewArticle) -> Result<Article>;
}

/// Source lookup needed by the scheduler.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// All sources in registration order.
    async fn list(&self) -> Result<Vec<Source>>;

    /// One source by ID.
    async fn get(&self, id: i64) -> Result<Option<Source>>;
}

#[async_trait]
impl ArticleStore for Database {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<Article>> {
        ArticleRepository::new(self.pool())
            .get_by_original_url(url)
            .await
    }

    async fn create(&self, article: &NewArticle) -> Result<Article> {
        ArticleRepository::new(self.pool()).create(article).await
    }
}

#[async_trait]
impl SourceStore for Database {
    async fn list(&self) -> Result<Vec<Source>> {
        SourceRepository::new(self.pool()).list().await
    }

    async fn get(&self, id: i64) -> Result<Option<Source>> {
        SourceRepository::new(self.pool()).get_by_id(id).await
    }
}
