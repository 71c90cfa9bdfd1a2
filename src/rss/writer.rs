//! Deduplicating article writer.

use std::sync::Arc;

use tracing::debug;

use crate::article::NewArticle;
use crate::rss::store::ArticleStore;
use crate::{Result, VukaError};

/// Persists articles unless one with the same original URL already exists.
#[derive(Clone)]
pub struct DeduplicatingWriter {
    store: Arc<dyn ArticleStore>,
}

impl DeduplicatingWriter {
    /// Create a writer over an article store.
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// Insert `article` if its original URL is new.
    ///
    /// Returns `Ok(true)` if the article was saved and `Ok(false)` if it was
    /// already present. The lookup is only a fast path; a unique-constraint
    /// rejection from a concurrent insert also yields `Ok(false)`.
    pub async fn create_if_not_exists(&self, article: &NewArticle) -> Result<bool> {
        if self
            .store
            .find_by_original_url(&article.original_url)
            .await?
            .is_some()
        {
            debug!(url = %article.original_url, "article already stored");
            return Ok(false);
        }

        match self.store.create(article).await {
            Ok(created) => {
                debug!(article_id = created.id, url = %created.original_url, "article saved");
                Ok(true)
            }
            Err(VukaError::ConstraintViolation(_)) => {
                debug!(url = %article.original_url, "article inserted concurrently");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::Database;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn candidate(url: &str) -> NewArticle {
        NewArticle {
            title: "Title".to_string(),
            language: "en".to_string(),
            original_url: url.to_string(),
            summary: String::new(),
            content_body: String::new(),
            published_at: DateTime::parse_from_rfc3339("2025-05-01T12:00:00+00:00").unwrap(),
            is_featured: false,
            source_id: None,
            images: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Store whose lookup always misses and whose insert fails with a fixed error.
    struct FailingStore {
        error: fn() -> VukaError,
        creates: AtomicUsize,
    }

    #[async_trait]
    impl ArticleStore for FailingStore {
        async fn find_by_original_url(&self, _url: &str) -> Result<Option<Article>> {
            Ok(None)
        }

        async fn create(&self, _article: &NewArticle) -> Result<Article> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Err((self.error)())
        }
    }

    #[tokio::test]
    async fn test_saves_new_then_reports_duplicate() {
        let db = Database::open_in_memory().await.unwrap();
        let writer = DeduplicatingWriter::new(Arc::new(db.clone()));

        assert!(writer
            .create_if_not_exists(&candidate("https://n.example/a"))
            .await
            .unwrap());
        assert!(!writer
            .create_if_not_exists(&candidate("https://n.example/a"))
            .await
            .unwrap());
        assert!(writer
            .create_if_not_exists(&candidate("https://n.example/b"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_race_on_insert_is_duplicate() {
        let store = Arc::new(FailingStore {
            error: || VukaError::ConstraintViolation("UNIQUE constraint failed".to_string()),
            creates: AtomicUsize::new(0),
        });
        let writer = DeduplicatingWriter::new(store.clone());

        let saved = writer
            .create_if_not_exists(&candidate("https://n.example/race"))
            .await
            .unwrap();

        assert!(!saved);
        assert_eq!(store.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_other_store_errors_propagate() {
        let store = Arc::new(FailingStore {
            error: || VukaError::Database("disk I/O error".to_string()),
            creates: AtomicUsize::new(0),
        });
        let writer = DeduplicatingWriter::new(store);

        let err = writer
            .create_if_not_exists(&candidate("https://n.example/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, VukaError::Database(_)));
    }
}
