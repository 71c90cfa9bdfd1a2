//! Article repository for Vuka.

use chrono::{DateTime, Utc};

use super::types::{Article, ArticleImage, NewArticle};
use crate::db::DbPool;
use crate::source::repository::parse_datetime;
use crate::{Result, VukaError};

/// Row type for an article from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    language: String,
    original_url: String,
    summary: String,
    content_body: String,
    published_at: String,
    is_featured: bool,
    source_id: Option<i64>,
    created_at: String,
}

impl ArticleRow {
    fn into_article(self, images: Vec<ArticleImage>, categories: Vec<String>) -> Result<Article> {
        let published_at = DateTime::parse_from_rfc3339(&self.published_at).map_err(|e| {
            VukaError::Database(format!(
                "article {} has invalid published_at {:?}: {}",
                self.id, self.published_at, e
            ))
        })?;

        Ok(Article {
            id: self.id,
            title: self.title,
            language: self.language,
            original_url: self.original_url,
            summary: self.summary,
            content_body: self.content_body,
            published_at,
            is_featured: self.is_featured,
            source_id: self.source_id,
            images,
            categories,
            created_at: parse_datetime(&self.created_at).unwrap_or_else(Utc::now),
        })
    }
}

/// Row type for an article image from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ArticleImageRow {
    id: i64,
    article_id: i64,
    position: i64,
    url: String,
    alt_text: String,
    is_main: bool,
}

impl From<ArticleImageRow> for ArticleImage {
    fn from(row: ArticleImageRow) -> Self {
        ArticleImage {
            id: row.id,
            article_id: row.article_id,
            position: row.position,
            url: row.url,
            alt_text: row.alt_text,
            is_main: row.is_main,
        }
    }
}

const ARTICLE_COLUMNS: &str = "id, title, language, original_url, summary, content_body, \
                               published_at, is_featured, source_id, created_at";

/// Repository for article operations.
pub struct ArticleRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ArticleRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert an article together with its images and categories.
    ///
    /// All rows are written in one transaction. A duplicate `original_url`
    /// fails with [`VukaError::ConstraintViolation`] and writes nothing.
    pub async fn create(&self, article: &NewArticle) -> Result<Article> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO articles (title, language, original_url, summary, content_body,
                                  published_at, is_featured, source_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&article.title)
        .bind(&article.language)
        .bind(&article.original_url)
        .bind(&article.summary)
        .bind(&article.content_body)
        .bind(article.published_at.to_rfc3339())
        .bind(article.is_featured)
        .bind(article.source_id)
        .fetch_one(&mut *tx)
        .await?;

        for (position, image) in article.images.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO article_images (article_id, position, url, alt_text, is_main)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(id)
            .bind(position as i64)
            .bind(&image.url)
            .bind(&image.alt_text)
            .bind(image.is_main)
            .execute(&mut *tx)
            .await?;
        }

        for category in &article.categories {
            sqlx::query(
                "INSERT OR IGNORE INTO article_categories (article_id, name) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(category)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| VukaError::NotFound("article".to_string()))
    }

    /// Get an article by ID, with images and categories.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Article>> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Get an article by its canonical original URL.
    pub async fn get_by_original_url(&self, url: &str) -> Result<Option<Article>> {
        let query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE original_url = $1");
        let row = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(url)
            .fetch_optional(self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// List articles, newest publication first.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Article>> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles
             ORDER BY published_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await?;

        let mut articles = Vec::with_capacity(rows.len());
        for row in rows {
            articles.push(self.hydrate(row).await?);
        }
        Ok(articles)
    }

    /// Count all articles.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Count articles from a source.
    pub async fn count_by_source(&self, source_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE source_id = $1")
            .bind(source_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn hydrate(&self, row: ArticleRow) -> Result<Article> {
        let images = self.images_for(row.id).await?;
        let categories = self.categories_for(row.id).await?;
        row.into_article(images, categories)
    }

    async fn images_for(&self, article_id: i64) -> Result<Vec<ArticleImage>> {
        let rows = sqlx::query_as::<_, ArticleImageRow>(
            r#"
            SELECT id, article_id, position, url, alt_text, is_main
            FROM article_images
            WHERE article_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(article_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ArticleImage::from).collect())
    }

    async fn categories_for(&self, article_id: i64) -> Result<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM article_categories WHERE article_id = $1 ORDER BY rowid ASC",
        )
        .bind(article_id)
        .fetch_all(self.pool)
        .await?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rss::ExtractedImage;
    use crate::source::{NewSource, SourceRepository};
    use crate::Database;

    fn sample_article(url: &str) -> NewArticle {
        NewArticle {
            title: "Load shedding suspended".to_string(),
            language: "en".to_string(),
            original_url: url.to_string(),
            summary: "<p>Eskom says</p>".to_string(),
            content_body: "<p>Eskom says the grid is stable.</p>".to_string(),
            published_at: DateTime::parse_from_rfc3339("2025-03-01T08:00:00+02:00").unwrap(),
            is_featured: false,
            source_id: None,
            images: vec![
                ExtractedImage::new("https://img.example/a.jpg", "Pylons", true),
                ExtractedImage::new("https://img.example/b.jpg", "", false),
            ],
            categories: vec!["Business".to_string(), "Politics".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_with_children() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = ArticleRepository::new(db.pool());

        let article = repo
            .create(&sample_article("https://news.example/1"))
            .await
            .unwrap();

        assert_eq!(article.title, "Load shedding suspended");
        assert_eq!(article.published_at.to_rfc3339(), "2025-03-01T08:00:00+02:00");
        assert_eq!(article.images.len(), 2);
        assert_eq!(article.images[0].url, "https://img.example/a.jpg");
        assert_eq!(article.images[0].position, 0);
        assert!(article.images[0].is_main);
        assert!(!article.images[1].is_main);
        assert_eq!(
            article.main_image().map(|i| i.alt_text.as_str()),
            Some("Pylons")
        );
        assert_eq!(article.categories, vec!["Business", "Politics"]);
    }

    #[tokio::test]
    async fn test_duplicate_original_url_is_constraint_violation() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = ArticleRepository::new(db.pool());

        repo.create(&sample_article("https://news.example/dup"))
            .await
            .unwrap();
        let result = repo.create(&sample_article("https://news.example/dup")).await;

        assert!(matches!(result, Err(VukaError::ConstraintViolation(_))));
        assert_eq!(repo.count().await.unwrap(), 1);

        // The failed transaction left no orphan images behind
        let images: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM article_images")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(images, 2);
    }

    #[tokio::test]
    async fn test_get_by_original_url() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = ArticleRepository::new(db.pool());

        repo.create(&sample_article("https://news.example/find-me"))
            .await
            .unwrap();

        let found = repo
            .get_by_original_url("https://news.example/find-me")
            .await
            .unwrap();
        assert!(found.is_some());

        let missing = repo
            .get_by_original_url("https://news.example/other")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_source_reference_set_null_on_delete() {
        let db = Database::open_in_memory().await.unwrap();
        let source = SourceRepository::new(db.pool())
            .create(&NewSource::new("Scrolla"))
            .await
            .unwrap();
        let repo = ArticleRepository::new(db.pool());

        let article = repo
            .create(&sample_article("https://news.example/src").with_source_id(source.id))
            .await
            .unwrap();
        assert_eq!(article.source_id, Some(source.id));
        assert_eq!(repo.count_by_source(source.id).await.unwrap(), 1);

        SourceRepository::new(db.pool())
            .delete(source.id)
            .await
            .unwrap();

        let article = repo.get_by_id(article.id).await.unwrap().unwrap();
        assert_eq!(article.source_id, None);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = ArticleRepository::new(db.pool());

        let mut older = sample_article("https://news.example/older");
        older.published_at = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        repo.create(&older).await.unwrap();
        repo.create(&sample_article("https://news.example/newer"))
            .await
            .unwrap();

        let articles = repo.list(10, 0).await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].original_url, "https://news.example/newer");

        let page2 = repo.list(1, 1).await.unwrap();
        assert_eq!(page2[0].original_url, "https://news.example/older");
    }
}
