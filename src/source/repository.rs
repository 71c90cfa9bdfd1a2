//! Source repository for Vuka.

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::QueryBuilder;

use super::types::{NewSource, Source, SourceUpdate};
use crate::db::DbPool;
use crate::{Result, VukaError};

/// Row type for a source from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SourceRow {
    id: i64,
    name: String,
    website_url: String,
    rss_feed_url: String,
    created_at: String,
    updated_at: String,
}

impl From<SourceRow> for Source {
    fn from(row: SourceRow) -> Self {
        Source {
            id: row.id,
            name: row.name,
            website_url: row.website_url,
            rss_feed_url: row.rss_feed_url,
            created_at: parse_datetime(&row.created_at).unwrap_or_else(Utc::now),
            updated_at: parse_datetime(&row.updated_at).unwrap_or_else(Utc::now),
        }
    }
}

/// Parse a SQLite `datetime('now')` value.
pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

const SOURCE_COLUMNS: &str = "id, name, website_url, rss_feed_url, created_at, updated_at";

/// Repository for source CRUD operations.
pub struct SourceRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SourceRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new source.
    ///
    /// Fails with `ConstraintViolation` if a source with the same name and
    /// website already exists.
    pub async fn create(&self, source: &NewSource) -> Result<Source> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sources (name, website_url, rss_feed_url)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&source.name)
        .bind(&source.website_url)
        .bind(&source.rss_feed_url)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| VukaError::NotFound("source".to_string()))
    }

    /// Get a source by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Source>> {
        let query = format!("SELECT {SOURCE_COLUMNS} FROM sources WHERE id = $1");
        let row = sqlx::query_as::<_, SourceRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Source::from))
    }

    /// List all sources (ordered by registration order).
    pub async fn list(&self) -> Result<Vec<Source>> {
        let query = format!("SELECT {SOURCE_COLUMNS} FROM sources ORDER BY id ASC");
        let rows = sqlx::query_as::<_, SourceRow>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Source::from).collect())
    }

    /// Update a source.
    ///
    /// Returns `None` if no source has the given ID.
    pub async fn update(&self, id: i64, update: &SourceUpdate) -> Result<Option<Source>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE sources SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }

        if let Some(ref website_url) = update.website_url {
            separated.push("website_url = ");
            separated.push_bind_unseparated(website_url);
        }

        if let Some(ref rss_feed_url) = update.rss_feed_url {
            separated.push("rss_feed_url = ");
            separated.push_bind_unseparated(rss_feed_url);
        }

        separated.push("updated_at = datetime('now')");

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a source.
    ///
    /// Articles referencing it keep their rows with a NULL source.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
