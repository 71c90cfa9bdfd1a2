//! Response DTOs for Web API.

use serde::Serialize;

use crate::article::{Article, ArticleImage};
use crate::source::Source;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
}

/// Plain acknowledgement body, e.g. for 202 responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Source response.
#[derive(Debug, Serialize)]
pub struct SourceResponse {
    pub id: i64,
    pub name: String,
    pub website_url: String,
    pub rss_feed_url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Source> for SourceResponse {
    fn from(source: Source) -> Self {
        Self {
            id: source.id,
            name: source.name,
            website_url: source.website_url,
            rss_feed_url: source.rss_feed_url,
            created_at: source.created_at.to_rfc3339(),
            updated_at: source.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Articles
// ============================================================================

/// Article image in responses.
#[derive(Debug, Serialize)]
pub struct ArticleImageResponse {
    pub url: String,
    pub alt_text: String,
    pub is_main: bool,
}

impl From<ArticleImage> for ArticleImageResponse {
    fn from(image: ArticleImage) -> Self {
        Self {
            url: image.url,
            alt_text: image.alt_text,
            is_main: image.is_main,
        }
    }
}

/// Article response.
#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub language: String,
    pub original_url: String,
    pub summary: String,
    pub content_body: String,
    /// RFC 3339 with the offset the feed declared.
    pub published_at: String,
    pub is_featured: bool,
    pub source_id: Option<i64>,
    pub images: Vec<ArticleImageResponse>,
    pub categories: Vec<String>,
    pub created_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            language: article.language,
            original_url: article.original_url,
            summary: article.summary,
            content_body: article.content_body,
            published_at: article.published_at.to_rfc3339(),
            is_featured: article.is_featured,
            source_id: article.source_id,
            images: article.images.into_iter().map(Into::into).collect(),
            categories: article.categories,
            created_at: article.created_at.to_rfc3339(),
        }
    }
}
