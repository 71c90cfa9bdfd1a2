//! Article types for Vuka.

use chrono::{DateTime, FixedOffset, Utc};

use crate::rss::ExtractedImage;

/// A persisted article.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Article ID.
    pub id: i64,
    /// Headline.
    pub title: String,
    /// Language code.
    pub language: String,
    /// Canonical URL of the original publication. Unique across articles.
    pub original_url: String,
    /// HTML summary with image tags removed.
    pub summary: String,
    /// Full content body.
    pub content_body: String,
    /// Publication time with the offset the feed declared.
    pub published_at: DateTime<FixedOffset>,
    /// Whether the article is featured.
    pub is_featured: bool,
    /// Originating source, if known.
    pub source_id: Option<i64>,
    /// Images in document order.
    pub images: Vec<ArticleImage>,
    /// Grouped category names.
    pub categories: Vec<String>,
    /// When the article row was created.
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// The main image, if the article has one.
    pub fn main_image(&self) -> Option<&ArticleImage> {
        self.images.iter().find(|image| image.is_main)
    }
}

/// An image attached to a persisted article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleImage {
    /// Image ID.
    pub id: i64,
    /// Owning article ID.
    pub article_id: i64,
    /// Zero-based position in document order.
    pub position: i64,
    /// Image URL.
    pub url: String,
    /// Alternative text (possibly empty).
    pub alt_text: String,
    /// Whether this is the article's main image.
    pub is_main: bool,
}

/// Candidate article produced from a feed item, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    /// Headline.
    pub title: String,
    /// Language code.
    pub language: String,
    /// Canonical URL (dedup key).
    pub original_url: String,
    /// HTML summary with image tags removed.
    pub summary: String,
    /// Full content body.
    pub content_body: String,
    /// Publication time.
    pub published_at: DateTime<FixedOffset>,
    /// Whether the article is featured.
    pub is_featured: bool,
    /// Originating source.
    pub source_id: Option<i64>,
    /// Images in document order.
    pub images: Vec<ExtractedImage>,
    /// Grouped category names.
    pub categories: Vec<String>,
}

impl NewArticle {
    /// Attach the originating source.
    pub fn with_source_id(mut self, source_id: i64) -> Self {
        self.source_id = Some(source_id);
        self
    }
}
