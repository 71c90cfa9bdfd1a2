//! Source types for Vuka.

use chrono::{DateTime, Utc};

/// A configured content origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Source ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Website URL.
    pub website_url: String,
    /// RSS feed URL. Empty when the source has no feed.
    pub rss_feed_url: String,
    /// When the source was created.
    pub created_at: DateTime<Utc>,
    /// When the source was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Source {
    /// Whether the source has a feed the scheduler can ingest.
    pub fn has_feed(&self) -> bool {
        !self.rss_feed_url.trim().is_empty()
    }
}

/// New source for creation.
#[derive(Debug, Clone)]
pub struct NewSource {
    /// Display name.
    pub name: String,
    /// Website URL.
    pub website_url: String,
    /// RSS feed URL.
    pub rss_feed_url: String,
}

impl NewSource {
    /// Create a new source with no website or feed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            website_url: String::new(),
            rss_feed_url: String::new(),
        }
    }

    /// Set the website URL.
    pub fn with_website_url(mut self, url: impl Into<String>) -> Self {
        self.website_url = url.into();
        self
    }

    /// Set the RSS feed URL.
    pub fn with_rss_feed_url(mut self, url: impl Into<String>) -> Self {
        self.rss_feed_url = url.into();
        self
    }
}

/// Partial source update.
///
/// Only the listed fields can be patched.
#[derive(Debug, Clone, Default)]
pub struct SourceUpdate {
    /// New name.
    pub name: Option<String>,
    /// New website URL.
    pub website_url: Option<String>,
    /// New RSS feed URL (empty string clears it).
    pub rss_feed_url: Option<String>,
}

impl SourceUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the website URL.
    pub fn with_website_url(mut self, url: impl Into<String>) -> Self {
        self.website_url = Some(url.into());
        self
    }

    /// Set the RSS feed URL.
    pub fn with_rss_feed_url(mut self, url: impl Into<String>) -> Self {
        self.rss_feed_url = Some(url.into());
        self
    }

    /// Check if the update has no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.website_url.is_none() && self.rss_feed_url.is_none()
    }
}
