//! RSS ingestion types for Vuka.

use std::ops::AddAssign;

/// Default maximum feed size in bytes (5MB).
pub const MAX_FEED_SIZE: u64 = 5 * 1024 * 1024;

/// Publish date layout used by feeds (RFC 1123 with a numeric zone).
pub const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// A decoded RSS channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    /// Channel title.
    pub title: String,
    /// Channel description.
    pub description: String,
    /// Channel language, if declared.
    pub language: Option<String>,
    /// Items in document order.
    pub items: Vec<FeedItem>,
}

/// One `<item>` of a feed.
///
/// Absent optional elements decode to empty strings or empty vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    /// Item title.
    pub title: String,
    /// Canonical URL of the article.
    pub link: String,
    /// Raw HTML description.
    pub description: String,
    /// Item GUID.
    pub guid: String,
    /// Author.
    pub author: String,
    /// Raw `pubDate` text.
    pub pub_date: String,
    /// Category labels.
    pub categories: Vec<String>,
    /// Rendered body from `content:encoded`.
    pub content: Option<String>,
}

impl FeedItem {
    /// Create an item with a title and link.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the raw publish date.
    pub fn with_pub_date(mut self, pub_date: impl Into<String>) -> Self {
        self.pub_date = pub_date.into();
        self
    }

    /// Set the rendered content body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Add a category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }
}

/// An image found in an item's HTML description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// Image URL. Never empty.
    pub url: String,
    /// Alternative text (possibly empty).
    pub alt_text: String,
    /// True only for the first kept image.
    pub is_main: bool,
}

impl ExtractedImage {
    /// Create a new extracted image.
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>, is_main: bool) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            is_main,
        }
    }
}

/// Outcome counts of one feed ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct IngestionReport {
    /// Items persisted as new articles.
    pub saved_count: usize,
    /// Items whose URL was already stored.
    pub duplicate_count: usize,
    /// Items that failed to map or write.
    pub failed_count: usize,
}

impl IngestionReport {
    /// Total number of items processed.
    pub fn total(&self) -> usize {
        self.saved_count + self.duplicate_count + self.failed_count
    }
}

impl AddAssign for IngestionReport {
    fn add_assign(&mut self, other: Self) {
        self.saved_count += other.saved_count;
        self.duplicate_count += other.duplicate_count;
        self.failed_count += other.failed_count;
    }
}

/// Outcome of one scheduled batch over all sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    /// Sources with a feed URL that were ingested.
    pub processed: usize,
    /// Sources whose ingestion completed.
    pub succeeded: usize,
    /// Sources whose ingestion failed to fetch or parse.
    pub failed: usize,
    /// Sources skipped for lack of a feed URL.
    pub skipped: usize,
    /// Item counts summed over succeeded sources.
    pub report: IngestionReport,
    /// True if the batch did not run because another was in flight.
    pub skipped_overlap: bool,
}

impl BatchSummary {
    /// Summary for a batch that was not started.
    pub fn overlapped() -> Self {
        Self {
            skipped_overlap: true,
            ..Default::default()
        }
    }
}
