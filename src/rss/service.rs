//! Feed ingestion service for Vuka.
//!
//! One call to [`IngestService::ingest`] downloads a feed, maps every item
//! to an article and stores the ones not seen before.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::IngestionConfig;
use crate::rss::fetcher::FeedFetcher;
use crate::rss::mapper::ArticleMapper;
use crate::rss::parser::parse_feed;
use crate::rss::store::ArticleStore;
use crate::rss::types::IngestionReport;
use crate::rss::writer::DeduplicatingWriter;
use crate::Result;

/// Service that ingests one feed at a time.
#[derive(Clone)]
pub struct IngestService {
    fetcher: FeedFetcher,
    mapper: ArticleMapper,
    writer: DeduplicatingWriter,
    default_language: String,
}

impl IngestService {
    /// Create a new service writing to `store`.
    pub fn new(config: &IngestionConfig, store: Arc<dyn ArticleStore>) -> Result<Self> {
        Ok(Self {
            fetcher: FeedFetcher::new(config)?,
            mapper: ArticleMapper::new()?,
            writer: DeduplicatingWriter::new(store),
            default_language: config.default_language.clone(),
        })
    }

    /// Ingest the feed at `feed_url`.
    ///
    /// Fetch and parse failures abort the run and return an error. After
    /// that, every item is processed in document order: items that fail to
    /// map or write are counted as failed and do not stop the loop. Articles
    /// already written stay written.
    pub async fn ingest(&self, feed_url: &str, source_id: Option<i64>) -> Result<IngestionReport> {
        let started = Instant::now();

        let body = self.fetcher.fetch(feed_url).await?;
        let feed = parse_feed(&body)?;

        let language = feed
            .language
            .as_deref()
            .unwrap_or(&self.default_language)
            .to_string();

        let mut report = IngestionReport::default();

        for item in &feed.items {
            let mut article = match self.mapper.to_article(item, &language) {
                Ok(article) => article,
                Err(e) => {
                    warn!(feed_url = %feed_url, link = %item.link, "failed to convert item: {}", e);
                    report.failed_count += 1;
                    continue;
                }
            };
            article.source_id = source_id;

            match self.writer.create_if_not_exists(&article).await {
                Ok(true) => report.saved_count += 1,
                Ok(false) => report.duplicate_count += 1,
                Err(e) => {
                    warn!(feed_url = %feed_url, link = %item.link, "failed to save article: {}", e);
                    report.failed_count += 1;
                }
            }
        }

        info!(
            feed_url = %feed_url,
            source_id = ?source_id,
            saved = report.saved_count,
            duplicates = report.duplicate_count,
            failed = report.failed_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "feed ingested"
        );

        Ok(report)
    }
}
