//! RSS ingestion pipeline for Vuka.
//!
//! fetch -> parse -> map (images, categories) -> deduplicating write, driven
//! per source by [`IngestService`] and across all sources by
//! [`IngestionScheduler`].

pub mod category;
pub mod fetcher;
pub mod images;
pub mod mapper;
pub mod parser;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod types;
pub mod writer;

pub use category::{map_categories, map_category};
pub use fetcher::{validate_url, FeedFetcher};
pub use images::extract_images;
pub use mapper::{parse_pub_date, ArticleMapper};
pub use parser::parse_feed;
pub use scheduler::IngestionScheduler;
pub use service::IngestService;
pub use store::{ArticleStore, SourceStore};
pub use types::{
    BatchSummary, ExtractedImage, FeedDocument, FeedItem, IngestionReport, MAX_FEED_SIZE,
    PUB_DATE_FORMAT,
};
pub use writer::DeduplicatingWriter;
