//! Content sources for Vuka.
//!
//! A source is a news outlet with an optional RSS feed URL. Sources are
//! managed through the Web API and read by the ingestion scheduler.

pub mod repository;
pub mod types;

pub use repository::SourceRepository;
pub use types::{NewSource, Source, SourceUpdate};
