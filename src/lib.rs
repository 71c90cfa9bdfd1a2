//! Vuka - news aggregation backend
//!
//! Ingests RSS feeds from registered news sources into articles with images
//! and categories, on a cron schedule or on demand, and serves them over a
//! REST API.

pub mod article;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod rss;
pub mod source;
pub mod web;

pub use article::{Article, ArticleImage, ArticleRepository, NewArticle};
pub use config::Config;
pub use db::{Database, DbPool};
pub use error::{Result, VukaError};
pub use source::{NewSource, Source, SourceRepository, SourceUpdate};
