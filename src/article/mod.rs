//! Articles for Vuka.
//!
//! Articles are created by the RSS ingestion pipeline and read through the
//! Web API.

pub mod repository;
pub mod types;

pub use repository::ArticleRepository;
pub use types::{Article, ArticleImage, NewArticle};
