//! Web API module for Vuka.
//!
//! REST endpoints for source management, ingestion triggers and read access
//! to ingested articles.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
