//! Test helpers for integration tests.
//!
//! Builds the full application (database, ingestion service, scheduler and
//! router) against an in-memory database, plus a mock feed server.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vuka::config::IngestionConfig;
use vuka::rss::{IngestService, IngestionScheduler};
use vuka::web::{create_router, AppState};
use vuka::{ArticleRepository, Database, NewSource, Source, SourceRepository};

/// Default timeout for waiting on background ingestion.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A running application under test.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub scheduler: IngestionScheduler,
}

/// Ingestion settings that allow fetching from the local mock server.
pub fn test_ingestion_config() -> IngestionConfig {
    IngestionConfig {
        allow_private_networks: true,
        total_timeout_secs: 5,
        ..Default::default()
    }
}

impl TestApp {
    /// Build the application on a fresh in-memory database.
    pub async fn new() -> Self {
        Self::with_ingestion_config(test_ingestion_config()).await
    }

    /// Build the application with custom ingestion settings.
    pub async fn with_ingestion_config(config: IngestionConfig) -> Self {
        let db = Database::open_in_memory()
            .await
            .expect("Failed to create test database");

        let service = IngestService::new(&config, Arc::new(db.clone()))
            .expect("Failed to create ingest service");
        let scheduler = IngestionScheduler::new(service, Arc::new(db.clone()), "0 0 * * * *");

        let state = Arc::new(AppState::new(db.clone(), scheduler.clone()));
        let router = create_router(state, &[]);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            db,
            scheduler,
        }
    }

    /// Insert a source directly.
    pub async fn add_source(&self, name: &str, feed_url: &str) -> Source {
        SourceRepository::new(self.db.pool())
            .create(&NewSource::new(name).with_rss_feed_url(feed_url))
            .await
            .expect("Failed to create source")
    }

    /// Number of stored articles.
    pub async fn article_count(&self) -> i64 {
        ArticleRepository::new(self.db.pool())
            .count()
            .await
            .expect("Failed to count articles")
    }

    /// Poll until at least `expected` articles are stored or the timeout passes.
    pub async fn wait_for_articles(&self, expected: i64) -> i64 {
        let deadline = tokio::time::Instant::now() + DEFAULT_TIMEOUT;
        loop {
            let count = self.article_count().await;
            if count >= expected || tokio::time::Instant::now() >= deadline {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
}

/// Build an RSS document from `(title, link, description, pub_date)` items.
pub fn rss_feed(items: &[(&str, &str, &str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(title, link, description, pub_date)| {
            format!(
                "<item><title>{title}</title><link>{link}</link>\
                 <description><![CDATA[{description}]]></description>\
                 <pubDate>{pub_date}</pubDate></item>"
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Test feed</title><link>https://feed.example</link><description>Test</description>
{items}
</channel></rss>"#
    )
}

/// Serve `body` at `route` on a new mock server.
pub async fn serve_feed(route: &str, body: String) -> MockServer {
    let server = MockServer::start().await;
    mount_feed(&server, route, body).await;
    server
}

/// Serve `body` at `route` on an existing mock server.
pub async fn mount_feed(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}
