//! End-to-end ingestion tests.
//!
//! Feeds are served by a local mock server; ingestion is triggered through
//! the Web API and the scheduler, and results are read back via the API.

mod common;

use axum::http::StatusCode;
use common::{mount_feed, rss_feed, serve_feed, test_ingestion_config, TestApp};
use serde_json::{json, Value};
use vuka::config::IngestionConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const DATE_1: &str = "Mon, 02 Jan 2006 15:04:05 -0700";
const DATE_2: &str = "Tue, 03 Jan 2006 09:30:00 +0200";

fn two_item_feed() -> String {
    rss_feed(&[
        (
            "Hello",
            "https://news.example/hello",
            r#"<p>hi</p><img src="a.jpg" alt="A"><img src="b.jpg">"#,
            DATE_1,
        ),
        ("Second", "https://news.example/second", "<p>two</p>", DATE_2),
    ])
}

#[tokio::test]
async fn test_ingest_endpoint_accepts_and_stores() {
    let app = TestApp::new().await;
    let feeds = serve_feed("/rss.xml", two_item_feed()).await;
    let source = app
        .add_source("Example News", &format!("{}/rss.xml", feeds.uri()))
        .await;

    let response = app
        .server
        .post(&format!("/api/sources/{}/ingest", source.id))
        .await;
    response.assert_status(StatusCode::ACCEPTED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "RSS feed ingestion started" })
    );

    assert_eq!(app.wait_for_articles(2).await, 2);

    let list = app.server.get("/api/articles").await.json::<Value>();
    assert_eq!(list["meta"]["total"], 2);

    let articles = list["data"].as_array().unwrap();
    let hello = articles
        .iter()
        .find(|a| a["original_url"] == "https://news.example/hello")
        .unwrap();
    assert_eq!(hello["summary"], "<p>hi</p>");
    assert_eq!(hello["published_at"], "2006-01-02T15:04:05-07:00");
    assert_eq!(hello["source_id"], source.id);
    assert_eq!(hello["is_featured"], false);
    assert_eq!(
        hello["images"],
        json!([
            { "url": "a.jpg", "alt_text": "A", "is_main": true },
            { "url": "b.jpg", "alt_text": "", "is_main": false }
        ])
    );

    let detail = app
        .server
        .get(&format!("/api/articles/{}", hello["id"]))
        .await;
    detail.assert_status_ok();
    assert_eq!(detail.json::<Value>()["data"]["title"], "Hello");
}

#[tokio::test]
async fn test_single_quoted_images_stored() {
    let app = TestApp::new().await;
    let feed = rss_feed(&[(
        "Hello",
        "https://x/hello",
        "<p>hi</p><img src='https://x/a.jpg'><img src='https://x/b.jpg'>",
        DATE_1,
    )]);
    let feeds = serve_feed("/rss.xml", feed).await;
    app.add_source("X", &format!("{}/rss.xml", feeds.uri()))
        .await;

    let summary = app.scheduler.run_all().await;
    assert_eq!(summary.report.saved_count, 1);

    let list = app.server.get("/api/articles").await.json::<Value>();
    let article = &list["data"][0];
    assert_eq!(article["summary"], "<p>hi</p>");
    assert_eq!(article["published_at"], "2006-01-02T15:04:05-07:00");
    assert_eq!(
        article["images"],
        json!([
            { "url": "https://x/a.jpg", "alt_text": "", "is_main": true },
            { "url": "https://x/b.jpg", "alt_text": "", "is_main": false }
        ])
    );
}

#[tokio::test]
async fn test_batch_continues_past_slow_source() {
    let app = TestApp::with_ingestion_config(IngestionConfig {
        total_timeout_secs: 1,
        ..test_ingestion_config()
    })
    .await;
    let feeds = serve_feed("/good.xml", two_item_feed()).await;
    Mock::given(method("GET"))
        .and(path("/slow.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(two_item_feed())
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&feeds)
        .await;

    app.add_source("Slow", &format!("{}/slow.xml", feeds.uri()))
        .await;
    app.add_source("Good", &format!("{}/good.xml", feeds.uri()))
        .await;

    let summary = app.scheduler.run_all().await;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(app.article_count().await, 2);
}

#[tokio::test]
async fn test_ingest_endpoint_errors() {
    let app = TestApp::new().await;
    let no_feed = app.add_source("Print only", "").await;

    let response = app
        .server
        .post(&format!("/api/sources/{}/ingest", no_feed.id))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Source does not have an RSS feed URL"
    );

    let response = app.server.post("/api/sources/4242/ingest").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Source not found"
    );

    app.server
        .post("/api/sources/not-a-number/ingest")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_fetch_still_accepted() {
    let app = TestApp::new().await;
    let feeds = wiremock::MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&feeds)
        .await;
    let source = app
        .add_source("Down", &format!("{}/rss.xml", feeds.uri()))
        .await;

    app.server
        .post(&format!("/api/sources/{}/ingest", source.id))
        .await
        .assert_status(StatusCode::ACCEPTED);

    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert_eq!(app.article_count().await, 0);
}

#[tokio::test]
async fn test_reingest_is_idempotent() {
    let app = TestApp::new().await;
    let feeds = serve_feed("/rss.xml", two_item_feed()).await;
    app.add_source("Example News", &format!("{}/rss.xml", feeds.uri()))
        .await;

    let first = app.scheduler.run_all().await;
    let second = app.scheduler.run_all().await;

    assert_eq!(first.report.saved_count, 2);
    assert_eq!(second.report.saved_count, 0);
    assert_eq!(second.report.duplicate_count, first.report.saved_count);
    assert_eq!(app.article_count().await, 2);
}

#[tokio::test]
async fn test_batch_continues_past_failures() {
    let app = TestApp::new().await;
    let feeds = serve_feed("/good.xml", two_item_feed()).await;
    mount_feed(&feeds, "/garbage.xml", "<<<not xml".to_string()).await;

    app.add_source("Garbage", &format!("{}/garbage.xml", feeds.uri()))
        .await;
    app.add_source("Unreachable", "http://127.0.0.1:9/rss.xml").await;
    app.add_source("No feed", "").await;
    app.add_source("Good", &format!("{}/good.xml", feeds.uri()))
        .await;

    let summary = app.scheduler.run_all().await;

    assert_eq!(summary.processed, 3);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(app.article_count().await, 2);
}

#[tokio::test]
async fn test_bad_items_do_not_abort_feed() {
    let app = TestApp::new().await;
    let feed = rss_feed(&[
        ("Good", "https://news.example/good", "<p>ok</p>", DATE_1),
        ("Bad date", "https://news.example/bad", "<p>x</p>", "02/01/2006"),
        ("Also good", "https://news.example/also", "<p>ok</p>", DATE_2),
    ]);
    let feeds = serve_feed("/rss.xml", feed).await;
    app.add_source("Mixed", &format!("{}/rss.xml", feeds.uri()))
        .await;

    let summary = app.scheduler.run_all().await;

    assert_eq!(summary.report.saved_count, 2);
    assert_eq!(summary.report.failed_count, 1);
    assert_eq!(app.article_count().await, 2);
}

#[tokio::test]
async fn test_run_endpoint_triggers_batch() {
    let app = TestApp::new().await;
    let feeds = serve_feed("/rss.xml", two_item_feed()).await;
    app.add_source("Example News", &format!("{}/rss.xml", feeds.uri()))
        .await;

    let response = app.server.post("/api/ingest/run").await;
    response.assert_status(StatusCode::ACCEPTED);
    assert_eq!(
        response.json::<Value>()["message"],
        "RSS feed ingestion triggered"
    );

    assert_eq!(app.wait_for_articles(2).await, 2);
}

#[tokio::test]
async fn test_articles_pagination() {
    let app = TestApp::new().await;
    let feeds = serve_feed("/rss.xml", two_item_feed()).await;
    app.add_source("Example News", &format!("{}/rss.xml", feeds.uri()))
        .await;
    app.scheduler.run_all().await;

    let page = app
        .server
        .get("/api/articles")
        .add_query_param("page", 2)
        .add_query_param("per_page", 1)
        .await
        .json::<Value>();

    assert_eq!(page["meta"]["page"], 2);
    assert_eq!(page["meta"]["per_page"], 1);
    assert_eq!(page["meta"]["total"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);

    app.server
        .get("/api/articles/9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
