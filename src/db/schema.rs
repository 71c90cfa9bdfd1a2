//! Database schema and migrations for Vuka.
//!
//! Migrations are applied in order when the database is opened; the
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Content sources
    r#"
CREATE TABLE sources (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    website_url     TEXT NOT NULL DEFAULT '',
    rss_feed_url    TEXT NOT NULL DEFAULT '',   -- empty: not ingested
    created_at      TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at      TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (name, website_url)
);
"#,
    // v2: Articles and their images
    r#"
CREATE TABLE articles (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title           TEXT NOT NULL,
    language        TEXT NOT NULL,
    original_url    TEXT NOT NULL UNIQUE,       -- dedup key
    summary         TEXT NOT NULL DEFAULT '',
    content_body    TEXT NOT NULL DEFAULT '',
    published_at    TEXT NOT NULL,              -- RFC 3339 with original offset
    is_featured     INTEGER NOT NULL DEFAULT 0,
    source_id       INTEGER REFERENCES sources(id) ON DELETE SET NULL,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_articles_source_id ON articles(source_id);
CREATE INDEX idx_articles_published_at ON articles(published_at);

CREATE TABLE article_images (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id      INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    position        INTEGER NOT NULL,
    url             TEXT NOT NULL,
    alt_text        TEXT NOT NULL DEFAULT '',
    is_main         INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_article_images_article_id ON article_images(article_id);
"#,
    // v3: Grouped categories per article
    r#"
CREATE TABLE article_categories (
    article_id      INTEGER NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    name            TEXT NOT NULL,
    PRIMARY KEY (article_id, name)
);
"#,
];
