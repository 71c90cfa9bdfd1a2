//! Conversion of feed items into candidate articles.

use chrono::{DateTime, FixedOffset};
use regex::Regex;

use crate::article::NewArticle;
use crate::rss::category::map_categories;
use crate::rss::images::extract_images;
use crate::rss::types::{FeedItem, PUB_DATE_FORMAT};
use crate::{Result, VukaError};

/// Maps [`FeedItem`]s to [`NewArticle`]s.
#[derive(Debug, Clone)]
pub struct ArticleMapper {
    img_tag: Regex,
}

impl ArticleMapper {
    /// Create a new mapper.
    pub fn new() -> Result<Self> {
        let img_tag = Regex::new(r"(?i)<img[^>]*>")
            .map_err(|e| VukaError::Parse(format!("invalid image pattern: {}", e)))?;
        Ok(Self { img_tag })
    }

    /// Build a candidate article from one feed item.
    ///
    /// Fails with [`VukaError::DateParse`] if the publish date is missing or
    /// not in RFC 1123 form with a numeric zone. The article carries no
    /// source; the caller attaches one.
    pub fn to_article(&self, item: &FeedItem, language: &str) -> Result<NewArticle> {
        let published_at = parse_pub_date(&item.pub_date)?;
        let images = extract_images(&item.description)?;
        let summary = self.strip_images(&item.description);

        let content_body = match item.content.as_deref() {
            Some(content) if !content.trim().is_empty() => content.to_string(),
            _ => item.description.clone(),
        };

        Ok(NewArticle {
            title: item.title.clone(),
            language: language.to_string(),
            original_url: item.link.clone(),
            summary,
            content_body,
            published_at,
            is_featured: false,
            source_id: None,
            images,
            categories: map_categories(&item.categories),
        })
    }

    /// Remove every `<img ...>` tag, leaving all other text untouched.
    pub fn strip_images(&self, html: &str) -> String {
        self.img_tag.replace_all(html, "").into_owned()
    }
}

/// Parse an RSS `pubDate` such as `Mon, 02 Jan 2006 15:04:05 -0700`.
///
/// The offset is preserved.
pub fn parse_pub_date(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value.trim(), PUB_DATE_FORMAT).map_err(|e| VukaError::DateParse {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rss::types::ExtractedImage;

    fn mapper() -> ArticleMapper {
        ArticleMapper::new().unwrap()
    }

    #[test]
    fn test_worked_example() {
        let item = FeedItem::new("Hello", "https://news.example/hello")
            .with_description(r#"<p>hi</p><img src="a.jpg" alt="A"><img src="b.jpg">"#)
            .with_pub_date("Mon, 02 Jan 2006 15:04:05 -0700");

        let article = mapper().to_article(&item, "en").unwrap();

        assert_eq!(article.title, "Hello");
        assert_eq!(article.original_url, "https://news.example/hello");
        assert_eq!(article.summary, "<p>hi</p>");
        assert_eq!(
            article.images,
            vec![
                ExtractedImage::new("a.jpg", "A", true),
                ExtractedImage::new("b.jpg", "", false),
            ]
        );
        assert_eq!(article.published_at.to_rfc3339(), "2006-01-02T15:04:05-07:00");
        assert_eq!(article.content_body, item.description);
        assert!(!article.is_featured);
        assert_eq!(article.language, "en");
        assert!(article.source_id.is_none());
    }

    #[test]
    fn test_single_quoted_absolute_sources() {
        let item = FeedItem::new("Hello", "https://x/hello")
            .with_description("<p>hi</p><img src='https://x/a.jpg'><img src='https://x/b.jpg'>")
            .with_pub_date("Mon, 02 Jan 2006 15:04:05 -0700");

        let article = mapper().to_article(&item, "en").unwrap();

        assert_eq!(article.summary, "<p>hi</p>");
        assert_eq!(
            article.images,
            vec![
                ExtractedImage::new("https://x/a.jpg", "", true),
                ExtractedImage::new("https://x/b.jpg", "", false),
            ]
        );
        assert_eq!(article.published_at.to_rfc3339(), "2006-01-02T15:04:05-07:00");
    }

    #[test]
    fn test_summary_preserves_other_text() {
        let html = r#"Before <IMG SRC="x.png"/> middle <b>bold</b><img alt="no src"> after"#;
        let stripped = mapper().strip_images(html);

        assert_eq!(stripped, "Before  middle <b>bold</b> after");
        assert!(!stripped.to_lowercase().contains("<img"));
    }

    #[test]
    fn test_content_prefers_rendered_body() {
        let item = FeedItem::new("t", "https://n.example/1")
            .with_description("<p>short</p>")
            .with_content("<p>long form</p>")
            .with_pub_date("Tue, 10 Jun 2025 09:00:00 +0200");

        let article = mapper().to_article(&item, "en").unwrap();
        assert_eq!(article.content_body, "<p>long form</p>");
        assert_eq!(article.summary, "<p>short</p>");
    }

    #[test]
    fn test_categories_mapped() {
        let item = FeedItem::new("t", "https://n.example/2")
            .with_pub_date("Tue, 10 Jun 2025 09:00:00 +0000")
            .with_category("Cricket")
            .with_category("Elections");

        let article = mapper().to_article(&item, "zu").unwrap();
        assert_eq!(article.categories, vec!["Sports", "Politics"]);
        assert_eq!(article.language, "zu");
    }

    #[test]
    fn test_bad_pub_date() {
        let item = FeedItem::new("t", "https://n.example/3").with_pub_date("yesterday");

        let err = mapper().to_article(&item, "en").unwrap_err();
        assert!(matches!(err, VukaError::DateParse { ref value, .. } if value == "yesterday"));
    }

    #[test]
    fn test_missing_pub_date() {
        let item = FeedItem::new("t", "https://n.example/4");
        assert!(matches!(
            mapper().to_article(&item, "en"),
            Err(VukaError::DateParse { .. })
        ));
    }

    #[test]
    fn test_named_zone_rejected() {
        assert!(parse_pub_date("Mon, 02 Jan 2006 15:04:05 GMT").is_err());
        assert!(parse_pub_date("Mon, 02 Jan 2006 15:04:05 +0000").is_ok());
    }
}
