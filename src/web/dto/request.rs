//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{no_control_chars, not_empty_trimmed};
use crate::source::{NewSource, SourceUpdate};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page size a client may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination query parameters (`?page=&per_page=`).
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    /// One-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationQuery {
    /// Clamp the values into range.
    pub fn normalized(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL offset and limit for this page.
    pub fn to_offset_limit(&self) -> (i64, i64) {
        let p = self.normalized();
        (
            (p.page as i64 - 1) * p.per_page as i64,
            p.per_page as i64,
        )
    }
}

/// Source registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSourceRequest {
    /// Display name.
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub name: String,
    /// Outlet homepage.
    #[serde(default)]
    #[validate(url(message = "Must be a valid URL"))]
    pub website_url: Option<String>,
    /// RSS feed URL.
    #[serde(default)]
    #[validate(url(message = "Must be a valid URL"))]
    pub rss_feed_url: Option<String>,
}

impl CreateSourceRequest {
    /// Convert into a repository value.
    pub fn into_new_source(self) -> NewSource {
        let mut source = NewSource::new(self.name.trim());
        if let Some(url) = self.website_url {
            source = source.with_website_url(url.trim());
        }
        if let Some(url) = self.rss_feed_url {
            source = source.with_rss_feed_url(url.trim());
        }
        source
    }
}

/// Partial source update.
///
/// Only the listed fields can change; any other key is rejected. An empty
/// `rss_feed_url` clears the feed.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateSourceRequest {
    /// New display name.
    #[validate(
        length(min = 1, max = 200, message = "Name must be 1-200 characters"),
        custom(function = "not_empty_trimmed"),
        custom(function = "no_control_chars")
    )]
    pub name: Option<String>,
    /// New homepage.
    #[validate(custom(function = "empty_or_url"))]
    pub website_url: Option<String>,
    /// New feed URL.
    #[validate(custom(function = "empty_or_url"))]
    pub rss_feed_url: Option<String>,
}

impl UpdateSourceRequest {
    /// Convert into a repository value.
    pub fn into_update(self) -> SourceUpdate {
        SourceUpdate {
            name: self.name.map(|n| n.trim().to_string()),
            website_url: self.website_url.map(|u| u.trim().to_string()),
            rss_feed_url: self.rss_feed_url.map(|u| u.trim().to_string()),
        }
    }
}

fn empty_or_url(value: &str) -> Result<(), validator::ValidationError> {
    let value = value.trim();
    if value.is_empty() || url::Url::parse(value).is_ok() {
        return Ok(());
    }
    Err(validator::ValidationError::new("url").with_message("Must be a valid URL".into()))
}
