//! RSS 2.0 document parser.

use ::rss::{Channel, Item};

use crate::rss::types::{FeedDocument, FeedItem};
use crate::{Result, VukaError};

/// Decode an RSS 2.0 document.
///
/// Fails with [`VukaError::Parse`] if the bytes are not well-formed XML or
/// lack the `<rss><channel>` structure.
pub fn parse_feed(bytes: &[u8]) -> Result<FeedDocument> {
    let channel = Channel::read_from(bytes)
        .map_err(|e| VukaError::Parse(format!("failed to parse feed: {}", e)))?;

    let language = channel
        .language()
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);

    Ok(FeedDocument {
        title: channel.title().to_string(),
        description: channel.description().to_string(),
        language,
        items: channel.items().iter().map(to_feed_item).collect(),
    })
}

fn to_feed_item(item: &Item) -> FeedItem {
    let text = |value: Option<&str>| value.unwrap_or_default().to_string();

    FeedItem {
        title: text(item.title()),
        link: text(item.link()).trim().to_string(),
        description: text(item.description()),
        guid: text(item.guid().map(|g| g.value())),
        author: text(item.author()),
        pub_date: text(item.pub_date()).trim().to_string(),
        categories: item
            .categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect(),
        content: item
            .content()
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string),
    }
}
