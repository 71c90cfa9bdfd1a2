//! Image extraction from item HTML.

use scraper::{Html, Selector};

use crate::rss::types::ExtractedImage;
use crate::{Result, VukaError};

/// Collect the `<img>` elements of an HTML fragment in document order.
///
/// Images without a `src` are skipped. The first kept image is the main
/// one. Empty input yields an empty list.
pub fn extract_images(html: &str) -> Result<Vec<ExtractedImage>> {
    if html.trim().is_empty() {
        return Ok(Vec::new());
    }

    let selector = Selector::parse("img")
        .map_err(|e| VukaError::Parse(format!("invalid image selector: {}", e)))?;
    let fragment = Html::parse_fragment(html);

    let images = fragment
        .select(&selector)
        .filter_map(|img| {
            let element = img.value();
            let src = element.attr("src").map(str::trim).unwrap_or_default();
            if src.is_empty() {
                return None;
            }
            Some((src.to_string(), element.attr("alt").unwrap_or_default().to_string()))
        })
        .enumerate()
        .map(|(index, (url, alt_text))| ExtractedImage::new(url, alt_text, index == 0))
        .collect();

    Ok(images)
}
