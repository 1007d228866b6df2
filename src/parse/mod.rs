//! HTML parsing and metadata extraction.
//!
//! This module turns a fetched page into a [`MetadataRecord`]:
//! - Declared metadata (Open Graph, Twitter Cards, `<title>`, meta description)
//! - Content-derived fallbacks for restricted or missing images and videos
//! - The video-page heuristic
//!
//! Parsing never fails. Anything that cannot be found or parsed is left absent.

mod fallback;
mod meta;

use scraper::Html;
use url::Url;

use crate::config::{DEFAULT_SITE_NAME, PLACEHOLDER_TITLE, VIDEO_PATH_MARKERS};
use crate::models::MetadataRecord;

// Re-export public API
pub use fallback::{
    extract_fallback_image, extract_fallback_thumbnail, extract_fallback_video,
    is_restricted_image,
};
pub use meta::{clean_text, resolve_to_absolute};

/// Returns true if the page URL has one of the known video shapes
/// (`/videos/`, `/watch`, `/reel/`, `fb.watch`, video share links).
pub fn is_video_url(page_url: &str) -> bool {
    VIDEO_PATH_MARKERS
        .iter()
        .any(|marker| page_url.contains(marker))
}

/// Parses an HTML document into a metadata record for `page_url`.
///
/// Relative image and video references are resolved against `page_url`.
///
/// # Examples
///
/// ```
/// use fb_link_preview::parse_document;
/// use url::Url;
///
/// let page = Url::parse("https://www.facebook.com/watch?v=123").unwrap();
/// let record = parse_document(r#"<meta property="og:title" content="  A   clip ">"#, &page);
/// assert_eq!(record.title, "A clip");
/// assert!(record.is_video);
/// ```
pub fn parse_document(html: &str, page_url: &Url) -> MetadataRecord {
    let document = Html::parse_document(html);

    let title = meta::first_meta_text(&document, &meta::TITLE)
        .or_else(|| meta::document_title(&document))
        .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());
    let description = meta::first_meta_text(&document, &meta::DESCRIPTION);
    let site_name = meta::first_meta_text(&document, &meta::SITE_NAME)
        .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string());
    let content_type = meta::first_meta_text(&document, &meta::CONTENT_TYPE);

    let mut image = meta::first_meta(&document, &meta::IMAGE)
        .and_then(|candidate| resolve_to_absolute(&candidate, page_url));
    if image.as_deref().map_or(true, is_restricted_image) {
        if let Some(recovered) = extract_fallback_image(&document, page_url) {
            log::debug!("Replaced missing or restricted image for {}", page_url);
            image = Some(recovered);
        }
    }

    let mut video = meta::first_meta(&document, &meta::VIDEO)
        .and_then(|candidate| resolve_to_absolute(&candidate, page_url));
    let video_width = meta::first_meta_dimension(&document, &meta::VIDEO_WIDTH);
    let video_height = meta::first_meta_dimension(&document, &meta::VIDEO_HEIGHT);
    let video_type = meta::first_meta_text(&document, &meta::VIDEO_TYPE);

    // og:type alone is not trusted: Facebook labels plenty of non-video posts video.other
    let is_video = video.is_some() || is_video_url(page_url.as_str());

    if is_video && video.is_none() {
        video = extract_fallback_video(&document)
            .and_then(|candidate| resolve_to_absolute(&candidate, page_url));
    }

    if is_video && image.is_none() {
        image = extract_fallback_thumbnail(&document)
            .and_then(|candidate| resolve_to_absolute(&candidate, page_url));
    }

    MetadataRecord {
        url: page_url.to_string(),
        title,
        description,
        site_name,
        content_type,
        image,
        video,
        video_width,
        video_height,
        video_type,
        is_video,
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
