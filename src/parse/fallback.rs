//! Content-derived extraction.
//!
//! Facebook often serves a placeholder `og:image` (or none at all) to clients
//! it suspects are bots, and rarely declares a playable video URL. The real
//! URLs still appear in the page body: in JSON-LD blocks, in lazily loaded
//! `<img>` elements and as escaped string literals inside inline scripts.
//! Everything here is heuristic and best-effort; a miss returns `None`.

use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::config::RESTRICTED_IMAGE_MARKERS;
use crate::parse::meta::resolve_to_absolute;
use crate::utils::{compile_regex, compile_selector};

/// CDN host prefix of user content (photos, video frames, videos).
const CONTENT_CDN_MARKER: &str = "scontent";

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    compile_selector(r#"script[type="application/ld+json"]"#, "JSON_LD_SELECTOR")
});
static CDN_IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    compile_selector(r#"img[data-src], img[src*="scontent"]"#, "CDN_IMG_SELECTOR")
});
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| compile_selector("script", "SCRIPT_SELECTOR"));

// Escaped URL literals as they appear inside JSON embedded in scripts:
// `https:\/\/scontent.xx.fbcdn.net\/v\/...jpg?stp=...&oh=...`
static SCRIPT_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#"(?i)https?:\\/\\/scontent(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*?\.(?:jpg|jpeg|png|webp)(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*"#,
        "SCRIPT_IMAGE_RE",
    )
});

static SCRIPT_VIDEO_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Video CDN hosts
        r#"(?i)https?:\\/\\/video(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*?\.mp4(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*"#,
        // User content CDN
        r#"(?i)https?:\\/\\/scontent(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*?\.mp4(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*"#,
        // Any fbcdn host
        r#"(?i)https?:\\/\\/(?:[^"'\\\s/]|\\u00[0-9a-f]{2})*fbcdn(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*?\.mp4(?:[^"'\\\s]|\\/|\\u00[0-9a-f]{2})*"#,
    ]
    .iter()
    .map(|pattern| compile_regex(pattern, "SCRIPT_VIDEO_RES"))
    .collect()
});

static VIDEO_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#""(?:playable_url|video_url|browser_native_hd_url|browser_native_sd_url)":"([^"]+)""#,
        "VIDEO_FIELD_RE",
    )
});

static THUMBNAIL_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#""(?:thumbnailImage|preferred_thumbnail)":\{(?:"image":\{)?"uri":"([^"]+)""#,
        "THUMBNAIL_FIELD_RE",
    )
});

static UNICODE_ESCAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"\\u([0-9a-fA-F]{4})", "UNICODE_ESCAPE_RE"));

/// Returns true if the image URL points at a placeholder or restricted asset.
pub fn is_restricted_image(image_url: &str) -> bool {
    RESTRICTED_IMAGE_MARKERS
        .iter()
        .any(|marker| image_url.contains(marker))
}

/// Recovers an image URL from page content.
///
/// Tries, in order: JSON-LD `image`/`thumbnailUrl`, CDN-hosted `<img>`
/// elements, then escaped CDN image literals in inline scripts.
pub fn extract_fallback_image(document: &Html, page_url: &Url) -> Option<String> {
    image_from_json_ld(document, page_url)
        .or_else(|| image_from_img_elements(document, page_url))
        .or_else(|| image_from_scripts(document))
}

/// Recovers a playable video URL from inline scripts.
///
/// Each script is scanned for escaped `.mp4` literals on the video, content
/// and generic fbcdn hosts, then for the JSON fields Facebook uses for
/// playable sources. The first script that yields a URL wins.
pub fn extract_fallback_video(document: &Html) -> Option<String> {
    for script in document.select(&SCRIPT_SELECTOR) {
        let content = script.text().collect::<String>();
        if content.is_empty() {
            continue;
        }

        for pattern in SCRIPT_VIDEO_RES.iter() {
            if let Some(found) = pattern.find(&content) {
                return Some(unescape_script_url(found.as_str()));
            }
        }

        if let Some(caps) = VIDEO_FIELD_RE.captures(&content) {
            return Some(unescape_script_url(&caps[1]));
        }
    }
    None
}

/// Recovers a video thumbnail from the player's preloaded data.
pub fn extract_fallback_thumbnail(document: &Html) -> Option<String> {
    document.select(&SCRIPT_SELECTOR).find_map(|script| {
        let content = script.text().collect::<String>();
        THUMBNAIL_FIELD_RE
            .captures_iter(&content)
            .map(|caps| unescape_script_url(&caps[1]))
            .find(|url| !is_restricted_image(url))
    })
}

fn image_from_json_ld(document: &Html, page_url: &Url) -> Option<String> {
    for script in document.select(&JSON_LD_SELECTOR) {
        let text = script.text().collect::<String>();
        let json: Value = match serde_json::from_str(text.trim()) {
            Ok(json) => json,
            Err(e) => {
                debug!("Skipping unparsable JSON-LD block: {}", e);
                continue;
            }
        };

        let found = json_ld_nodes(&json).into_iter().find_map(json_ld_image);
        if let Some(image) = found.and_then(|image| resolve_to_absolute(&image, page_url)) {
            return Some(image);
        }
    }
    None
}

/// Flattens a JSON-LD payload into its top-level nodes (arrays and `@graph`).
fn json_ld_nodes(json: &Value) -> Vec<&Value> {
    match json {
        Value::Array(items) => items.iter().flat_map(json_ld_nodes).collect(),
        Value::Object(map) => match map.get("@graph") {
            Some(graph) => std::iter::once(json).chain(json_ld_nodes(graph)).collect(),
            None => vec![json],
        },
        _ => Vec::new(),
    }
}

fn json_ld_image(node: &Value) -> Option<String> {
    let image = node.get("image").and_then(|image| {
        let first = match image {
            Value::Array(items) => items.first()?,
            other => other,
        };
        match first {
            Value::String(url) => Some(url.clone()),
            Value::Object(map) => map.get("url").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    });

    image.or_else(|| {
        let thumbnail = node.get("thumbnailUrl")?;
        match thumbnail {
            Value::String(url) => Some(url.clone()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    })
}

fn image_from_img_elements(document: &Html, page_url: &Url) -> Option<String> {
    document.select(&CDN_IMG_SELECTOR).find_map(|img| {
        let element = img.value();
        let src = element.attr("data-src").or_else(|| element.attr("src"))?;
        if src.contains(CONTENT_CDN_MARKER) && !is_restricted_image(src) {
            resolve_to_absolute(src, page_url)
        } else {
            None
        }
    })
}

fn image_from_scripts(document: &Html) -> Option<String> {
    document.select(&SCRIPT_SELECTOR).find_map(|script| {
        let content = script.text().collect::<String>();
        SCRIPT_IMAGE_RE
            .find_iter(&content)
            .map(|found| unescape_script_url(found.as_str()))
            .find(|url| !is_restricted_image(url))
    })
}

/// Undoes JSON string escaping of a URL literal (`\/` and `\uXXXX`).
pub(crate) fn unescape_script_url(raw: &str) -> String {
    let unslashed = raw.replace("\\/", "/");
    UNICODE_ESCAPE_RE
        .replace_all(&unslashed, |caps: &Captures| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
