//! Declared metadata extraction.
//!
//! Reads Open Graph, Twitter Card and plain meta tags through ordered
//! candidate tables; the first candidate with a non-blank value wins.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::utils::compile_selector;

/// A compiled candidate: which elements to look at and which attribute to read.
pub(crate) struct MetaCandidate {
    selector: Selector,
    attr: &'static str,
}

fn compile_candidates(table: &[(&str, &'static str)], context: &str) -> Vec<MetaCandidate> {
    table
        .iter()
        .map(|&(selector, attr)| MetaCandidate {
            selector: compile_selector(selector, context),
            attr,
        })
        .collect()
}

const TITLE_CANDIDATES: &[(&str, &str)] = &[
    (r#"meta[property="og:title"]"#, "content"),
    (r#"meta[name="og:title"]"#, "content"),
    (r#"meta[property="twitter:title"]"#, "content"),
    (r#"meta[name="twitter:title"]"#, "content"),
];

const DESCRIPTION_CANDIDATES: &[(&str, &str)] = &[
    (r#"meta[property="og:description"]"#, "content"),
    (r#"meta[name="og:description"]"#, "content"),
    (r#"meta[name="description"]"#, "content"),
    (r#"meta[property="twitter:description"]"#, "content"),
    (r#"meta[name="twitter:description"]"#, "content"),
];

const SITE_NAME_CANDIDATES: &[(&str, &str)] = &[
    (r#"meta[property="og:site_name"]"#, "content"),
    (r#"meta[name="og:site_name"]"#, "content"),
];

const TYPE_CANDIDATES: &[(&str, &str)] = &[(r#"meta[property="og:type"]"#, "content")];

const IMAGE_CANDIDATES: &[(&str, &str)] = &[
    (r#"meta[property="og:image:secure_url"]"#, "content"),
    (r#"meta[property="og:image:url"]"#, "content"),
    (r#"meta[property="og:image"]"#, "content"),
    (r#"meta[name="og:image"]"#, "content"),
    (r#"meta[property="twitter:image"]"#, "content"),
    (r#"meta[name="twitter:image"]"#, "content"),
    (r#"meta[property="twitter:image:src"]"#, "content"),
    (r#"meta[name="twitter:image:src"]"#, "content"),
    (r#"link[rel="image_src"]"#, "href"),
];

const VIDEO_CANDIDATES: &[(&str, &str)] = &[
    (r#"meta[property="og:video:secure_url"]"#, "content"),
    (r#"meta[property="og:video:url"]"#, "content"),
    (r#"meta[property="og:video"]"#, "content"),
    (r#"meta[name="twitter:player:stream"]"#, "content"),
];

const VIDEO_WIDTH_CANDIDATES: &[(&str, &str)] = &[(r#"meta[property="og:video:width"]"#, "content")];
const VIDEO_HEIGHT_CANDIDATES: &[(&str, &str)] =
    &[(r#"meta[property="og:video:height"]"#, "content")];
const VIDEO_TYPE_CANDIDATES: &[(&str, &str)] = &[(r#"meta[property="og:video:type"]"#, "content")];

pub(crate) static TITLE: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(TITLE_CANDIDATES, "TITLE"));
pub(crate) static DESCRIPTION: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(DESCRIPTION_CANDIDATES, "DESCRIPTION"));
pub(crate) static SITE_NAME: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(SITE_NAME_CANDIDATES, "SITE_NAME"));
pub(crate) static CONTENT_TYPE: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(TYPE_CANDIDATES, "CONTENT_TYPE"));
pub(crate) static IMAGE: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(IMAGE_CANDIDATES, "IMAGE"));
pub(crate) static VIDEO: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(VIDEO_CANDIDATES, "VIDEO"));
pub(crate) static VIDEO_WIDTH: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(VIDEO_WIDTH_CANDIDATES, "VIDEO_WIDTH"));
pub(crate) static VIDEO_HEIGHT: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(VIDEO_HEIGHT_CANDIDATES, "VIDEO_HEIGHT"));
pub(crate) static VIDEO_TYPE: LazyLock<Vec<MetaCandidate>> =
    LazyLock::new(|| compile_candidates(VIDEO_TYPE_CANDIDATES, "VIDEO_TYPE"));

static TITLE_ELEMENT: LazyLock<Selector> =
    LazyLock::new(|| compile_selector("title", "TITLE_ELEMENT"));

/// Returns the first non-blank value among the candidates, in table order.
pub(crate) fn first_meta(document: &Html, candidates: &[MetaCandidate]) -> Option<String> {
    candidates.iter().find_map(|candidate| {
        document
            .select(&candidate.selector)
            .filter_map(|element| element.value().attr(candidate.attr))
            .find(|value| !value.trim().is_empty())
            .map(str::to_string)
    })
}

/// Like [`first_meta`], whitespace-collapsed, `None` when blank.
pub(crate) fn first_meta_text(document: &Html, candidates: &[MetaCandidate]) -> Option<String> {
    first_meta(document, candidates)
        .map(|value| clean_text(&value))
        .filter(|value| !value.is_empty())
}

/// Text of the first `<title>` element, whitespace-collapsed.
pub(crate) fn document_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_ELEMENT)
        .next()
        .map(|element| clean_text(&element.text().collect::<String>()))
        .filter(|title| !title.is_empty())
}

/// Reads a positive integer dimension; zero or garbage is treated as absent.
pub(crate) fn first_meta_dimension(document: &Html, candidates: &[MetaCandidate]) -> Option<u32> {
    first_meta(document, candidates)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|&n| n > 0)
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn clean_text(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves a possibly relative reference against the page URL.
pub fn resolve_to_absolute(candidate: &str, base: &Url) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    base.join(candidate).ok().map(|url| url.to_string())
}
