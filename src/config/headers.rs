//! Browser-shaped request headers.
//!
//! Facebook's bot detection scores header sets as well as the User-Agent, so
//! every page request carries the headers a desktop Chrome navigation sends.

use reqwest::header::{HeaderName, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, USER_AGENT};
use reqwest::RequestBuilder;

/// Accept header of a top-level document navigation.
pub const DOCUMENT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
/// Accept header for the oEmbed probe.
pub const JSON_ACCEPT: &str = "application/json";
/// Accept-Language sent with every request.
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9,zh-TW;q=0.8,zh;q=0.7";

/// Client-hint and fetch-metadata headers of a Chrome navigation.
const NAVIGATION_HEADERS: &[(&str, &str)] = &[
    (
        "sec-ch-ua",
        "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("upgrade-insecure-requests", "1"),
];

/// Applies the document request headers and the given identity to a request.
///
/// Accept-Encoding is left to reqwest, which only advertises the encodings it
/// can decode.
pub(crate) fn apply_document_headers(builder: RequestBuilder, user_agent: &str) -> RequestBuilder {
    let builder = builder
        .header(USER_AGENT, user_agent)
        .header(ACCEPT, DOCUMENT_ACCEPT)
        .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache");

    NAVIGATION_HEADERS
        .iter()
        .fold(builder, |builder, &(name, value)| {
            builder.header(HeaderName::from_static(name), value)
        })
}

/// Applies the headers used for the oEmbed JSON probe.
pub(crate) fn apply_json_headers(builder: RequestBuilder, user_agent: &str) -> RequestBuilder {
    builder
        .header(USER_AGENT, user_agent)
        .header(ACCEPT, JSON_ACCEPT)
        .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_VALUE)
}
