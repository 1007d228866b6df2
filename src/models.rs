use std::fmt;

use serde::Serialize;
use url::Url;

/// A normalized Facebook link: absolute, fragment-free, forwarding wrappers
/// unwrapped and host inside the target domain group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    pub(crate) fn new(url: Url) -> Self {
        CanonicalUrl(url)
    }

    /// The serialized URL.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Host name, e.g. `www.facebook.com`.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Borrows the parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Unwraps the parsed URL.
    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Preview metadata for one link, ready to be rendered as a chat embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    /// Page URL the metadata came from (after share-link or mobile rewrites)
    pub url: String,
    /// Never empty; falls back to a placeholder
    pub title: String,
    /// Declared description; never placeholder text
    pub description: Option<String>,
    /// Declared site name, defaults to `Facebook`
    pub site_name: String,
    /// Declared Open Graph type, e.g. `video.other`
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Absolute image URL
    pub image: Option<String>,
    /// Absolute video URL
    pub video: Option<String>,
    /// Declared video width in pixels
    pub video_width: Option<u32>,
    /// Declared video height in pixels
    pub video_height: Option<u32>,
    /// Declared video MIME type
    pub video_type: Option<String>,
    /// Heuristic: a video URL was found or the page URL has a video shape
    pub is_video: bool,
}
