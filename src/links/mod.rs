//! Facebook link extraction and normalization.
//!
//! Scans free-form message text for links into the Facebook domain group,
//! unwraps tracking redirects, validates the host and drops duplicates while
//! keeping first-seen order. Nothing here errors: malformed candidates are
//! silently skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use url::Url;

use crate::config::{
    FACEBOOK_HOSTS, FACEBOOK_LINK_PATTERN, FORWARDING_HOSTS, FORWARDING_PARAM,
    MAX_FORWARDING_DEPTH, TRAILING_PUNCTUATION,
};
use crate::models::CanonicalUrl;
use crate::utils::compile_regex;

/// Trim-and-normalize rounds before a candidate is considered unstable.
const MAX_SETTLE_PASSES: usize = 4;

static FACEBOOK_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(FACEBOOK_LINK_PATTERN, "FACEBOOK_LINK_RE"));

/// Extracts canonical Facebook links from arbitrary text.
///
/// Candidates are matched greedily, trailing punctuation is stripped, each
/// candidate is normalized with [`normalize_facebook_url`] and exact duplicates
/// (after normalization) are dropped. Order follows first occurrence.
///
/// # Examples
///
/// ```
/// use fb_link_preview::extract_links;
///
/// let links = extract_links("see https://www.facebook.com/watch?v=123#t=5, and again https://www.facebook.com/watch?v=123");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://www.facebook.com/watch?v=123");
/// ```
pub fn extract_links(text: &str) -> Vec<CanonicalUrl> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for candidate in FACEBOOK_LINK_RE.find_iter(text) {
        let Some(link) = settle_candidate(candidate.as_str()) else {
            debug!("Dropping unusable link candidate: {}", candidate.as_str());
            continue;
        };
        if seen.insert(link.as_str().to_string()) {
            links.push(link);
        }
    }

    links
}

/// Trims and normalizes a matched candidate until its serialized form no
/// longer ends in punctuation.
///
/// Normalization can expose new trailing punctuation (`/x?#frag` becomes
/// `/x?`, `/a.#b` becomes `/a.`), which a later extraction would strip.
fn settle_candidate(matched: &str) -> Option<CanonicalUrl> {
    let mut candidate = matched.trim_end_matches(TRAILING_PUNCTUATION).to_string();

    for _ in 0..MAX_SETTLE_PASSES {
        let link = normalize_facebook_url(&candidate)?;
        let trimmed = link.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        if trimmed.len() == link.as_str().len() {
            return Some(link);
        }
        candidate = trimmed.to_string();
    }
    None
}

/// Normalizes one candidate link.
///
/// Forwarding wrappers (`l.facebook.com/l.php?u=...`) are unwrapped up to
/// [`MAX_FORWARDING_DEPTH`] times; a forwarding host without a `u` parameter
/// is an ordinary Facebook link. Returns `None` when the candidate (or a
/// forwarded destination) does not parse, is not http(s) or ends outside the
/// Facebook domain group. The fragment is removed.
pub fn normalize_facebook_url(raw: &str) -> Option<CanonicalUrl> {
    let mut candidate = raw.to_string();

    for _ in 0..=MAX_FORWARDING_DEPTH {
        let mut parsed = Url::parse(&candidate).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }

        let host = parsed.host_str()?;
        if FORWARDING_HOSTS.contains(&host) {
            if let Some(destination) = forwarded_destination(&parsed) {
                candidate = destination;
                continue;
            }
        }

        if !is_facebook_host(host) {
            return None;
        }

        parsed.set_fragment(None);
        return Some(CanonicalUrl::new(parsed));
    }

    debug!(
        "Forwarding chain deeper than {} hops, dropping: {}",
        MAX_FORWARDING_DEPTH, raw
    );
    None
}

/// Returns true if `host` is one of the target hosts or a subdomain of one.
pub fn is_facebook_host(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    FACEBOOK_HOSTS
        .iter()
        .any(|target| host == *target || host.ends_with(&format!(".{}", target)))
}

/// Reads the destination out of a forwarding wrapper.
///
/// The query parser decodes the parameter once; wrappers are often
/// double-encoded, so a second percent-decode is applied when it succeeds.
fn forwarded_destination(wrapper: &Url) -> Option<String> {
    let (_, forwarded) = wrapper
        .query_pairs()
        .find(|(name, _)| name == FORWARDING_PARAM)?;

    match urlencoding::decode(&forwarded) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(forwarded.into_owned()),
    }
}
