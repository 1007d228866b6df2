//! Host rewrites applied before and after the identity rotation.
//!
//! Both rewrites are pure URL transformations and never fail: a URL that
//! does not qualify is returned unchanged.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::config::{DESKTOP_HOST, MOBILE_HOST, MOBILE_REWRITABLE_HOSTS, SHARE_PATH_PATTERN};
use crate::utils::compile_regex;

static SHARE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(SHARE_PATH_PATTERN, "SHARE_PATH_RE"));

/// Moves short-share links (`/share/p/<id>`, `/share/v/<id>`, ...) onto the
/// canonical desktop host, keeping path and query.
///
/// # Examples
///
/// ```
/// use fb_link_preview::canonicalize_share_url;
/// use url::Url;
///
/// let url = Url::parse("https://m.facebook.com/share/p/1AbC/?mibextid=x").unwrap();
/// assert_eq!(
///     canonicalize_share_url(&url).as_str(),
///     "https://www.facebook.com/share/p/1AbC/?mibextid=x"
/// );
/// ```
pub fn canonicalize_share_url(url: &Url) -> Url {
    if !SHARE_PATH_RE.is_match(url.path()) {
        return url.clone();
    }
    with_host(url, DESKTOP_HOST)
}

/// Rewrites a desktop link onto the mobile host.
///
/// Only the desktop hosts are rewritten; anything else (already mobile,
/// `fb.watch`, ...) comes back unchanged, which callers use to skip the
/// mobile retry.
pub fn to_mobile_url(url: &Url) -> Url {
    match url.host_str() {
        Some(host) if MOBILE_REWRITABLE_HOSTS.contains(&host) => with_host(url, MOBILE_HOST),
        _ => url.clone(),
    }
}

fn with_host(url: &Url, host: &str) -> Url {
    let mut rewritten = url.clone();
    match rewritten.set_host(Some(host)) {
        Ok(()) => rewritten,
        Err(e) => {
            log::debug!("Could not move {} to host {}: {}", url, host, e);
            url.clone()
        }
    }
}
