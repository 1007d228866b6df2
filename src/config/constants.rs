//! Configuration constants.
//!
//! This module defines the fixed tables the extractor and resolver work from:
//! the target host set, the identity rotation list, URL shapes and timeouts.

use std::time::Duration;

// Target domain group
/// Hosts accepted as Facebook links (apex or any subdomain of these).
pub const FACEBOOK_HOSTS: &[&str] = &[
    "facebook.com",
    "fb.com",
    "fb.watch",
    "m.facebook.com",
    "www.facebook.com",
];

/// Candidate pattern for links in free-form text.
///
/// Requires a path separator after the host; the last character class excludes
/// sentence punctuation that greedy matching would otherwise swallow.
pub const FACEBOOK_LINK_PATTERN: &str = r"(?i)https?://(?:[\w-]+\.)*(?:facebook\.com|fb\.com|fb\.watch)/[\w/?=&#%:;@.,_~!+\-]*[\w/=?&#%:;@._~+\-]";

/// Characters stripped from the end of a matched link.
pub const TRAILING_PUNCTUATION: &[char] = &[')', '>', '.', ',', '!', '?', ':', ';', '\'', '"', ']'];

/// Tracking-redirect hosts that wrap the real destination in a `u` parameter.
pub const FORWARDING_HOSTS: &[&str] = &["l.facebook.com", "lm.facebook.com"];
/// Query parameter carrying the forwarded destination.
pub const FORWARDING_PARAM: &str = "u";
/// Maximum number of nested forwarding wrappers unwrapped before giving up.
pub const MAX_FORWARDING_DEPTH: usize = 5;

/// Canonical desktop host used for short-share links.
pub const DESKTOP_HOST: &str = "www.facebook.com";
/// Mobile host used for the last-resort fetch.
pub const MOBILE_HOST: &str = "m.facebook.com";
/// Hosts that the mobile rewrite applies to.
pub const MOBILE_REWRITABLE_HOSTS: &[&str] = &["www.facebook.com", "facebook.com"];

/// Short-share path shapes (`/share/<id>`, `/share/p/<id>`, ...).
pub const SHARE_PATH_PATTERN: &str = r"^/share/(?:[pvr]/)?[^/?]+";

/// Substrings of a page URL that mark it as a video page.
pub const VIDEO_PATH_MARKERS: &[&str] = &[
    "/videos/",
    "/watch/",
    "/watch?",
    "/reel/",
    "fb.watch",
    "/share/v/",
    "/share/r/",
];

/// Substrings of image URLs that point at placeholders or restricted CDN assets.
pub const RESTRICTED_IMAGE_MARKERS: &[&str] = &[
    "safe_image.php",
    "platform-lookaside.fbsbx.com",
    "/images/icons/",
    "rsrc.php",
    "static.xx.fbcdn.net/rsrc",
];

// Login wall detection
/// Final-URL substrings that indicate a redirect to the login page.
pub const LOGIN_PATH_MARKERS: &[&str] = &["/login/", "login.php"];
/// Body text served on the login interstitial.
pub const LOGIN_BODY_MARKER: &str = "Log into Facebook";
/// A login page never carries an Open Graph description; real content does.
pub const OG_DESCRIPTION_MARKER: &str = "og:description";
/// Synthetic status reported for a login wall.
pub const LOGIN_WALL_STATUS: u16 = 403;

/// Statuses that bot detection hands out per identity; rotating may get past them.
pub const IDENTITY_SENSITIVE_STATUSES: &[u16] = &[400, 401, 403, 429];

// Record defaults
/// Title used when the page declares none.
pub const PLACEHOLDER_TITLE: &str = "Facebook link";
/// Site name used when the page declares none.
pub const DEFAULT_SITE_NAME: &str = "Facebook";

// Timeouts
/// Default time budget for one page fetch attempt in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
/// Default time budget for one page fetch attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);
/// Time budget for the oEmbed probe.
pub const OEMBED_TIMEOUT: Duration = Duration::from_secs(5);
/// Public, token-free oEmbed endpoint for posts.
pub const OEMBED_ENDPOINT: &str = "https://www.facebook.com/plugins/post/oembed.json/";

/// Lower bound of the randomized pre-request delay in milliseconds.
pub const REQUEST_JITTER_MIN_MS: u64 = 300;
/// Upper bound of the randomized pre-request delay in milliseconds.
pub const REQUEST_JITTER_MAX_MS: u64 = 900;

/// Maximum number of redirect hops followed per attempt.
pub const MAX_REDIRECT_HOPS: usize = 10;

// Embed limits
/// Smallest number of embeds a message may render.
pub const MIN_EMBEDS: usize = 1;
/// Largest number of embeds a message may render.
pub const MAX_EMBEDS: usize = 5;

// Client identities
/// Chrome on Windows. Primary identity for the mobile fallback and the oEmbed probe.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Identity rotation list, tried in order until one is served real content.
pub const USER_AGENTS: &[&str] = &[
    DEFAULT_USER_AGENT,
    // Firefox desktop
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    // Chrome on Android
    "Mozilla/5.0 (Linux; Android 14; SM-S918B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Mobile Safari/537.36",
    // Safari on iPhone
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Mobile/15E148 Safari/604.1",
    // Facebook in-app browser
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 [FBAN/FBIOS;FBAV/441.0.0.34.110;FBBV/570675778;FBDV/iPhone14,2;FBMD/iPhone;FBSN/iOS;FBSV/17.1.1;FBSS/3;FBID/phone;FBLC/en_US;FBOP/5]",
];
