// Shared test helpers for resolver tests against a mock server.
//
// The resolver's client pins the Facebook hosts to the mock server's address,
// so URLs keep their real host names (and host rewrites stay observable)
// while every request lands on the local server.

use std::time::Duration;

use httptest::Server;

use fb_link_preview::initialization::client_builder;
use fb_link_preview::{Resolver, ResolverConfig};

/// Configuration for tests: no jitter, no oEmbed probe, short budget.
#[allow(dead_code)] // Used by other test files
pub fn test_config() -> ResolverConfig {
    ResolverConfig {
        timeout: Duration::from_secs(5),
        oembed_endpoint: None,
        request_jitter_ms: None,
        ..Default::default()
    }
}

/// Builds a resolver whose client sends every Facebook host to `server`.
#[allow(dead_code)]
pub fn resolver_for(server: &Server, config: ResolverConfig) -> Resolver {
    let addr = server.addr();
    let client = client_builder(&config)
        .resolve("www.facebook.com", addr)
        .resolve("m.facebook.com", addr)
        .resolve("facebook.com", addr)
        .build()
        .expect("Failed to create HTTP client");
    Resolver::with_client(client, config)
}

/// URL on `host` served by the mock server.
#[allow(dead_code)]
pub fn facebook_url(server: &Server, host: &str, path: &str) -> String {
    format!("http://{}:{}{}", host, server.addr().port(), path)
}

/// Minimal post page with Open Graph title and description.
#[allow(dead_code)]
pub fn post_page(title: &str, description: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head>
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:site_name" content="Facebook">
<meta property="og:image" content="https://scontent.xx.fbcdn.net/v/t39/1_n.jpg">
<title>{title} | Facebook</title>
</head><body></body></html>"#
    )
}

/// The login interstitial Facebook serves to clients it refuses.
#[allow(dead_code)]
pub fn login_page() -> String {
    r#"<!DOCTYPE html><html><head><title>Log into Facebook</title></head>
<body><form id="login_form"><button>Log into Facebook</button></form></body></html>"#
        .to_string()
}
