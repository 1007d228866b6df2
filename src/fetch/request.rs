//! One page fetch attempt: one URL, one identity, one time budget.

use std::time::Duration;

use log::debug;
use rand::Rng;
use reqwest::Client;
use url::Url;

use crate::config::{
    apply_document_headers, ResolverConfig, LOGIN_BODY_MARKER, LOGIN_PATH_MARKERS,
    OG_DESCRIPTION_MARKER,
};
use crate::error_handling::FetchError;
use crate::models::MetadataRecord;
use crate::parse::parse_document;

/// Fetches `url` with the given identity and parses the page.
///
/// Applies the configured pre-request delay, then runs the whole exchange
/// (connect, redirects, body) under `config.timeout`. A response that lands on
/// the login page, by final URL or by body, is a [`FetchError::LoginWall`].
///
/// # Errors
///
/// Returns a [`FetchError`] describing why no document was obtained.
pub(crate) async fn fetch_page(
    client: &Client,
    url: &Url,
    user_agent: &str,
    config: &ResolverConfig,
) -> Result<MetadataRecord, FetchError> {
    if let Some(range) = config.request_jitter_ms.as_ref().filter(|range| !range.is_empty()) {
        let delay_ms = rand::rng().random_range(range.clone());
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    let body = tokio::time::timeout(config.timeout, fetch_body(client, url, user_agent))
        .await
        .map_err(|_| FetchError::Timeout {
            url: url.to_string(),
            budget_ms: config.timeout.as_millis() as u64,
        })??;

    Ok(parse_document(&body, url))
}

async fn fetch_body(client: &Client, url: &Url, user_agent: &str) -> Result<String, FetchError> {
    debug!("Fetching {url}");

    let response = apply_document_headers(client.get(url.as_str()), user_agent)
        .send()
        .await
        .map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    let final_url = response.url().to_string();
    debug!(
        "Response status {} for {}, final URL {}",
        status.as_u16(),
        url,
        final_url
    );

    if is_login_url(&final_url) {
        return Err(FetchError::LoginWall {
            url: url.to_string(),
        });
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })?;

    if is_login_page(&body) {
        return Err(FetchError::LoginWall {
            url: url.to_string(),
        });
    }

    Ok(body)
}

/// Returns true if a final response URL is the login page.
pub(crate) fn is_login_url(final_url: &str) -> bool {
    LOGIN_PATH_MARKERS
        .iter()
        .any(|marker| final_url.contains(marker))
}

/// Returns true if a body is the login interstitial rather than content.
pub(crate) fn is_login_page(body: &str) -> bool {
    body.contains(LOGIN_BODY_MARKER) && !body.contains(OG_DESCRIPTION_MARKER)
}
