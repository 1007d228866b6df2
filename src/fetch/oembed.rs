//! oEmbed fast path.
//!
//! Facebook's public post oEmbed endpoint answers without a token for public
//! posts and videos. When it returns a thumbnail or an embed fragment the
//! record is built from it directly and no page is fetched. Every failure
//! here is reported to the caller as an error to log, never to surface.

use anyhow::{bail, Context, Error};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::{apply_json_headers, ResolverConfig, DEFAULT_SITE_NAME};
use crate::models::MetadataRecord;

/// Fields of an oEmbed response this crate reads.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OEmbedResponse {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    // Numbers for videos, sometimes strings ("auto") for posts
    #[serde(default)]
    pub width: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
}

impl OEmbedResponse {
    /// A response is usable when it carries a thumbnail or an embed fragment.
    pub(crate) fn is_usable(&self) -> bool {
        non_blank(&self.thumbnail_url).is_some() || non_blank(&self.html).is_some()
    }

    /// Builds the record for `target` from this response.
    pub(crate) fn into_record(self, target: &Url) -> MetadataRecord {
        let author = non_blank(&self.author_name);
        let provider = non_blank(&self.provider_name);
        let kind = non_blank(&self.kind);

        MetadataRecord {
            url: target.to_string(),
            title: author
                .or(provider)
                .unwrap_or(DEFAULT_SITE_NAME)
                .to_string(),
            description: None,
            site_name: provider.unwrap_or(DEFAULT_SITE_NAME).to_string(),
            content_type: kind.map(str::to_string),
            image: non_blank(&self.thumbnail_url).map(str::to_string),
            video: None,
            video_width: self.width.as_ref().and_then(dimension),
            video_height: self.height.as_ref().and_then(dimension),
            video_type: None,
            is_video: kind == Some("video"),
        }
    }
}

/// Queries the oEmbed endpoint for `target`.
///
/// Returns `Ok(None)` when the endpoint answered but had nothing usable.
///
/// # Errors
///
/// Returns an error on an invalid endpoint, transport failure, timeout,
/// non-success status or an unparsable body.
pub(crate) async fn probe(
    client: &Client,
    endpoint: &str,
    target: &Url,
    config: &ResolverConfig,
) -> Result<Option<MetadataRecord>, Error> {
    let request_url = Url::parse_with_params(endpoint, &[("url", target.as_str())])
        .with_context(|| format!("Invalid oEmbed endpoint {endpoint}"))?;

    debug!("Probing oEmbed for {target}");

    let exchange = async {
        let response = apply_json_headers(client.get(request_url.as_str()), config.primary_identity())
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok::<_, reqwest::Error>((status, body))
    };

    let (status, body) = tokio::time::timeout(config.oembed_timeout, exchange)
        .await
        .with_context(|| {
            format!(
                "oEmbed request timed out after {}ms",
                config.oembed_timeout.as_millis()
            )
        })?
        .context("oEmbed request failed")?;

    if !status.is_success() {
        bail!("oEmbed endpoint answered with status {}", status.as_u16());
    }

    let parsed: OEmbedResponse =
        serde_json::from_str(&body).context("oEmbed response is not valid JSON")?;

    if !parsed.is_usable() {
        return Ok(None);
    }
    Ok(Some(parsed.into_record(target)))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn dimension(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|&n| n > 0)
}
