//! Metadata resolution.
//!
//! A [`Resolver`] turns a Facebook URL into a [`MetadataRecord`] by trying a
//! fixed sequence of strategies:
//! 1. Short-share links are moved onto the desktop host
//! 2. The oEmbed endpoint is probed; a usable answer wins outright
//! 3. The page is fetched with each identity in turn until one is served content
//! 4. If every identity was blocked, the mobile host is tried once
//!
//! Identity rotation only continues past login walls and bot-detection
//! statuses. Timeouts, server errors and transport failures end resolution
//! immediately.

mod oembed;
mod request;
mod rewrite;

use std::ops::ControlFlow;

use futures::future::join_all;
use log::{debug, info, warn};
use reqwest::Client;
use url::Url;

use crate::config::{ResolveOptions, ResolverConfig};
use crate::error_handling::{FetchError, InitializationError, ResolveError};
use crate::initialization::init_client;
use crate::models::{CanonicalUrl, MetadataRecord};

// Re-export public API
pub use rewrite::{canonicalize_share_url, to_mobile_url};

/// Resolves Facebook URLs into preview metadata.
///
/// Holds no per-URL state: concurrent resolutions only share the connection
/// pool of the HTTP client.
///
/// # Examples
///
/// ```no_run
/// use fb_link_preview::{Resolver, ResolverConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = Resolver::new(ResolverConfig::default())?;
/// let record = resolver.resolve("https://www.facebook.com/watch?v=123").await?;
/// println!("{} ({})", record.title, record.site_name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
    config: ResolverConfig,
}

impl Resolver {
    /// Creates a resolver with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: ResolverConfig) -> Result<Self, InitializationError> {
        let client = init_client(&config)?;
        Ok(Self { client, config })
    }

    /// Creates a resolver around an existing client.
    ///
    /// The client should follow redirects; login walls are detected on the
    /// final URL.
    pub fn with_client(client: Client, config: ResolverConfig) -> Self {
        Self { client, config }
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `url` with the resolver's configuration.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve_with`].
    pub async fn resolve(&self, url: &str) -> Result<MetadataRecord, ResolveError> {
        self.resolve_with(url, &ResolveOptions::default()).await
    }

    /// Resolves `url`, applying per-call overrides.
    ///
    /// # Errors
    ///
    /// - `ResolveError::MalformedUrl` if `url` is not an absolute http(s) URL
    /// - `ResolveError::Fatal` on a timeout, a server error or a transport failure
    /// - `ResolveError::ExhaustedStrategies` if every identity and the mobile
    ///   host were blocked
    pub async fn resolve_with(
        &self,
        url: &str,
        options: &ResolveOptions,
    ) -> Result<MetadataRecord, ResolveError> {
        let config = options.apply(&self.config);

        let parsed = Url::parse(url).map_err(|_| ResolveError::MalformedUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ResolveError::MalformedUrl(url.to_string()));
        }

        let target = canonicalize_share_url(&parsed);
        if target != parsed {
            debug!("Rewrote share link {parsed} to {target}");
        }

        if let Some(endpoint) = &config.oembed_endpoint {
            match oembed::probe(&self.client, endpoint, &target, &config).await {
                Ok(Some(record)) => {
                    info!("Resolved {target} from oEmbed");
                    return Ok(record);
                }
                Ok(None) => debug!("oEmbed had no preview for {target}"),
                Err(e) => warn!("oEmbed failed for {target}: {e:#}"),
            }
        }

        let mut attempts = 1;
        let mut last = match self
            .try_identity(&target, 1, config.primary_identity(), &config)
            .await
        {
            ControlFlow::Continue(e) => e,
            ControlFlow::Break(outcome) => return outcome,
        };

        for (index, identity) in config.identities().into_iter().enumerate().skip(1) {
            attempts += 1;
            match self.try_identity(&target, index + 1, identity, &config).await {
                ControlFlow::Continue(e) => last = e,
                ControlFlow::Break(outcome) => return outcome,
            }
        }

        if config.mobile_fallback {
            let mobile = to_mobile_url(&target);
            if mobile != target {
                attempts += 1;
                match request::fetch_page(&self.client, &mobile, config.primary_identity(), &config)
                    .await
                {
                    Ok(record) => {
                        info!("Resolved {target} via mobile host");
                        return Ok(record);
                    }
                    Err(e) => debug!("Mobile fallback failed for {mobile}: {e}"),
                }
            }
        }

        Err(ResolveError::ExhaustedStrategies {
            url: target.to_string(),
            attempts,
            last,
        })
    }

    /// Fetches `target` with one identity. Breaks with the final outcome on
    /// success or a fatal error, continues with the error when blocked.
    async fn try_identity(
        &self,
        target: &Url,
        position: usize,
        identity: &str,
        config: &ResolverConfig,
    ) -> ControlFlow<Result<MetadataRecord, ResolveError>, FetchError> {
        match request::fetch_page(&self.client, target, identity, config).await {
            Ok(record) => {
                info!("Resolved {target} with identity #{position}");
                ControlFlow::Break(Ok(record))
            }
            Err(e) if e.is_retryable() => {
                warn!("Identity #{position} blocked: {e}");
                ControlFlow::Continue(e)
            }
            Err(e) => ControlFlow::Break(Err(ResolveError::Fatal(e))),
        }
    }
}

/// Resolves `url` with a default resolver and the given overrides.
///
/// Builds a fresh HTTP client per call; hold a [`Resolver`] to reuse one.
///
/// # Errors
///
/// See [`Resolver::resolve_with`]; client construction failures are reported
/// as `ResolveError::Initialization`.
pub async fn resolve(url: &str, options: &ResolveOptions) -> Result<MetadataRecord, ResolveError> {
    let resolver = Resolver::new(ResolverConfig::default())?;
    resolver.resolve_with(url, options).await
}

/// Resolves at most `limit` links concurrently, returning results in input order.
///
/// Each link is an independent future; one failing does not affect the others.
pub async fn resolve_all(
    resolver: &Resolver,
    links: &[CanonicalUrl],
    limit: usize,
) -> Vec<(CanonicalUrl, Result<MetadataRecord, ResolveError>)> {
    let pending = links.iter().take(limit).map(|link| async move {
        let result = resolver.resolve(link.as_str()).await;
        (link.clone(), result)
    });
    join_all(pending).await
}
