//! HTTP client initialization.
//!
//! This module builds the `reqwest::Client` shared by every fetch attempt.
//! Identities are set per request, so the client carries no User-Agent.

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};

use crate::config::{ResolverConfig, MAX_REDIRECT_HOPS};

/// Returns a client builder configured for page fetches.
///
/// - Redirect following enabled (up to 10 hops), so login walls show up in
///   the final URL
/// - Connect timeout bounded by the attempt budget
/// - Cookie-free: every attempt starts as a fresh visitor
///
/// Callers may customize the builder further (tests pin host resolution to a
/// local server with [`ClientBuilder::resolve`]).
pub fn client_builder(config: &ResolverConfig) -> ClientBuilder {
    ClientBuilder::new()
        .redirect(Policy::limited(MAX_REDIRECT_HOPS))
        .connect_timeout(config.timeout)
}

/// Initializes the HTTP client used by a resolver.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &ResolverConfig) -> Result<Client, reqwest::Error> {
    client_builder(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_client_with_default_config() {
        assert!(init_client(&ResolverConfig::default()).is_ok());
    }
}
