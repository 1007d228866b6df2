//! Error type definitions.
//!
//! This module defines the initialization errors, the per-attempt fetch errors
//! and the errors that cross the resolver boundary.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

use crate::config::{IDENTITY_SENSITIVE_STATUSES, LOGIN_WALL_STATUS};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Failure of a single fetch attempt (one URL, one identity, one time budget).
#[derive(Error, Debug)]
pub enum FetchError {
    /// The attempt exceeded its time budget and was cancelled.
    #[error("Request to Facebook timed out for {url} after {budget_ms}ms")]
    Timeout {
        /// URL requested
        url: String,
        /// Time budget that expired
        budget_ms: u64,
    },

    /// The request ended on the login page instead of the content.
    #[error("Redirected to login page for {url} (status {status})", status = LOGIN_WALL_STATUS)]
    LoginWall {
        /// URL requested
        url: String,
    },

    /// The server answered with a non-success status.
    #[error("Failed to fetch Facebook URL {url} (status {status})")]
    Status {
        /// URL requested
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Connection, TLS, redirect or other transport failure.
    #[error("Network error fetching Facebook URL {url}: {source}")]
    Network {
        /// URL requested
        url: String,
        /// Underlying client error
        #[source]
        source: ReqwestError,
    },

    /// The response body could not be read.
    #[error("Failed to read response body for {url}: {source}")]
    Body {
        /// URL requested
        url: String,
        /// Underlying client error
        #[source]
        source: ReqwestError,
    },
}

impl FetchError {
    /// HTTP status associated with this failure, synthetic for login walls.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::LoginWall { .. } => Some(LOGIN_WALL_STATUS),
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Timeout { .. } | FetchError::Network { .. } | FetchError::Body { .. } => {
                None
            }
        }
    }

    /// Whether another identity (or host) might be served real content.
    ///
    /// Only login walls and the bot-detection statuses qualify; server errors,
    /// transport failures and timeouts do not depend on the declared identity.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::LoginWall { .. } => true,
            FetchError::Status { status, .. } => IDENTITY_SENSITIVE_STATUSES.contains(status),
            FetchError::Timeout { .. } | FetchError::Network { .. } | FetchError::Body { .. } => {
                false
            }
        }
    }

    /// Whether this failure is a time budget expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    /// URL of the attempt that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url, .. }
            | FetchError::LoginWall { url }
            | FetchError::Status { url, .. }
            | FetchError::Network { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// Errors returned by the metadata resolver.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The input could not be parsed as an absolute URL.
    #[error("Malformed URL: {0}")]
    MalformedUrl(String),

    /// A failure that no other identity or host could fix (timeout, server
    /// error, transport error).
    #[error(transparent)]
    Fatal(FetchError),

    /// The default resolver could not be created.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// Every strategy was tried and blocked; carries the last concrete error.
    #[error("All fetch strategies failed for {url} after {attempts} attempts: {last}")]
    ExhaustedStrategies {
        /// URL the caller asked for
        url: String,
        /// Number of page requests issued
        attempts: usize,
        /// Last error seen, for diagnostics
        #[source]
        last: FetchError,
    },
}

impl ResolveError {
    /// HTTP status of the underlying failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResolveError::MalformedUrl(_) | ResolveError::Initialization(_) => None,
            ResolveError::Fatal(err) => err.status(),
            ResolveError::ExhaustedStrategies { last, .. } => last.status(),
        }
    }

    /// Whether the underlying failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            ResolveError::MalformedUrl(_) | ResolveError::Initialization(_) => false,
            ResolveError::Fatal(err) => err.is_timeout(),
            ResolveError::ExhaustedStrategies { last, .. } => last.is_timeout(),
        }
    }
}
