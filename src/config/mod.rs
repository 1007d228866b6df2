//! Application configuration and constants.
//!
//! This module provides:
//! - Fixed tables (target hosts, identities, URL shapes, timeouts)
//! - Browser-shaped request headers
//! - Resolver configuration and CLI option types

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub(crate) use headers::{apply_document_headers, apply_json_headers};
pub use types::{parse_max_embeds, LogFormat, LogLevel, Opt, ResolveOptions, ResolverConfig};
