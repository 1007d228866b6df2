//! fb_link_preview library: Facebook link previews for chat messages
//!
//! This library finds Facebook links in free-form message text and resolves
//! each one into preview metadata (title, description, image, video) ready
//! to render as an embed. Facebook aggressively blocks automated clients, so
//! resolution tries an oEmbed fast path, rotates client identities, falls
//! back to the mobile host and recovers images and videos from page content
//! when the declared metadata is a placeholder.
//!
//! # Example
//!
//! ```no_run
//! use fb_link_preview::{extract_links, resolve_all, Resolver, ResolverConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let links = extract_links("new clip! https://www.facebook.com/watch?v=123");
//! let resolver = Resolver::new(ResolverConfig::default())?;
//!
//! for (link, result) in resolve_all(&resolver, &links, 1).await {
//!     match result {
//!         Ok(record) => println!("{link}: {}", record.title),
//!         Err(e) => eprintln!("{link}: {e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Resolution requires a Tokio runtime. Link extraction and document parsing
//! are synchronous.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod links;
mod models;
mod parse;
mod utils;

// Re-export public API
pub use config::{LogFormat, LogLevel, Opt, ResolveOptions, ResolverConfig};
pub use error_handling::{FetchError, InitializationError, ResolveError};
pub use fetch::{canonicalize_share_url, resolve, resolve_all, to_mobile_url, Resolver};
pub use links::{extract_links, is_facebook_host, normalize_facebook_url};
pub use models::{CanonicalUrl, MetadataRecord};
pub use parse::{
    clean_text, extract_fallback_image, extract_fallback_thumbnail, extract_fallback_video,
    is_restricted_image, is_video_url, parse_document, resolve_to_absolute,
};
