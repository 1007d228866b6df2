//! Compilation helpers for the static selector and pattern tables.
//!
//! Every selector and regex in this crate is a compile-time constant, so a
//! failure to compile one is a programming error and panics with context.

use regex::Regex;
use scraper::Selector;

/// Parses a constant CSS selector.
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub(crate) fn compile_selector(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Compiles a constant regex pattern.
///
/// # Panics
///
/// Panics if the pattern does not compile (indicates a programming error).
pub(crate) fn compile_regex(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}
