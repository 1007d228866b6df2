//! Configuration types and CLI options.
//!
//! This module defines the resolver configuration used by the library and the
//! command-line options of the `fb_link_preview` binary.

use std::ops::RangeInclusive;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_TIMEOUT, DEFAULT_TIMEOUT_MS, MAX_EMBEDS, MIN_EMBEDS, OEMBED_ENDPOINT, OEMBED_TIMEOUT,
    REQUEST_JITTER_MAX_MS, REQUEST_JITTER_MIN_MS, USER_AGENTS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Resolver configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use fb_link_preview::ResolverConfig;
/// use std::time::Duration;
///
/// let config = ResolverConfig {
///     timeout: Duration::from_secs(10),
///     request_jitter_ms: None,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Time budget of one page fetch attempt
    pub timeout: Duration,

    /// Single User-Agent that replaces the rotation list entirely when set
    pub identity_override: Option<String>,

    /// oEmbed endpoint probed before fetching the page; `None` skips the probe
    pub oembed_endpoint: Option<String>,

    /// Time budget of the oEmbed probe
    pub oembed_timeout: Duration,

    /// Randomized delay before each attempt, in milliseconds; `None` disables it
    pub request_jitter_ms: Option<RangeInclusive<u64>>,

    /// Retry once on the mobile host when every identity was blocked
    pub mobile_fallback: bool,
}

impl ResolverConfig {
    /// Identities to rotate through, in order.
    pub fn identities(&self) -> Vec<&str> {
        match self.identity_override.as_deref() {
            Some(user_agent) => vec![user_agent],
            None => USER_AGENTS.to_vec(),
        }
    }

    /// Identity used for single-shot requests (mobile fallback, oEmbed probe).
    pub fn primary_identity(&self) -> &str {
        self.identity_override
            .as_deref()
            .unwrap_or(USER_AGENTS[0])
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            identity_override: None,
            oembed_endpoint: Some(OEMBED_ENDPOINT.to_string()),
            oembed_timeout: OEMBED_TIMEOUT,
            request_jitter_ms: Some(REQUEST_JITTER_MIN_MS..=REQUEST_JITTER_MAX_MS),
            mobile_fallback: true,
        }
    }
}

/// Per-call overrides for a single resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Replaces the configured per-attempt time budget
    pub timeout: Option<Duration>,
    /// Replaces the identity rotation list with this User-Agent
    pub user_agent: Option<String>,
}

impl ResolveOptions {
    /// Options with a timeout given in milliseconds.
    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            timeout: Some(Duration::from_millis(timeout_ms)),
            user_agent: None,
        }
    }

    /// Applies these overrides on top of a resolver configuration.
    pub(crate) fn apply(&self, config: &ResolverConfig) -> ResolverConfig {
        let mut effective = config.clone();
        if let Some(timeout) = self.timeout {
            effective.timeout = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            effective.identity_override = Some(user_agent.clone());
        }
        effective
    }
}

/// Clamps a raw embed limit into the supported range.
///
/// Non-numeric input falls back to the minimum.
pub fn parse_max_embeds(value: &str) -> usize {
    value
        .trim()
        .parse::<i64>()
        .map(|n| n.clamp(MIN_EMBEDS as i64, MAX_EMBEDS as i64) as usize)
        .unwrap_or(MIN_EMBEDS)
}

fn max_embeds_parser(value: &str) -> Result<usize, String> {
    Ok(parse_max_embeds(value))
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Resolve the first link in a message
/// fb_link_preview "look at https://www.facebook.com/watch?v=123"
///
/// # Read the message from stdin and render up to three embeds
/// echo "$MESSAGE" | fb_link_preview - --max-embeds 3
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "fb_link_preview",
    about = "Extracts Facebook links from a message and prints their preview metadata as JSON lines."
)]
pub struct Opt {
    /// Message text; `-` or nothing reads it from stdin
    pub text: Vec<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-attempt timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// User-Agent that replaces the built-in identity rotation
    #[arg(long, env = "FACEBOOK_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Maximum number of links resolved per message (1-5)
    #[arg(long, env = "MAX_FACEBOOK_EMBEDS", default_value = "1", value_parser = max_embeds_parser)]
    pub max_embeds: usize,

    /// Skip the oEmbed probe and always fetch the page
    #[arg(long)]
    pub no_oembed: bool,

    /// Disable the randomized pre-request delay
    #[arg(long)]
    pub no_jitter: bool,
}

impl Opt {
    /// Builds the resolver configuration these options describe.
    pub fn resolver_config(&self) -> ResolverConfig {
        let defaults = ResolverConfig::default();
        ResolverConfig {
            timeout: Duration::from_millis(self.timeout_ms),
            identity_override: self.user_agent.clone(),
            oembed_endpoint: if self.no_oembed {
                None
            } else {
                defaults.oembed_endpoint
            },
            request_jitter_ms: if self.no_jitter {
                None
            } else {
                defaults.request_jitter_ms
            },
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_resolver_config_default() {
        let config = ResolverConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.oembed_timeout, Duration::from_secs(5));
        assert!(config.mobile_fallback);
        assert!(config.oembed_endpoint.is_some());
        assert_eq!(config.identities().len(), USER_AGENTS.len());
    }

    #[test]
    fn test_identity_override_replaces_rotation() {
        let config = ResolverConfig {
            identity_override: Some("custom-agent".to_string()),
            ..Default::default()
        };
        assert_eq!(config.identities(), vec!["custom-agent"]);
        assert_eq!(config.primary_identity(), "custom-agent");
    }

    #[test]
    fn test_resolve_options_apply() {
        let config = ResolverConfig::default();
        let options = ResolveOptions {
            timeout: Some(Duration::from_millis(250)),
            user_agent: Some("ua".to_string()),
        };
        let effective = options.apply(&config);
        assert_eq!(effective.timeout, Duration::from_millis(250));
        assert_eq!(effective.identities(), vec!["ua"]);

        // Empty options leave the configuration untouched
        let untouched = ResolveOptions::default().apply(&config);
        assert_eq!(untouched.timeout, config.timeout);
        assert!(untouched.identity_override.is_none());
    }

    #[test]
    fn test_parse_max_embeds_clamps() {
        assert_eq!(parse_max_embeds("3"), 3);
        assert_eq!(parse_max_embeds("0"), 1);
        assert_eq!(parse_max_embeds("-4"), 1);
        assert_eq!(parse_max_embeds("12"), 5);
        assert_eq!(parse_max_embeds("many"), 1);
        assert_eq!(parse_max_embeds(" 2 "), 2);
    }

    #[test]
    fn test_opt_resolver_config() {
        let opt = Opt::parse_from([
            "fb_link_preview",
            "--timeout-ms",
            "2000",
            "--no-oembed",
            "--no-jitter",
            "hello",
        ]);
        let config = opt.resolver_config();
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(config.oembed_endpoint.is_none());
        assert!(config.request_jitter_ms.is_none());
        assert_eq!(opt.text, vec!["hello".to_string()]);
    }
}
