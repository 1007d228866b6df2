//! Tests for CLI option parsing.

use std::time::Duration;

use clap::Parser;
use fb_link_preview::config::{DEFAULT_TIMEOUT_MS, USER_AGENTS};
use fb_link_preview::{LogFormat, LogLevel, Opt};

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["fb_link_preview", "hello"]).expect("should parse");

    assert_eq!(opt.text, vec!["hello".to_string()]);
    assert!(matches!(opt.log_level, LogLevel::Info));
    assert!(matches!(opt.log_format, LogFormat::Plain));
    assert_eq!(opt.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert!(!opt.no_oembed);
    assert!(!opt.no_jitter);
}

#[test]
fn test_stdin_marker_and_no_text() {
    let opt = Opt::try_parse_from(["fb_link_preview", "-"]).expect("should parse");
    assert_eq!(opt.text, vec!["-".to_string()]);

    let opt = Opt::try_parse_from(["fb_link_preview"]).expect("should parse");
    assert!(opt.text.is_empty());
}

#[test]
fn test_max_embeds_is_clamped() {
    let cases = [("3", 3), ("0", 1), ("9", 5), ("lots", 1)];
    for (raw, expected) in cases {
        let opt = Opt::try_parse_from(["fb_link_preview", "--max-embeds", raw, "x"])
            .expect("should parse");
        assert_eq!(opt.max_embeds, expected, "--max-embeds {}", raw);
    }
}

#[test]
fn test_user_agent_flag_replaces_rotation() {
    let opt = Opt::try_parse_from(["fb_link_preview", "--user-agent", "my-agent", "x"])
        .expect("should parse");
    let config = opt.resolver_config();

    assert_eq!(config.identities(), vec!["my-agent"]);
}

#[test]
fn test_resolver_config_from_flags() {
    let opt = Opt::try_parse_from([
        "fb_link_preview",
        "--timeout-ms",
        "750",
        "--no-oembed",
        "--no-jitter",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "x",
    ])
    .expect("should parse");
    let config = opt.resolver_config();

    assert_eq!(config.timeout, Duration::from_millis(750));
    assert!(config.oembed_endpoint.is_none());
    assert!(config.request_jitter_ms.is_none());
    assert!(config.mobile_fallback);
    assert!(matches!(opt.log_level, LogLevel::Debug));
    assert!(matches!(opt.log_format, LogFormat::Json));
    if opt.user_agent.is_none() {
        assert_eq!(config.identities().len(), USER_AGENTS.len());
    }
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Opt::try_parse_from(["fb_link_preview", "--log-level", "loud", "x"]).is_err());
}

#[test]
fn test_invalid_timeout_rejected() {
    assert!(Opt::try_parse_from(["fb_link_preview", "--timeout-ms", "soon", "x"]).is_err());
}
