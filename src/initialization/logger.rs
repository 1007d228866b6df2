//! Logger initialization.
//!
//! Log output goes to stderr so stdout stays reserved for the JSON records.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate, so
/// `RUST_LOG=reqwest=debug` still works next to `--log-level info`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug fb_link_preview "https://www.facebook.com/watch?v=123"
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=fb_link_preview=debug,hyper=info fb_link_preview - < message.txt
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("selectors", LevelFilter::Warn);
    // Pages are routinely malformed; parser warnings are noise here
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("fb_link_preview", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let (emoji, colored_level) = level_style(record.level());
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One JSON log object; the message is JSON-escaped.
fn json_line(timestamp_ms: i64, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": timestamp_ms,
        "level": level.to_string(),
        "target": target,
        "msg": message,
    })
    .to_string()
}

fn level_style(level: Level) -> (&'static str, ColoredString) {
    let label = level.to_string();
    match level {
        Level::Error => ("❌", label.red()),
        Level::Warn => ("⚠️", label.yellow()),
        Level::Info => ("✔️", label.green()),
        Level::Debug => ("🔍", label.blue()),
        Level::Trace => ("🔬", label.purple()),
    }
}
