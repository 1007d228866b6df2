//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `fb_link_preview` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Reading the message and printing one JSON line per resolved link
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use tokio::io::AsyncReadExt;

use fb_link_preview::initialization::init_logger_with;
use fb_link_preview::{extract_links, resolve_all, Opt, ResolveError, Resolver};

#[tokio::main]
async fn main() -> Result<()> {
    // FACEBOOK_USER_AGENT and MAX_FACEBOOK_EMBEDS may come from .env
    if dotenvy::dotenv().is_err() {
        // If .env not found in current dir, try next to the executable
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let text = read_message(&opt.text)
        .await
        .context("Failed to read message text")?;

    let links = extract_links(&text);
    if links.is_empty() {
        info!("No Facebook links found");
        return Ok(());
    }
    if links.len() > opt.max_embeds {
        info!(
            "Found {} Facebook links, resolving the first {}",
            links.len(),
            opt.max_embeds
        );
    }

    let resolver =
        Resolver::new(opt.resolver_config()).context("Failed to initialize resolver")?;

    let mut failed = 0usize;
    for (link, result) in resolve_all(&resolver, &links, opt.max_embeds).await {
        let line = match result {
            Ok(record) => serde_json::to_string(&record).context("Failed to serialize record")?,
            Err(e) => {
                failed += 1;
                error!("{e}");
                error_line(link.as_str(), &e)
            }
        };
        println!("{line}");
    }

    if failed > 0 {
        process::exit(1);
    }
    Ok(())
}

/// Joins the positional arguments, or reads stdin when there are none or `-`.
async fn read_message(args: &[String]) -> Result<String> {
    if args.is_empty() || args == ["-"] {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }
    Ok(args.join(" "))
}

fn error_line(url: &str, e: &ResolveError) -> String {
    serde_json::json!({
        "url": url,
        "error": e.to_string(),
        "status": e.status(),
        "timeout": e.is_timeout(),
    })
    .to_string()
}
