//! Command-line interface definitions for press_feed.
//!
//! All options can also be supplied through environment variables.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

/// Command-line arguments for press_feed.
///
/// # Examples
///
/// ```sh
/// # Crawl the built-in sites and write ./feed.json
/// press_feed
///
/// # Custom output and site list, with a structure report first
/// press_feed -o public/feed.json -c sites.yaml --diagnose
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON feed to write
    #[arg(short, long, env = "PRESS_FEED_OUTPUT", default_value = "feed.json")]
    pub output: String,

    /// Optional path to a YAML config with request settings and sites
    #[arg(short, long, env = "PRESS_FEED_CONFIG")]
    pub config: Option<String>,

    /// Pause between article requests, in milliseconds
    #[arg(long, env = "PRESS_FEED_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long, env = "PRESS_FEED_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Log listing-page structure statistics before crawling.
    /// The env form accepts `1`/`0`, `yes`/`no`, `on`/`off`.
    #[arg(
        long,
        env = "PRESS_FEED_DIAGNOSE",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub diagnose: bool,
}
