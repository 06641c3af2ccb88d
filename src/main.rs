//! # press_feed
//!
//! Crawls broadcaster press-release sites and merges what it finds into a
//! single JSON feed of programme announcements.
//!
//! ## Usage
//!
//! ```sh
//! press_feed -o feed.json
//! ```
//!
//! ## Architecture
//!
//! For every configured site:
//! 1. **Listing**: fetch the listing page and discover article links through
//!    an ordered chain of selector strategies
//! 2. **Filtering**: drop boilerplate entries (cookies, privacy, careers, ...)
//! 3. **Crawling**: fetch each article in turn, with a fixed pause between
//!    requests, and extract body text, dates, image, tags, programme names
//!    and broadcast-time hints
//!
//! Items from all sites are then sorted newest first and written as JSON.
//! The process exits with failure when no item was produced.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod feed;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::Config;
use fetch::{HttpFetcher, PageFetcher};
use outputs::{json, report::FeedSummary};
use scrapers::Scraper;
use scrapers::site::PressSite;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("press_feed starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = Config::resolve(&args).await?;
    info!(
        sites = config.sites.len(),
        delay_ms = config.delay_ms,
        timeout_secs = config.timeout_secs,
        "Configuration resolved"
    );

    let output = Path::new(&args.output);
    if let Err(e) = ensure_writable_parent(output).await {
        error!(path = %args.output, error = %e, "Output location is not writable");
        return Err(e);
    }

    // One client for the whole run.
    let fetcher: Arc<dyn PageFetcher> =
        Arc::new(HttpFetcher::new(&config.user_agent, config.timeout())?);

    let mut sites = Vec::new();
    for profile in config.sites.iter().cloned() {
        let source = profile.source.clone();
        match PressSite::new(profile, Arc::clone(&fetcher), config.delay()) {
            Ok(site) => sites.push(site),
            Err(e) => error!(%source, error = %e, "Invalid site profile; skipping"),
        }
    }

    if args.diagnose {
        for site in &sites {
            if let Err(e) = site.diagnose().await {
                warn!(source = %site.source(), error = %e, "Diagnostic pass failed");
            }
        }
    }

    let mut batches = Vec::new();
    for site in &sites {
        let scraper: &dyn Scraper = site;
        info!(source = %site.source(), base_url = %scraper.base_url(), "Running scraper");
        match scraper.scrape_articles().await {
            Ok(items) => batches.push(items),
            Err(e) => {
                error!(source = %site.source(), error = %e, "Scraper failed");
            }
        }
    }

    let feed = feed::assemble(batches);

    if let Err(e) = json::write_feed(&feed, output).await {
        error!(path = %args.output, error = %e, "Failed to write JSON feed");
        return Err(e.into());
    }

    FeedSummary::from_items(&feed).log();

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        output = %args.output,
        "Execution complete"
    );

    if feed.is_empty() {
        warn!("No feed items produced");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
