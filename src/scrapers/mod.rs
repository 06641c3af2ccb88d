//! Press-site scrapers.
//!
//! Every source goes through the same pipeline:
//!
//! 1. **Listing**: fetch the listing page and pick candidate links with the
//!    first link strategy that matches ([`listing`])
//! 2. **Filtering**: drop boilerplate entries before anything else is
//!    fetched ([`filter`])
//! 3. **Crawling**: visit each remaining article sequentially with a
//!    politeness delay ([`crawl`]) and run the field resolvers over it
//!    ([`heuristics`])
//!
//! What differs between sites is data, not code: selector chains, keyword
//! tables and patterns live in a [`profiles::SiteProfile`], and
//! [`site::PressSite`] runs the pipeline for one profile.

use crate::error::Result;
use crate::models::FeedItem;
use async_trait::async_trait;

pub mod crawl;
pub mod diagnostics;
pub mod filter;
pub mod heuristics;
pub mod listing;
pub mod profiles;
pub mod site;

/// Capability every source exposes.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scheme and host of the source; relative links resolve against it.
    fn base_url(&self) -> &str;

    /// Discover, filter and crawl the source's articles.
    ///
    /// Fails only when the listing page itself cannot be fetched. Individual
    /// article failures yield items without `content`.
    async fn scrape_articles(&self) -> Result<Vec<FeedItem>>;
}
