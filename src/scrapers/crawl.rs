//! Sequential article crawl.
//!
//! Stubs are visited one at a time in discovery order, with a fixed pause
//! before every request after the first. Each visit ends in one of three
//! states: content attached, content absent (page fetched but nothing
//! resolved), or failed (page not fetched). A failure is logged with its URL
//! and counted; the stub is still emitted and the crawl moves on.

use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::models::{ArticleContent, ArticleStub, CrawlStats, FeedItem};
use crate::scrapers::heuristics::{BroadcastMatcher, extract_content};
use crate::scrapers::profiles::SiteProfile;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use url::Url;

/// How a single stub's visit ended.
#[derive(Debug)]
pub enum ItemOutcome {
    Attached(ArticleContent),
    Absent,
    Failed(ScrapeError),
}

pub struct Crawler<'a> {
    fetcher: &'a dyn PageFetcher,
    profile: &'a SiteProfile,
    broadcast: &'a BroadcastMatcher,
    delay: Duration,
}

impl<'a> Crawler<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        profile: &'a SiteProfile,
        broadcast: &'a BroadcastMatcher,
        delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            profile,
            broadcast,
            delay,
        }
    }

    /// Visit every stub and return the resulting items, in input order,
    /// together with the outcome counts.
    ///
    /// # Arguments
    ///
    /// * `stubs` - Filtered listing stubs, in discovery order
    ///
    /// # Returns
    ///
    /// One [`FeedItem`] per stub. A failed fetch still yields an item, just
    /// without `content`, and is counted in [`CrawlStats::failed`].
    #[instrument(level = "info", skip_all, fields(source = %self.profile.source, count = stubs.len()))]
    pub async fn crawl(&self, stubs: Vec<ArticleStub>) -> (Vec<FeedItem>, CrawlStats) {
        let total = stubs.len();
        let visited: Vec<(ArticleStub, ItemOutcome)> = stream::iter(stubs.into_iter().enumerate())
            .then(|(i, stub)| async move {
                if i > 0 && !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                debug!(index = i + 1, total, url = %stub.url, "Fetching article");
                let outcome = self.visit(&stub).await;
                (stub, outcome)
            })
            .collect()
            .await;

        let mut stats = CrawlStats::default();
        let items: Vec<FeedItem> = visited
            .into_iter()
            .map(|(stub, outcome)| {
                let content = match outcome {
                    ItemOutcome::Attached(content) => {
                        stats.succeeded += 1;
                        Some(content)
                    }
                    ItemOutcome::Absent => {
                        stats.empty += 1;
                        None
                    }
                    ItemOutcome::Failed(e) => {
                        stats.failed += 1;
                        debug!(url = %stub.url, error = %e, "Emitting stub without content");
                        None
                    }
                };
                FeedItem { stub, content }
            })
            .collect();

        info!(
            succeeded = stats.succeeded,
            empty = stats.empty,
            failed = stats.failed,
            "Crawl finished"
        );
        (items, stats)
    }

    /// Fetch one article and run the field heuristics over it.
    pub async fn visit(&self, stub: &ArticleStub) -> ItemOutcome {
        let page_url = match Url::parse(&stub.url) {
            Ok(url) => url,
            Err(e) => {
                error!(url = %stub.url, error = %e, "Unparseable article URL");
                return ItemOutcome::Failed(ScrapeError::InvalidUrl {
                    url: stub.url.clone(),
                    reason: e.to_string(),
                });
            }
        };

        let body = match self.fetcher.fetch_page(&stub.url).await {
            Ok(body) => body,
            Err(e) => {
                error!(url = %stub.url, error = %e, "Article fetch failed; keeping stub without content");
                return ItemOutcome::Failed(e);
            }
        };

        let content = extract_content(&body, &page_url, self.profile, self.broadcast);
        if content.is_empty() {
            info!(url = %stub.url, "No fields resolved on article page");
            return ItemOutcome::Absent;
        }

        debug!(
            url = %stub.url,
            summary = %truncate_for_log(content.summary.as_deref().unwrap_or_default(), 80),
            programs = ?content.detected_programs,
            "Extracted article content"
        );
        ItemOutcome::Attached(content)
    }
}
